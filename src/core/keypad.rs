// File: src/core/keypad.rs
use crate::core::types::Digit;
use crate::error::{ImeError, Result};
use std::collections::{BTreeMap, HashMap};

/// Every key on the pad. One of them carries no letters.
pub const DIGITS: [Digit; 9] = ['1', '2', '3', '4', '5', '6', '7', '8', '9'];

/// T9 laid out on a PC number pad, which starts with 7 8 9 at the top
/// instead of the 1 2 3 of a phone.
pub const UPSIDE_DOWN: [(Digit, &str); 8] = [
    ('8', "abc"),
    ('9', "def"),
    ('4', "ghi"),
    ('5', "jkl"),
    ('6', "mno"),
    ('1', "pqrs"),
    ('2', "tuv"),
    ('3', "wxyz"),
];

const ALPHABET_LEN: usize = 26;

/// The digit <-> letter tables, built once and shared by the dictionary
/// and the line editor.
#[derive(Debug, Clone, PartialEq)]
pub struct Keypad {
    letters_by_digit: BTreeMap<Digit, String>,
    digit_by_letter: HashMap<char, Digit>,
}

impl Keypad {
    /// Builds a keypad from `(digit, letters)` groups.
    ///
    /// The groups must cover `a`-`z` exactly once, use 3 or 4 letters each,
    /// and leave exactly one digit without letters.
    pub fn new<I, S>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Digit, S)>,
        S: Into<String>,
    {
        let mut letters_by_digit = BTreeMap::new();
        let mut digit_by_letter = HashMap::new();

        for (digit, letters) in groups {
            let letters: String = letters.into();
            if !DIGITS.contains(&digit) {
                return Err(ImeError::InvalidLayout(format!("{digit:?} is not a keypad digit")));
            }
            if letters.is_empty() {
                continue;
            }
            if !(3..=4).contains(&letters.chars().count()) {
                return Err(ImeError::InvalidLayout(format!(
                    "digit {digit} has {} letters, expected 3 or 4",
                    letters.chars().count()
                )));
            }
            for letter in letters.chars() {
                if !letter.is_ascii_lowercase() {
                    return Err(ImeError::InvalidLayout(format!(
                        "{letter:?} on digit {digit} is not a lowercase letter"
                    )));
                }
                if let Some(previous) = digit_by_letter.insert(letter, digit) {
                    return Err(ImeError::InvalidLayout(format!(
                        "{letter:?} is on both {previous} and {digit}"
                    )));
                }
            }
            if letters_by_digit.insert(digit, letters).is_some() {
                return Err(ImeError::InvalidLayout(format!("digit {digit} appears twice")));
            }
        }

        if digit_by_letter.len() != ALPHABET_LEN {
            return Err(ImeError::InvalidLayout(format!(
                "layout covers {} of {ALPHABET_LEN} letters",
                digit_by_letter.len()
            )));
        }
        if letters_by_digit.len() != DIGITS.len() - 1 {
            return Err(ImeError::InvalidLayout(format!(
                "expected exactly one digit without letters, found {}",
                DIGITS.len() - letters_by_digit.len()
            )));
        }

        Ok(Self {
            letters_by_digit,
            digit_by_letter,
        })
    }

    /// The number-pad layout, with 7 reserved.
    pub fn upside_down() -> Self {
        let mut letters_by_digit = BTreeMap::new();
        let mut digit_by_letter = HashMap::new();
        for (digit, letters) in UPSIDE_DOWN {
            for letter in letters.chars() {
                digit_by_letter.insert(letter, digit);
            }
            letters_by_digit.insert(digit, letters.to_string());
        }
        Self {
            letters_by_digit,
            digit_by_letter,
        }
    }

    pub fn is_digit(ch: char) -> bool {
        DIGITS.contains(&ch)
    }

    /// The digit typed to produce `ch`. Digits map to themselves.
    pub fn digit_for(&self, ch: char) -> Option<Digit> {
        if Self::is_digit(ch) {
            Some(ch)
        } else {
            self.digit_by_letter.get(&ch).copied()
        }
    }

    pub fn can_encode(&self, ch: char) -> bool {
        self.digit_for(ch).is_some()
    }

    /// Letters on `digit`, empty for the reserved digit.
    pub fn letters(&self, digit: Digit) -> &str {
        self.letters_by_digit.get(&digit).map(String::as_str).unwrap_or("")
    }

    pub fn reserved_digit(&self) -> Option<Digit> {
        DIGITS
            .iter()
            .copied()
            .find(|digit| !self.letters_by_digit.contains_key(digit))
    }

    pub fn groups(&self) -> &BTreeMap<Digit, String> {
        &self.letters_by_digit
    }

    /// Encodes `word` as the digits typed to produce it.
    /// O(k) where k is the word length.
    pub fn encode(&self, word: &str) -> Result<String> {
        word.chars()
            .map(|ch| {
                self.digit_for(ch).ok_or_else(|| ImeError::UnmappedCharacter {
                    word: word.to_string(),
                    ch,
                })
            })
            .collect()
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::upside_down()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upside_down_matches_validated_layout() {
        let validated = Keypad::new(UPSIDE_DOWN).unwrap();
        assert_eq!(validated, Keypad::upside_down());
        assert_eq!(validated.reserved_digit(), Some('7'));
    }

    #[test]
    fn encodes_words_and_passes_digits_through() {
        let keypad = Keypad::upside_down();
        assert_eq!(keypad.encode("cat").unwrap(), "882");
        assert_eq!(keypad.encode("in").unwrap(), "46");
        assert_eq!(keypad.encode("go").unwrap(), "46");
        assert_eq!(keypad.encode("r2d2").unwrap(), "1292");
        assert_eq!(keypad.encode("").unwrap(), "");
    }

    #[test]
    fn encoding_keeps_length_and_alphabet() {
        let keypad = Keypad::upside_down();
        for word in ["hello", "zebra", "quiz", "abcdefghijklmnopqrstuvwxyz", "a1b2"] {
            let digits = keypad.encode(word).unwrap();
            assert_eq!(digits.chars().count(), word.chars().count());
            assert!(digits.chars().all(Keypad::is_digit), "{word} -> {digits}");
        }
    }

    #[test]
    fn unmapped_character_is_an_error() {
        let keypad = Keypad::upside_down();
        match keypad.encode("don't") {
            Err(ImeError::UnmappedCharacter { word, ch }) => {
                assert_eq!(word, "don't");
                assert_eq!(ch, '\'');
            }
            other => panic!("expected unmapped character, got {other:?}"),
        }
        assert!(keypad.encode("Cat").is_err());
        assert!(keypad.encode("2000").is_err());
    }

    #[test]
    fn letters_and_reserved_digit() {
        let keypad = Keypad::upside_down();
        assert_eq!(keypad.letters('1'), "pqrs");
        assert_eq!(keypad.letters('7'), "");
        assert!(keypad.can_encode('7'));
        assert!(!keypad.can_encode('0'));
    }

    #[test]
    fn rejects_broken_layouts() {
        let missing_z: Vec<(Digit, &str)> = UPSIDE_DOWN
            .iter()
            .map(|&(d, l)| if d == '3' { (d, "wxy") } else { (d, l) })
            .collect();
        assert!(matches!(Keypad::new(missing_z), Err(ImeError::InvalidLayout(_))));

        let collision: Vec<(Digit, &str)> = UPSIDE_DOWN
            .iter()
            .map(|&(d, l)| if d == '3' { (d, "wxya") } else { (d, l) })
            .collect();
        assert!(matches!(Keypad::new(collision), Err(ImeError::InvalidLayout(_))));

        let zero = [('0', "abc")];
        assert!(matches!(Keypad::new(zero), Err(ImeError::InvalidLayout(_))));
    }
}
