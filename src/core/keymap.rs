// File: src/core/keymap.rs
use crate::core::keypad::Keypad;
use crate::core::types::Digit;
use crate::error::{ImeError, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Keys that arrive by name rather than as a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedKey {
    Backspace,
    Enter,
    Escape,
    Tab,
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
}

/// One key press as delivered by the input adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub ch: Option<char>,
    pub key: Option<NamedKey>,
    pub modifiers: Modifiers,
}

impl InputEvent {
    pub fn char(ch: char) -> Self {
        Self {
            ch: Some(ch),
            key: None,
            modifiers: Modifiers::default(),
        }
    }

    pub fn named(key: NamedKey) -> Self {
        Self {
            ch: None,
            key: Some(key),
            modifiers: Modifiers::default(),
        }
    }

    pub fn ctrl(ch: char) -> Self {
        Self {
            ch: Some(ch),
            key: None,
            modifiers: Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        }
    }
}

/// What a key press means to the line editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Digit(Digit),
    Next,
    Previous,
    /// Commit the selection, then insert the character.
    Confirm(char),
    Backspace,
    Exit,
}

/// Characters that commit the current word and are then inserted as-is.
pub const PASSTHROUGH: [char; 11] = [' ', '.', ',', '?', '!', ':', ';', '\'', '"', '(', ')'];

/// Physical keys for each digit: the number pad itself, plus `789`, `uio`
/// and `jkl` for keyboards without one.
pub const NO_NUMPAD_ALIASES: [(Digit, &str); 9] = [
    ('7', "7"),
    ('8', "8"),
    ('9', "9"),
    ('4', "4u"),
    ('5', "5i"),
    ('6', "6o"),
    ('1', "1j"),
    ('2', "2k"),
    ('3', "3l"),
];

pub const NEXT_KEYS: [char; 1] = ['+'];
pub const PREVIOUS_KEYS: [char; 1] = ['-'];

/// Resolves raw key events into editor actions.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyMap {
    digit_by_key: BTreeMap<char, Digit>,
    passthrough: BTreeSet<char>,
    next: BTreeSet<char>,
    previous: BTreeSet<char>,
}

impl KeyMap {
    /// Builds a key map from `(digit, keys)` aliases and character sets.
    ///
    /// A key may produce only one digit and may not double as a
    /// passthrough or navigation character.
    pub fn new<I, S>(
        digit_keys: I,
        passthrough: impl IntoIterator<Item = char>,
        next: impl IntoIterator<Item = char>,
        previous: impl IntoIterator<Item = char>,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (Digit, S)>,
        S: AsRef<str>,
    {
        let mut digit_by_key = BTreeMap::new();
        for (digit, keys) in digit_keys {
            if !Keypad::is_digit(digit) {
                return Err(ImeError::InvalidKeyMap(format!("{digit:?} is not a keypad digit")));
            }
            for key in keys.as_ref().chars() {
                if let Some(previous) = digit_by_key.insert(key, digit) {
                    if previous != digit {
                        return Err(ImeError::InvalidKeyMap(format!(
                            "{key:?} produces both {previous} and {digit}"
                        )));
                    }
                }
            }
        }

        let passthrough: BTreeSet<char> = passthrough.into_iter().collect();
        let next: BTreeSet<char> = next.into_iter().collect();
        let previous: BTreeSet<char> = previous.into_iter().collect();

        let sets = [("passthrough", &passthrough), ("next", &next), ("previous", &previous)];
        for (i, (name, set)) in sets.iter().enumerate() {
            if let Some(key) = set.iter().find(|key| digit_by_key.contains_key(*key)) {
                return Err(ImeError::InvalidKeyMap(format!(
                    "{key:?} is both a digit key and a {name} key"
                )));
            }
            for (other_name, other) in &sets[i + 1..] {
                if let Some(key) = set.intersection(other).next() {
                    return Err(ImeError::InvalidKeyMap(format!(
                        "{key:?} is both a {name} key and a {other_name} key"
                    )));
                }
            }
        }

        Ok(Self {
            digit_by_key,
            passthrough,
            next,
            previous,
        })
    }

    pub fn is_passthrough(&self, ch: char) -> bool {
        self.passthrough.contains(&ch)
    }

    /// Physical keys that produce `digit`, in key order.
    pub fn keys_for(&self, digit: Digit) -> impl Iterator<Item = char> + '_ {
        self.digit_by_key
            .iter()
            .filter(move |&(_, &d)| d == digit)
            .map(|(&key, _)| key)
    }

    /// Maps an event to an action, or `None` for keys the editor ignores.
    pub fn resolve(&self, event: &InputEvent) -> Option<KeyAction> {
        let modifiers = event.modifiers;
        if modifiers.ctrl && matches!(event.ch, Some('c') | Some('d')) {
            return Some(KeyAction::Exit);
        }
        if modifiers.ctrl || modifiers.alt {
            return None;
        }

        if let Some(key) = event.key {
            return match key {
                NamedKey::Escape => Some(KeyAction::Exit),
                NamedKey::Backspace => Some(KeyAction::Backspace),
                NamedKey::Right | NamedKey::Down => Some(KeyAction::Next),
                NamedKey::Left | NamedKey::Up => Some(KeyAction::Previous),
                NamedKey::Enter | NamedKey::Tab => None,
            };
        }

        let ch = event.ch?;
        if let Some(&digit) = self.digit_by_key.get(&ch) {
            Some(KeyAction::Digit(digit))
        } else if self.next.contains(&ch) {
            Some(KeyAction::Next)
        } else if self.previous.contains(&ch) {
            Some(KeyAction::Previous)
        } else if self.passthrough.contains(&ch) {
            Some(KeyAction::Confirm(ch))
        } else {
            None
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        let digit_by_key = NO_NUMPAD_ALIASES
            .iter()
            .flat_map(|&(digit, keys)| keys.chars().map(move |key| (key, digit)))
            .collect();
        Self {
            digit_by_key,
            passthrough: PASSTHROUGH.into_iter().collect(),
            next: NEXT_KEYS.into_iter().collect(),
            previous: PREVIOUS_KEYS.into_iter().collect(),
        }
    }
}
