// File: src/config.rs
//! TOML configuration for the keypad layout, physical keys and frequency
//! heuristics. Every field has a default, so an empty file is valid.
//!
//! ```toml
//! passthrough = " .,?!"
//! next_keys = "+"
//! previous_keys = "-"
//!
//! [layout]
//! 8 = "abc"
//!
//! [digit_keys]
//! 4 = "4u"
//!
//! [[adjustments]]
//! word = "of"
//! factor = 3.0
//! ```

use crate::core::keymap::{KeyMap, NEXT_KEYS, NO_NUMPAD_ALIASES, PASSTHROUGH, PREVIOUS_KEYS};
use crate::core::keypad::{Keypad, UPSIDE_DOWN};
use crate::core::types::{Digit, FrequencyAdjustment};
use crate::error::{ImeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImeConfig {
    /// Characters that commit the current word and are then inserted.
    pub passthrough: String,
    /// Characters that select the next candidate.
    pub next_keys: String,
    /// Characters that select the previous candidate.
    pub previous_keys: String,
    /// Digit -> letters on that key.
    pub layout: BTreeMap<String, String>,
    /// Digit -> physical keys that type it.
    pub digit_keys: BTreeMap<String, String>,
    /// Build-time frequency multipliers.
    pub adjustments: Vec<FrequencyAdjustment>,
}

impl Default for ImeConfig {
    fn default() -> Self {
        Self {
            passthrough: PASSTHROUGH.iter().collect(),
            next_keys: NEXT_KEYS.iter().collect(),
            previous_keys: PREVIOUS_KEYS.iter().collect(),
            layout: UPSIDE_DOWN
                .iter()
                .map(|&(digit, letters)| (digit.to_string(), letters.to_string()))
                .collect(),
            digit_keys: NO_NUMPAD_ALIASES
                .iter()
                .map(|&(digit, keys)| (digit.to_string(), keys.to_string()))
                .collect(),
            adjustments: FrequencyAdjustment::defaults(),
        }
    }
}

impl ImeConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn keypad(&self) -> Result<Keypad> {
        let groups = self
            .layout
            .iter()
            .map(|(digit, letters)| {
                parse_digit(digit)
                    .map(|digit| (digit, letters.clone()))
                    .ok_or_else(|| ImeError::InvalidLayout(format!("{digit:?} is not a single digit")))
            })
            .collect::<Result<Vec<_>>>()?;
        Keypad::new(groups)
    }

    pub fn keymap(&self) -> Result<KeyMap> {
        let digit_keys = self
            .digit_keys
            .iter()
            .map(|(digit, keys)| {
                parse_digit(digit)
                    .map(|digit| (digit, keys.as_str()))
                    .ok_or_else(|| ImeError::InvalidKeyMap(format!("{digit:?} is not a single digit")))
            })
            .collect::<Result<Vec<_>>>()?;
        KeyMap::new(
            digit_keys,
            self.passthrough.chars(),
            self.next_keys.chars(),
            self.previous_keys.chars(),
        )
    }
}

fn parse_digit(s: &str) -> Option<Digit> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(digit), None) => Some(digit),
        _ => None,
    }
}
