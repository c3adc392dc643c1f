// src/core/types.rs
use serde::{Deserialize, Serialize};

/// A keypad digit, always one of `'1'..='9'`.
pub type Digit = char;

/// A word offered for a digit sequence, with its (adjusted) corpus frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub word: String,
    pub frequency: f64,
}

impl Candidate {
    pub fn new(word: impl Into<String>, frequency: f64) -> Self {
        Self {
            word: word.into(),
            frequency,
        }
    }

    /// The digits themselves as a zero-frequency word, so raw numbers can
    /// always be typed.
    pub fn literal(sequence: &str) -> Self {
        Self::new(sequence, 0.0)
    }
}

/// A per-word frequency multiplier applied while the index is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyAdjustment {
    pub word: String,
    pub factor: f64,
}

impl FrequencyAdjustment {
    pub fn new(word: impl Into<String>, factor: f64) -> Self {
        Self {
            word: word.into(),
            factor,
        }
    }

    /// `of` and `me` share `69`; tilt that collision toward `of`.
    pub fn defaults() -> Vec<Self> {
        vec![Self::new("of", 3.0), Self::new("me", 0.5)]
    }
}
