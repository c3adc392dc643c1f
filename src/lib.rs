// src/lib.rs
//! Upside-down T9 predictive text: a dictionary index keyed by digit
//! sequences, a candidate ranker, and a line-editing state machine driven
//! one key event at a time.

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod session;

pub use crate::config::ImeConfig;
pub use crate::core::dictionary::DictionaryIndex;
pub use crate::core::editor::{EditorState, LineEditor, Redraw, Transition};
pub use crate::core::keymap::{InputEvent, KeyAction, KeyMap, Modifiers, NamedKey};
pub use crate::core::keypad::Keypad;
pub use crate::core::ranking::{CandidateSelector, Ranking};
pub use crate::core::types::{Candidate, FrequencyAdjustment};
pub use crate::error::{ImeError, Result};
pub use crate::session::{Renderer, Session, SessionStatus};
