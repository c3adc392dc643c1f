// File: src/core/editor.rs
use crate::core::keymap::KeyAction;
use crate::core::keypad::Keypad;
use crate::core::ranking::{CandidateSelector, Ranking};
use crate::core::types::{Candidate, Digit};
use tracing::trace;

/// Text to the left of the edit point plus the word being composed.
///
/// `ranking` is present exactly when `digits` is non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditorState {
    committed: String,
    digits: String,
    ranking: Option<Ranking>,
}

impl EditorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn committed_text(&self) -> &str {
        &self.committed
    }

    pub fn digit_buffer(&self) -> &str {
        &self.digits
    }

    pub fn candidates(&self) -> Option<&[Candidate]> {
        self.ranking.as_ref().map(Ranking::candidates)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.ranking.as_ref().map(Ranking::selected_index)
    }

    /// The highlighted word, if a word is being composed.
    pub fn selected_word(&self) -> Option<&str> {
        self.ranking.as_ref().map(|r| r.selected().word.as_str())
    }

    /// What the renderer should show for this state.
    pub fn redraw(&self) -> Redraw {
        Redraw {
            committed: self.committed.clone(),
            highlighted: self.selected_word().unwrap_or_default().to_string(),
            trailing: String::new(),
        }
    }
}

/// One line repaint: committed text, the highlighted candidate, and the
/// text after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Redraw {
    pub committed: String,
    pub highlighted: String,
    pub trailing: String,
}

/// Outcome of applying one key action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// State changed; repaint the line.
    Redraw(Redraw),
    /// Nothing to do.
    Unchanged,
    /// End the session.
    Exit,
}

/// The line-editing transition function.
///
/// Holds only read-only collaborators; all mutable state lives in the
/// `EditorState` passed to `apply`.
#[derive(Debug, Clone, Copy)]
pub struct LineEditor<'a> {
    keypad: &'a Keypad,
    selector: CandidateSelector<'a>,
}

impl<'a> LineEditor<'a> {
    pub fn new(keypad: &'a Keypad, selector: CandidateSelector<'a>) -> Self {
        Self { keypad, selector }
    }

    pub fn apply(&self, state: &mut EditorState, action: KeyAction) -> Transition {
        trace!(?action, digits = %state.digits, "applying key action");
        let changed = match action {
            KeyAction::Digit(digit) => self.push_digit(state, digit),
            KeyAction::Next => cycle(state, Ranking::advance),
            KeyAction::Previous => cycle(state, Ranking::retreat),
            KeyAction::Confirm(ch) => {
                confirm(state, ch);
                true
            }
            KeyAction::Backspace => self.backspace(state),
            KeyAction::Exit => return Transition::Exit,
        };

        if changed {
            Transition::Redraw(state.redraw())
        } else {
            Transition::Unchanged
        }
    }

    fn push_digit(&self, state: &mut EditorState, digit: Digit) -> bool {
        if !Keypad::is_digit(digit) {
            return false;
        }
        state.digits.push(digit);
        self.rerank(state, None);
        true
    }

    fn backspace(&self, state: &mut EditorState) -> bool {
        if state.digits.pop().is_some() {
            self.rerank(state, None);
            return true;
        }
        if state.committed.pop().is_none() {
            return false;
        }
        self.reopen(state);
        true
    }

    /// Pulls the word just left of the edit point back into the digit
    /// buffer, keeping it selected.
    fn reopen(&self, state: &mut EditorState) {
        let run_start = state
            .committed
            .char_indices()
            .rev()
            .take_while(|&(_, ch)| self.keypad.can_encode(ch))
            .last()
            .map(|(i, _)| i);
        let Some(run_start) = run_start else {
            return;
        };

        let Ok(digits) = self.keypad.encode(&state.committed[run_start..]) else {
            return;
        };
        let word = state.committed.split_off(run_start);
        trace!(%word, %digits, "reopening committed word");
        state.digits = digits;
        self.rerank(state, Some(&word));
    }

    fn rerank(&self, state: &mut EditorState, preferred: Option<&str>) {
        state.ranking = if state.digits.is_empty() {
            None
        } else {
            Some(self.selector.rank(&state.digits, preferred))
        };
    }
}

fn cycle(state: &mut EditorState, step: fn(&mut Ranking)) -> bool {
    match state.ranking.as_mut() {
        Some(ranking) => {
            step(ranking);
            true
        }
        None => false,
    }
}

fn confirm(state: &mut EditorState, ch: char) {
    if let Some(ranking) = state.ranking.take() {
        state.committed.push_str(&ranking.selected().word);
    }
    state.committed.push(ch);
    state.digits.clear();
}
