// File: src/session.rs
use crate::core::editor::{EditorState, LineEditor, Redraw, Transition};
use crate::core::keymap::{InputEvent, KeyMap};
use std::io;
use tracing::{debug, info};

/// Receives one call per line repaint.
pub trait Renderer {
    fn redraw(&mut self, redraw: &Redraw) -> io::Result<()>;
}

/// Collects redraws in memory.
impl Renderer for Vec<Redraw> {
    fn redraw(&mut self, redraw: &Redraw) -> io::Result<()> {
        self.push(redraw.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Active,
    Finished,
}

/// Drives one editing session: owns the state, feeds events through the
/// line editor one at a time and forwards repaints to the renderer.
pub struct Session<'a, R: Renderer> {
    editor: LineEditor<'a>,
    keymap: &'a KeyMap,
    renderer: R,
    state: EditorState,
    status: SessionStatus,
}

impl<'a, R: Renderer> Session<'a, R> {
    pub fn new(editor: LineEditor<'a>, keymap: &'a KeyMap, renderer: R) -> Self {
        Self {
            editor,
            keymap,
            renderer,
            state: EditorState::new(),
            status: SessionStatus::Active,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Paints the initial, empty line.
    pub fn start(&mut self) -> io::Result<()> {
        info!("session started");
        self.renderer.redraw(&self.state.redraw())
    }

    /// Handles one event. Events after exit are dropped.
    pub fn handle(&mut self, event: &InputEvent) -> io::Result<SessionStatus> {
        if self.status == SessionStatus::Finished {
            return Ok(self.status);
        }
        let Some(action) = self.keymap.resolve(event) else {
            debug!(?event, "ignoring unmapped key");
            return Ok(self.status);
        };

        match self.editor.apply(&mut self.state, action) {
            Transition::Redraw(redraw) => self.renderer.redraw(&redraw)?,
            Transition::Unchanged => {}
            Transition::Exit => {
                info!(committed = %self.state.committed_text(), "session finished");
                self.status = SessionStatus::Finished;
            }
        }
        Ok(self.status)
    }

    /// Feeds events until they run out or the exit key arrives.
    pub fn run<I>(&mut self, events: I) -> io::Result<SessionStatus>
    where
        I: IntoIterator<Item = io::Result<InputEvent>>,
    {
        for event in events {
            if self.handle(&event?)? == SessionStatus::Finished {
                break;
            }
        }
        Ok(self.status)
    }

    pub fn into_parts(self) -> (EditorState, R) {
        (self.state, self.renderer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dictionary::DictionaryIndex;
    use crate::core::keymap::NamedKey;
    use crate::core::keypad::Keypad;
    use crate::core::ranking::CandidateSelector;
    use crate::core::types::FrequencyAdjustment;

    fn events(keys: &str) -> Vec<io::Result<InputEvent>> {
        keys.chars().map(|ch| Ok(InputEvent::char(ch))).collect()
    }

    #[test]
    fn unmapped_keys_do_not_redraw() {
        let keypad = Keypad::upside_down();
        let index = DictionaryIndex::default();
        let keymap = KeyMap::default();
        let editor = LineEditor::new(&keypad, CandidateSelector::new(&index));
        let mut session = Session::new(editor, &keymap, Vec::new());

        session.run(events("qwzx")).unwrap();
        assert!(session.renderer().is_empty());
        assert_eq!(session.status(), SessionStatus::Active);
    }

    #[test]
    fn exit_stops_processing() {
        let keypad = Keypad::upside_down();
        let index = DictionaryIndex::build(
            "in\t80\n".as_bytes(),
            &keypad,
            &FrequencyAdjustment::defaults(),
        )
        .unwrap();
        let keymap = KeyMap::default();
        let editor = LineEditor::new(&keypad, CandidateSelector::new(&index));
        let mut session = Session::new(editor, &keymap, Vec::new());

        session.start().unwrap();
        let mut input = events("uo");
        input.push(Ok(InputEvent::named(NamedKey::Escape)));
        input.extend(events("8 "));
        assert_eq!(session.run(input).unwrap(), SessionStatus::Finished);

        let (state, redraws) = session.into_parts();
        assert_eq!(redraws.len(), 3);
        assert_eq!(redraws[0], Redraw::default());
        assert_eq!(redraws[2].highlighted, "in");
        assert_eq!(state.digit_buffer(), "46");
    }
}
