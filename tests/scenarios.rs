//! End-to-end sessions over a small corpus, driven through the key map the
//! way the terminal binary drives them.

use t9_core::{
    CandidateSelector, DictionaryIndex, FrequencyAdjustment, InputEvent, KeyMap, Keypad,
    LineEditor, NamedKey, Redraw, Session, SessionStatus,
};

const CORPUS: &str = "\
the\t500
in\t80
go\t50
cat\t20
act\t60
of\t40
me\t100
this line has no frequency
hello\t12
";

fn build(keypad: &Keypad) -> DictionaryIndex {
    DictionaryIndex::build(CORPUS.as_bytes(), keypad, &FrequencyAdjustment::defaults()).unwrap()
}

fn press(session: &mut Session<'_, Vec<Redraw>>, keys: &str) {
    for ch in keys.chars() {
        session.handle(&InputEvent::char(ch)).unwrap();
    }
}

fn backspace(session: &mut Session<'_, Vec<Redraw>>) {
    session.handle(&InputEvent::named(NamedKey::Backspace)).unwrap();
}

#[test]
fn scenario_a_ranking_and_cycling() {
    let keypad = Keypad::upside_down();
    let index = build(&keypad);
    let keymap = KeyMap::default();
    let selector = CandidateSelector::new(&index);

    let sequence = keypad.encode("go").unwrap();
    assert_eq!(sequence, keypad.encode("in").unwrap());

    let ranking = selector.rank(&sequence, None);
    let words: Vec<&str> = ranking.candidates().iter().map(|c| c.word.as_str()).collect();
    assert_eq!(words, ["in", "go", sequence.as_str()]);

    let mut session = Session::new(LineEditor::new(&keypad, selector), &keymap, Vec::new());
    press(&mut session, &sequence);
    press(&mut session, "+");
    assert_eq!(session.state().selected_word(), Some("go"));

    let mut session = Session::new(LineEditor::new(&keypad, selector), &keymap, Vec::new());
    press(&mut session, &sequence);
    press(&mut session, "-");
    assert_eq!(session.state().selected_word(), Some(sequence.as_str()));
}

#[test]
fn scenario_b_backspace_reopens_the_confirmed_word() {
    let keypad = Keypad::upside_down();
    let index = build(&keypad);
    let keymap = KeyMap::default();
    let editor = LineEditor::new(&keypad, CandidateSelector::new(&index));
    let mut session = Session::new(editor, &keymap, Vec::new());

    // "cat" ranks below "act" on 882
    press(&mut session, "882+ ");
    assert_eq!(session.state().committed_text(), "cat ");

    backspace(&mut session);
    assert_eq!(session.state().committed_text(), "");
    assert_eq!(session.state().digit_buffer(), keypad.encode("cat").unwrap());
    assert_eq!(session.state().selected_word(), Some("cat"));

    backspace(&mut session);
    assert_eq!(session.state().digit_buffer(), "88");
    backspace(&mut session);
    backspace(&mut session);
    assert_eq!(session.state().digit_buffer(), "");
    assert_eq!(session.state().candidates(), None);

    let redraws = session.renderer();
    assert_eq!(
        redraws.last(),
        Some(&Redraw {
            committed: String::new(),
            highlighted: String::new(),
            trailing: String::new(),
        })
    );
}

#[test]
fn scenario_c_punctuation_commits_the_selection() {
    let keypad = Keypad::upside_down();
    let index = build(&keypad);
    let keymap = KeyMap::default();
    let editor = LineEditor::new(&keypad, CandidateSelector::new(&index));
    let mut session = Session::new(editor, &keymap, Vec::new());

    // no-numpad aliases: u=4, o=6
    press(&mut session, "uo+,");
    assert_eq!(session.state().committed_text(), "go,");
    assert_eq!(session.state().digit_buffer(), "");
    assert_eq!(session.state().candidates(), None);

    press(&mut session, "777.");
    assert_eq!(session.state().committed_text(), "go,777.");
}

#[test]
fn frequency_heuristics_reorder_the_collision() {
    let keypad = Keypad::upside_down();
    let index = build(&keypad);
    let ranking = CandidateSelector::new(&index).rank("69", None);
    let ranked: Vec<(&str, f64)> = ranking
        .candidates()
        .iter()
        .map(|c| (c.word.as_str(), c.frequency))
        .collect();
    assert_eq!(ranked, [("of", 120.0), ("me", 50.0), ("69", 0.0)]);
    assert_eq!(index.lookup("249")[0].frequency, 500.0);
}

#[test]
fn malformed_line_never_reaches_the_index() {
    let keypad = Keypad::upside_down();
    let index = build(&keypad);
    assert_eq!(index.word_count(), 8);
    assert!(index.lookup(&keypad.encode("hello").unwrap())[0].word == "hello");
}

#[test]
fn every_sequence_ends_with_its_literal() {
    let keypad = Keypad::upside_down();
    let index = build(&keypad);
    let selector = CandidateSelector::new(&index);
    for sequence in ["1", "46", "882", "7", "123456789", "249"] {
        let ranking = selector.rank(sequence, None);
        let last = ranking.candidates().last().unwrap();
        assert_eq!((last.word.as_str(), last.frequency), (sequence, 0.0));

        let body = &ranking.candidates()[..ranking.len() - 1];
        assert!(body.windows(2).all(|w| w[0].frequency >= w[1].frequency));
    }
}

#[test]
fn arbitrary_key_mash_keeps_state_consistent() {
    let keypad = Keypad::upside_down();
    let index = build(&keypad);
    let keymap = KeyMap::default();
    let editor = LineEditor::new(&keypad, CandidateSelector::new(&index));
    let mut session = Session::new(editor, &keymap, Vec::new());

    let keys = "--++4-6+ 8x8,2+++-.?  q77+-";
    for (i, ch) in keys.chars().enumerate() {
        session.handle(&InputEvent::char(ch)).unwrap();
        if i % 3 == 0 {
            backspace(&mut session);
        }
        let state = session.state();
        assert!(state.digit_buffer().chars().all(Keypad::is_digit));
        match (state.candidates(), state.selected_index()) {
            (Some(candidates), Some(selected)) => {
                assert!(!state.digit_buffer().is_empty());
                assert!(selected < candidates.len());
                assert_eq!(candidates.last().unwrap().word, state.digit_buffer());
            }
            (None, None) => assert!(state.digit_buffer().is_empty()),
            other => panic!("inconsistent selection {other:?}"),
        }
    }

    for _ in 0..40 {
        backspace(&mut session);
    }
    assert_eq!(session.state().committed_text(), "");
    assert_eq!(session.state().digit_buffer(), "");
    assert_eq!(session.status(), SessionStatus::Active);
}
