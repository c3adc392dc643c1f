use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::cursor::MoveToColumn;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use std::fs::File;
use std::io::{self, stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use t9_core::persistence::{is_older_than, load_index, save_index};
use t9_core::{
    CandidateSelector, DictionaryIndex, ImeConfig, InputEvent, KeyMap, Keypad, LineEditor,
    Modifiers, NamedKey, Redraw, Renderer, Session,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "t9_ime",
    version,
    about = "Upside-down T9 predictive text in the terminal"
)]
struct Cli {
    /// Word list with one `word<TAB>frequency` per line
    #[arg(short, long)]
    corpus: Option<PathBuf>,

    /// TOML file overriding the layout, keys and frequency heuristics
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prebuilt index; written after building from the corpus
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Write logs here (the terminal itself is in raw mode)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Print the ranked candidates for a digit sequence as JSON and exit
    #[arg(long, value_name = "DIGITS")]
    lookup: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(path) = &cli.log {
        init_logging(path)?;
    }

    let config = match &cli.config {
        Some(path) => ImeConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ImeConfig::default(),
    };
    let keypad = config.keypad().context("invalid keypad layout")?;
    let keymap = config.keymap().context("invalid key map")?;
    let index = load_dictionary(&cli, &config, &keypad)?;
    let selector = CandidateSelector::new(&index);

    if let Some(sequence) = &cli.lookup {
        if sequence.is_empty() || !sequence.chars().all(Keypad::is_digit) {
            bail!("{sequence:?} is not a sequence of the digits 1-9");
        }
        let ranking = selector.rank(sequence, None);
        println!("{}", serde_json::to_string_pretty(&ranking)?);
        return Ok(());
    }

    print!("{}", banner(&keypad, &keymap));
    stdout().flush()?;

    let editor = LineEditor::new(&keypad, selector);
    let mut session = Session::new(editor, &keymap, TerminalRenderer::new(stdout()));
    {
        let _raw = RawMode::enable()?;
        session.start()?;
        session.run(key_events())?;
    }
    println!();
    info!("exiting");
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_dictionary(cli: &Cli, config: &ImeConfig, keypad: &Keypad) -> Result<DictionaryIndex> {
    if let Some(snapshot) = cli.snapshot.as_deref().filter(|path| path.exists()) {
        let corpus_changed = match cli.corpus.as_deref() {
            Some(corpus) => is_older_than(snapshot, corpus).unwrap_or(true),
            None => false,
        };
        if corpus_changed {
            info!(snapshot = %snapshot.display(), "corpus is newer than snapshot, rebuilding");
        } else {
            match load_index(keypad, &config.adjustments, snapshot) {
                Ok(index) => return Ok(index),
                Err(e) => warn!(error = %e, "ignoring unusable snapshot"),
            }
        }
    }

    let Some(corpus) = &cli.corpus else {
        bail!("no --corpus given and no usable --snapshot");
    };
    let index = DictionaryIndex::from_path(corpus, keypad, &config.adjustments)
        .with_context(|| format!("failed to build dictionary from {}", corpus.display()))?;

    if let Some(snapshot) = &cli.snapshot {
        save_index(&index, keypad, &config.adjustments, snapshot)
            .with_context(|| format!("failed to write snapshot {}", snapshot.display()))?;
    }
    Ok(index)
}

/// The keypad grid as it sits on a number pad, plus the fallback keys.
fn banner(keypad: &Keypad, keymap: &KeyMap) -> String {
    const ROWS: [[char; 3]; 3] = [['7', '8', '9'], ['4', '5', '6'], ['1', '2', '3']];

    let mut out = String::from("Upside-down T9 IME\n\n");
    for row in ROWS {
        let digits: String = row.iter().map(|d| format!("{d:^6}")).collect();
        let letters: String = row.iter().map(|&d| format!("{:^6}", keypad.letters(d))).collect();
        out.push_str(&format!("{}\n{}\n\n", digits.trim_end(), letters.trim_end()));
    }

    let aliases: Vec<String> = ROWS
        .iter()
        .map(|row| {
            let keys: String = row
                .iter()
                .map(|&d| keymap.keys_for(d).find(|&k| k != d).unwrap_or(d))
                .collect();
            let digits: String = row.iter().collect();
            format!("'{keys}' for {digits}")
        })
        .collect();
    out.push_str("If you have no number pad, you can use\n");
    out.push_str(&aliases.join(" and\n"));
    out.push_str("\n\n+/- or arrows cycle candidates, punctuation or space confirms,\n");
    out.push_str("Backspace reopens the last word, Esc quits.\n\n");
    out
}

/// Repaints the current terminal line.
struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn redraw(&mut self, redraw: &Redraw) -> io::Result<()> {
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(&redraw.committed),
            SetAttribute(Attribute::Reverse),
            Print(&redraw.highlighted),
            SetAttribute(Attribute::Reset),
            Print(&redraw.trailing),
        )?;
        self.out.flush()
    }
}

struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Blocks on the terminal and yields key presses the core understands.
fn key_events() -> impl Iterator<Item = io::Result<InputEvent>> {
    std::iter::from_fn(|| loop {
        match event::read() {
            Ok(Event::Key(key)) => {
                if let Some(event) = to_input_event(key) {
                    return Some(Ok(event));
                }
            }
            Ok(_) => {}
            Err(e) => return Some(Err(e)),
        }
    })
}

fn to_input_event(key: KeyEvent) -> Option<InputEvent> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let modifiers = Modifiers {
        ctrl: key.modifiers.contains(KeyModifiers::CONTROL),
        alt: key.modifiers.contains(KeyModifiers::ALT),
    };
    let (ch, named) = match key.code {
        KeyCode::Char(c) => (Some(c), None),
        KeyCode::Backspace => (None, Some(NamedKey::Backspace)),
        KeyCode::Enter => (None, Some(NamedKey::Enter)),
        KeyCode::Esc => (None, Some(NamedKey::Escape)),
        KeyCode::Tab => (None, Some(NamedKey::Tab)),
        KeyCode::Left => (None, Some(NamedKey::Left)),
        KeyCode::Right => (None, Some(NamedKey::Right)),
        KeyCode::Up => (None, Some(NamedKey::Up)),
        KeyCode::Down => (None, Some(NamedKey::Down)),
        _ => return None,
    };
    Some(InputEvent {
        ch,
        key: named,
        modifiers,
    })
}
