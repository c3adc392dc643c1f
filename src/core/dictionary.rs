// File: src/core/dictionary.rs
use crate::core::keypad::Keypad;
use crate::core::types::{Candidate, FrequencyAdjustment};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Words bucketed by digit sequence.
///
/// Buckets keep corpus order; ranking is the selector's job. The index is
/// never mutated after it is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DictionaryIndex {
    entries: HashMap<String, Vec<Candidate>>,
    word_count: usize,
}

impl DictionaryIndex {
    /// Builds the index from `word<TAB>frequency` lines.
    ///
    /// Lines without a usable frequency are skipped. A word with a character
    /// the keypad cannot encode aborts the build.
    pub fn build<R: BufRead>(
        reader: R,
        keypad: &Keypad,
        adjustments: &[FrequencyAdjustment],
    ) -> Result<Self> {
        let mut index = Self::default();
        let mut skipped = 0usize;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let Some((word, frequency)) = parse_record(&line) else {
                if !line.trim().is_empty() {
                    debug!(line = line_no + 1, "skipping malformed corpus record");
                    skipped += 1;
                }
                continue;
            };

            let frequency = adjusted_frequency(word, frequency, adjustments);
            let sequence = keypad.encode(word)?;
            index
                .entries
                .entry(sequence)
                .or_default()
                .push(Candidate::new(word, frequency));
            index.word_count += 1;
        }

        info!(
            words = index.word_count,
            sequences = index.entries.len(),
            skipped,
            "dictionary index built"
        );
        Ok(index)
    }

    pub fn from_path(
        path: &Path,
        keypad: &Keypad,
        adjustments: &[FrequencyAdjustment],
    ) -> Result<Self> {
        let file = File::open(path)?;
        Self::build(BufReader::new(file), keypad, adjustments)
    }

    /// The words for `sequence` in corpus order, empty if there are none.
    pub fn lookup(&self, sequence: &str) -> &[Candidate] {
        self.entries
            .get(sequence)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct digit sequences.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

fn parse_record(line: &str) -> Option<(&str, f64)> {
    let (word, frequency) = line.trim_end_matches(['\r', '\n']).split_once('\t')?;
    let word = word.trim();
    if word.is_empty() {
        return None;
    }
    let frequency: f64 = frequency.trim().parse().ok()?;
    if !frequency.is_finite() || frequency < 0.0 {
        return None;
    }
    Some((word, frequency))
}

fn adjusted_frequency(word: &str, frequency: f64, adjustments: &[FrequencyAdjustment]) -> f64 {
    adjustments
        .iter()
        .find(|adjustment| adjustment.word == word)
        .map_or(frequency, |adjustment| frequency * adjustment.factor)
}
