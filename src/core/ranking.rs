// File: src/core/ranking.rs
use crate::core::dictionary::DictionaryIndex;
use crate::core::types::Candidate;
use serde::Serialize;

/// Ranked candidates for one digit sequence plus the current selection.
///
/// Never empty: the literal digits always close the list, so `selected`
/// is always a valid index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranking {
    candidates: Vec<Candidate>,
    selected: usize,
}

impl Ranking {
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &Candidate {
        &self.candidates[self.selected]
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Moves to the next candidate, wrapping past the literal.
    pub fn advance(&mut self) {
        self.selected = (self.selected + 1) % self.candidates.len();
    }

    /// Moves to the previous candidate, wrapping to the literal.
    pub fn retreat(&mut self) {
        let len = self.candidates.len();
        self.selected = (self.selected + len - 1) % len;
    }
}

/// Turns index buckets into ranked, fallback-terminated candidate lists.
#[derive(Debug, Clone, Copy)]
pub struct CandidateSelector<'a> {
    index: &'a DictionaryIndex,
}

impl<'a> CandidateSelector<'a> {
    pub fn new(index: &'a DictionaryIndex) -> Self {
        Self { index }
    }

    /// Ranks the words for `sequence` by descending frequency and appends
    /// the literal digits.
    ///
    /// Equal frequencies keep corpus order. When `preferred` names one of
    /// the candidates it starts selected, otherwise the top word does.
    pub fn rank(&self, sequence: &str, preferred: Option<&str>) -> Ranking {
        let mut candidates = self.index.lookup(sequence).to_vec();
        // sort_by is stable
        candidates.sort_by(|a, b| b.frequency.total_cmp(&a.frequency));
        candidates.push(Candidate::literal(sequence));

        let selected = preferred
            .and_then(|word| candidates.iter().position(|c| c.word == word))
            .unwrap_or(0);

        Ranking {
            candidates,
            selected,
        }
    }
}
