//! The user's chosen ingredient terms.

use crate::constants::{COMMON_INGREDIENTS, MAX_SUGGESTIONS};

/// Insertion-ordered lowercase ingredient terms without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    terms: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection by adding each term in order.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Self::new();
        for term in terms {
            selection.add(term.as_ref());
        }
        selection
    }

    /// Add a term, trimmed and lowercased.
    ///
    /// Returns `false` when the term is blank or already selected.
    pub fn add(&mut self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() || self.contains(&term) {
            return false;
        }
        self.terms.push(term);
        true
    }

    /// Remove an exact term. Returns `false` when it was not selected.
    pub fn remove(&mut self, term: &str) -> bool {
        let before = self.terms.len();
        self.terms.retain(|t| t != term);
        self.terms.len() != before
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Popular ingredients not yet selected, at most [`MAX_SUGGESTIONS`].
    pub fn suggestions(&self) -> Vec<&'static str> {
        COMMON_INGREDIENTS
            .iter()
            .copied()
            .filter(|i| !self.contains(i))
            .take(MAX_SUGGESTIONS)
            .collect()
    }
}
