use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::round2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSignal {
    pub label: String,
    pub score: f64,
}

/// Accumulated score per label, remembering the order labels were first seen.
#[derive(Debug, Clone, Default)]
pub struct SignalTally {
    entries: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl SignalTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: &str, amount: f64) {
        match self.index.get(label) {
            Some(&position) => self.entries[position].1 += amount,
            None => {
                self.index.insert(label.to_string(), self.entries.len());
                self.entries.push((label.to_string(), amount));
            }
        }
    }

    pub fn get(&self, label: &str) -> Option<f64> {
        self.index.get(label).map(|&position| self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, score)| score).sum()
    }

    /// Highest totals first; equal totals keep first-seen order.
    pub fn top(&self, limit: usize) -> Vec<RankedSignal> {
        let mut ranked: Vec<&(String, f64)> = self.entries.iter().collect();
        // sort_by is stable, which provides the tie-break.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        ranked
            .into_iter()
            .take(limit)
            .map(|(label, score)| RankedSignal {
                label: label.clone(),
                score: round2(*score),
            })
            .collect()
    }
}
