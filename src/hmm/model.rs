use std::collections::HashMap;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Sparse table from a source key to its observed successors and their
/// natural-log probabilities. A missing entry means the pair was never
/// observed in training, not that its probability is zero.
pub type LogProbTable = HashMap<String, HashMap<String, f64>>;

/// A trained first-order HMM: transition probabilities between labels and
/// emission probabilities from labels to tokens, both in log space.
///
/// The tables are fixed at construction; training always produces a fresh
/// model value, so a model already in use by a decoder is never mutated.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct HmmModel {
    transitions: LogProbTable,
    emissions: LogProbTable,
}

impl HmmModel {
    pub(crate) fn new(transitions: LogProbTable, emissions: LogProbTable) -> Self {
        Self {
            transitions,
            emissions,
        }
    }

    /// Log-probability of moving from `from` to `to`, if that transition
    /// was observed in training.
    pub fn transition_logp(&self, from: &str, to: &str) -> Option<f64> {
        self.transitions.get(from).and_then(|m| m.get(to)).copied()
    }

    /// Log-probability of `label` emitting `token`, if that pair was
    /// observed in training.
    pub fn emission_logp(&self, label: &str, token: &str) -> Option<f64> {
        self.emissions.get(label).and_then(|m| m.get(token)).copied()
    }

    /// All successors recorded for a source label, or `None` if the label
    /// was never seen as a transition source.
    pub fn transitions_from(&self, from: &str) -> Option<&HashMap<String, f64>> {
        self.transitions.get(from)
    }

    pub fn transitions(&self) -> &LogProbTable {
        &self.transitions
    }

    pub fn emissions(&self) -> &LogProbTable {
        &self.emissions
    }

    /// Number of emitting labels (the start label does not emit).
    pub fn num_labels(&self) -> usize {
        self.emissions.len()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let model = serde_json::from_reader(BufReader::new(file))?;
        Ok(model)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer(BufWriter::new(file), self)?;
        Ok(())
    }
}

impl Display for HmmModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Transition probabilities:")?;
        for (src, successors) in &self.transitions {
            for (dst, logp) in successors {
                writeln!(f, "\t{} -> {}: {:.6}", src, dst, logp)?;
            }
        }
        writeln!(f, "Emission probabilities:")?;
        for (label, tokens) in &self.emissions {
            for (token, logp) in tokens {
                writeln!(f, "\t{} -> {}: {:.6}", label, token, logp)?;
            }
        }
        Ok(())
    }
}
