use std::collections::HashMap;

use super::model::{HmmModel, LogProbTable};
use super::START_LABEL;
use crate::dataset::Sequence;

type CountTable = HashMap<String, HashMap<String, u64>>;

/// Estimates transition and emission probabilities from labeled examples.
///
/// Each well-formed example contributes one transition count from the start
/// label to its first label, one transition count per adjacent label pair,
/// and one emission count per (label, lowercased token) position. Counts
/// are aggregated over the whole corpus first and normalized to log
/// probabilities in a single pass at the end. Examples whose token and
/// label lengths disagree are skipped with a diagnostic.
pub fn train(examples: &[Sequence]) -> HmmModel {
    let mut transition_counts = CountTable::new();
    let mut emission_counts = CountTable::new();

    for (i, seq) in examples.iter().enumerate() {
        if seq.tokens.len() != seq.labels.len() {
            log::warn!(
                "example {}: {} tokens vs {} labels, skipping",
                i,
                seq.tokens.len(),
                seq.labels.len()
            );
            continue;
        }
        if seq.is_empty() {
            continue;
        }

        add_count(&mut transition_counts, START_LABEL, &seq.labels[0]);
        add_count(
            &mut emission_counts,
            &seq.labels[0],
            &seq.tokens[0].to_lowercase(),
        );
        for j in 1..seq.len() {
            add_count(&mut transition_counts, &seq.labels[j - 1], &seq.labels[j]);
            add_count(
                &mut emission_counts,
                &seq.labels[j],
                &seq.tokens[j].to_lowercase(),
            );
        }
    }

    HmmModel::new(
        to_log_probs(transition_counts),
        to_log_probs(emission_counts),
    )
}

fn add_count(counts: &mut CountTable, key: &str, subkey: &str) {
    *counts
        .entry(key.to_string())
        .or_default()
        .entry(subkey.to_string())
        .or_insert(0) += 1;
}

/// Normalizes each nested count map independently: every count under a
/// source key is divided by that key's total, then moved to log space.
/// Only observed successors get entries; nothing is smoothed in.
fn to_log_probs(counts: CountTable) -> LogProbTable {
    counts
        .into_iter()
        .map(|(src, inner)| {
            let total: u64 = inner.values().sum();
            let probs = inner
                .into_iter()
                .map(|(dst, n)| (dst, (n as f64 / total as f64).ln()))
                .collect();
            (src, probs)
        })
        .collect()
}
