use std::collections::BTreeMap;

use super::model::HmmModel;
use super::START_LABEL;

/// Log-space score substituted when a label never emitted a token in
/// training: strongly unlikely, but never impossible, so decoding cannot
/// dead-end on an unknown word.
pub const DEFAULT_UNSEEN_PENALTY: f64 = -10.0;

/// Viterbi decoder over a trained [`HmmModel`].
///
/// The decoder itself carries only configuration; all working state (the
/// frontier of live labels and the per-position backpointers) is local to
/// one `decode` call and discarded after the path is reconstructed, so a
/// single instance can serve any number of calls, concurrently if needed.
#[derive(Debug, Clone, Copy)]
pub struct Viterbi {
    unseen_penalty: f64,
}

impl Default for Viterbi {
    fn default() -> Self {
        Self {
            unseen_penalty: DEFAULT_UNSEEN_PENALTY,
        }
    }
}

impl Viterbi {
    pub fn new(unseen_penalty: f64) -> Self {
        Self { unseen_penalty }
    }

    /// Finds the maximum-likelihood label sequence for `tokens`.
    ///
    /// Returns exactly one label per token, or an empty vector when no
    /// path survives (empty input, or a model with no labels at all).
    /// Tokens are case-folded into a fresh buffer; the caller's slice is
    /// never modified. Runs in O(N·S²) for N tokens and S live labels,
    /// keeping the full frontier at every position.
    pub fn decode<S: AsRef<str>>(&self, tokens: &[S], model: &HmmModel) -> Vec<String> {
        let tokens: Vec<String> = tokens.iter().map(|t| t.as_ref().to_lowercase()).collect();

        // per-position map from label to the predecessor that produced its
        // best score; ordered maps keep tie-breaks repeatable across calls
        let mut backpointers: Vec<BTreeMap<String, String>> = Vec::with_capacity(tokens.len());

        let mut curr_scores: BTreeMap<String, f64> = BTreeMap::new();
        curr_scores.insert(START_LABEL.to_string(), 0.0);

        for token in &tokens {
            let mut next_scores: BTreeMap<String, f64> = BTreeMap::new();
            let mut preds: BTreeMap<String, String> = BTreeMap::new();

            for (curr, &score) in &curr_scores {
                let transitions = match model.transitions_from(curr) {
                    Some(t) => t,
                    None => continue,
                };
                for (next, &trans) in transitions {
                    let emit = model
                        .emission_logp(next, token)
                        .unwrap_or(self.unseen_penalty);
                    let candidate = score + trans + emit;
                    // strict >, so on an exact tie the first source label in
                    // frontier order (sorted) keeps the slot
                    if next_scores.get(next).map_or(true, |&best| candidate > best) {
                        next_scores.insert(next.clone(), candidate);
                        preds.insert(next.clone(), curr.clone());
                    }
                }
            }

            // labels with no incoming transition are pruned here, not
            // carried forward at zero score
            backpointers.push(preds);
            curr_scores = next_scores;
        }

        let mut best_state: Option<&String> = None;
        let mut best_score = f64::NEG_INFINITY;
        for (label, &score) in &curr_scores {
            if score > best_score {
                best_score = score;
                best_state = Some(label);
            }
        }
        let mut state = match best_state {
            Some(s) if !tokens.is_empty() => s.clone(),
            _ => {
                log::warn!("no viable path for {}-token input", tokens.len());
                return Vec::new();
            }
        };

        // trace the backward links; position 0 points at the start label,
        // which is internal and never emitted
        let mut labels = vec![String::new(); tokens.len()];
        for (i, preds) in backpointers.iter().enumerate().rev() {
            labels[i] = state.clone();
            state = preds[&state].clone();
        }
        labels
    }
}
