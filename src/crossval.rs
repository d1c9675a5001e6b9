use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::dataset::{Dataset, Sequence};
use crate::evaluation::Evaluation;
use crate::hmm::{decoder::Viterbi, trainer::train};
use crate::{Error, Result};

/// Seed used by the CLI when none is given.
pub const DEFAULT_SHUFFLE_SEED: u64 = 33;

#[derive(Debug)]
pub struct FoldScore {
    pub fold: usize,
    pub accuracy: f64,
}

#[derive(Debug)]
pub struct CrossValReport {
    pub folds: Vec<FoldScore>,
    pub mean_accuracy: f64,
}

/// K-fold cross-validation over a labeled corpus.
///
/// The corpus is shuffled with a seeded RNG (so runs are reproducible) and
/// dealt round-robin into `k` folds. Each fold is scored by a model trained
/// from scratch on the other k-1 folds; models never share state across
/// folds.
pub fn cross_validate(
    ds: &Dataset,
    k: usize,
    seed: u64,
    decoder: &Viterbi,
) -> Result<CrossValReport> {
    if k < 2 || ds.len() < k {
        return Err(Error::BadFoldCount {
            size: ds.len(),
            folds: k,
        });
    }

    let mut indices: Vec<usize> = (0..ds.len()).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));

    let mut folds: Vec<Vec<usize>> = vec![Vec::new(); k];
    for (i, idx) in indices.into_iter().enumerate() {
        folds[i % k].push(idx);
    }

    let mut scores = Vec::with_capacity(k);
    let mut total = 0.0;
    for fold in 0..k {
        let train_set: Vec<Sequence> = folds
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != fold)
            .flat_map(|(_, idxs)| idxs.iter().map(|&idx| ds.seqs[idx].clone()))
            .collect();
        let model = train(&train_set);

        let mut evaluation = Evaluation::default();
        for &idx in &folds[fold] {
            let seq = &ds.seqs[idx];
            let prediction = decoder.decode(&seq.tokens, &model);
            evaluation.accumulate(&seq.labels, &prediction);
        }
        let est = evaluation.evaluate();
        log::info!("fold {}/{}: token accuracy {:.4}", fold + 1, k, est.accuracy);
        total += est.accuracy;
        scores.push(FoldScore {
            fold,
            accuracy: est.accuracy,
        });
    }

    Ok(CrossValReport {
        folds: scores,
        mean_accuracy: total / k as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Dataset {
        let mut seqs = Vec::new();
        for _ in 0..10 {
            seqs.push(Sequence::new(
                vec!["the", "dog", "runs"],
                vec!["DET", "NOUN", "VERB"],
            ));
            seqs.push(Sequence::new(
                vec!["a", "cat", "sleeps"],
                vec!["DET", "NOUN", "VERB"],
            ));
        }
        Dataset { seqs }
    }

    #[test]
    fn produces_one_score_per_fold() {
        let report = cross_validate(&corpus(), 5, DEFAULT_SHUFFLE_SEED, &Viterbi::default())
            .expect("cross-validation failed");
        assert_eq!(report.folds.len(), 5);
        assert!(report.mean_accuracy > 0.0 && report.mean_accuracy <= 1.0);
    }

    #[test]
    fn same_seed_same_result() {
        let ds = corpus();
        let decoder = Viterbi::default();
        let a = cross_validate(&ds, 4, 7, &decoder).unwrap();
        let b = cross_validate(&ds, 4, 7, &decoder).unwrap();
        assert_eq!(a.mean_accuracy, b.mean_accuracy);
    }

    #[test]
    fn too_many_folds_is_an_error() {
        let ds = Dataset {
            seqs: vec![Sequence::new(vec!["the"], vec!["DET"])],
        };
        assert!(cross_validate(&ds, 5, 0, &Viterbi::default()).is_err());
    }
}
