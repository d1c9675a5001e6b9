//! Hidden Markov model part-of-speech tagger.
//!
//! Training counts label-to-label transitions and label-to-token emissions
//! over a labeled corpus and normalizes them into log-space probability
//! tables ([`HmmModel`]). Decoding runs the Viterbi algorithm over those
//! tables to recover the maximum-likelihood tag sequence for a new sentence.
//!
//! ```
//! use hmmtag::{train, Sequence, Viterbi};
//!
//! let examples = vec![
//!     Sequence::new(vec!["the", "dog", "runs"], vec!["DET", "NOUN", "VERB"]),
//!     Sequence::new(vec!["the", "dog", "runs"], vec!["DET", "NOUN", "VERB"]),
//! ];
//! let model = train(&examples);
//! let tags = Viterbi::default().decode(&["the", "dog", "runs"], &model);
//! assert_eq!(tags, ["DET", "NOUN", "VERB"]);
//! ```

pub mod crossval;
pub mod dataset;
pub mod evaluation;
pub mod hmm;

pub use crossval::{cross_validate, CrossValReport};
pub use dataset::{Dataset, Sequence};
pub use evaluation::{Estimation, Evaluation};
pub use hmm::decoder::{Viterbi, DEFAULT_UNSEEN_PENALTY};
pub use hmm::model::HmmModel;
pub use hmm::trainer::train;
pub use hmm::START_LABEL;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid model: {0}")]
    InvalidModel(#[from] serde_json::Error),
    #[error("corpus mismatch: {sentences} sentence lines vs {tags} tag lines")]
    CorpusMismatch { sentences: usize, tags: usize },
    #[error("cannot split {size} sequences into {folds} folds")]
    BadFoldCount { size: usize, folds: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
