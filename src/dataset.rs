use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::{Error, Result};

/// One labeled example: a sentence and its parallel tag sequence.
///
/// The two sides are expected to have equal length; a mismatched pair is
/// kept in the dataset and skipped by the trainer with a diagnostic.
#[derive(Debug, Clone, Default)]
pub struct Sequence {
    pub tokens: Vec<String>,
    pub labels: Vec<String>,
}

impl Sequence {
    pub fn new<T: Into<String>, L: Into<String>>(tokens: Vec<T>, labels: Vec<L>) -> Self {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, token: String, label: String) {
        self.tokens.push(token);
        self.labels.push(label);
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

/// A labeled corpus: one sentence per line, whitespace-delimited tokens,
/// with a parallel tag file of the same line count.
#[derive(Debug, Default)]
pub struct Dataset {
    pub seqs: Vec<Sequence>,
}

impl Dataset {
    /// Reads a sentence file and its parallel tag file. Tokens are kept as
    /// written; case-folding happens in the trainer and decoder so that both
    /// sides of the pipeline normalize identically.
    pub fn from_files<P: AsRef<Path>>(sentence_path: P, tag_path: P) -> Result<Self> {
        let sentences = read_lines(sentence_path.as_ref())?;
        let tags = read_lines(tag_path.as_ref())?;
        Self::from_lines(&sentences, &tags)
    }

    pub fn from_lines<S: AsRef<str>, T: AsRef<str>>(sentences: &[S], tags: &[T]) -> Result<Self> {
        if sentences.len() != tags.len() {
            return Err(Error::CorpusMismatch {
                sentences: sentences.len(),
                tags: tags.len(),
            });
        }
        let mut seqs = Vec::with_capacity(sentences.len());
        for (sentence, tag_line) in sentences.iter().zip(tags) {
            let seq = Sequence {
                tokens: sentence
                    .as_ref()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect(),
                labels: tag_line
                    .as_ref()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect(),
            };
            if seq.is_empty() && seq.labels.is_empty() {
                continue;
            }
            seqs.push(seq);
        }
        Ok(Self { seqs })
    }

    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    pub fn max_seq_length(&self) -> usize {
        self.seqs.iter().map(|x| x.len()).max().unwrap_or_default()
    }

    pub fn total_tokens(&self) -> usize {
        self.seqs.iter().map(|x| x.len()).sum()
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let mut lines = Vec::new();
    for line in BufReader::new(file).lines() {
        lines.push(line?);
    }
    Ok(lines)
}
