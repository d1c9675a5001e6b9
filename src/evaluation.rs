use std::{collections::HashMap, fmt::Display};

/// Label-wise performance values.
#[derive(Debug, Default)]
struct LabelMeasure {
    /// Number of correct predictions.
    num_correct: usize,
    /** Number of occurrences of the label in the gold-standard data. */
    num_observation: usize,
    /** Number of predictions. */
    num_prediction: usize,
    /** Precision. */
    precision: f64,
    /** Recall. */
    recall: f64,
    /** F1 score. */
    fmeasure: f64,
}

/// Scores predicted tag sequences against gold tag sequences.
///
/// Feed one sentence at a time with [`accumulate`](Self::accumulate), then
/// call [`evaluate`](Self::evaluate) to finalize the token-level accuracy,
/// the sentence-level accuracy and the per-label precision/recall/F1.
/// A prediction shorter than its reference (the decoder's no-viable-path
/// case) counts every uncovered token as wrong.
#[derive(Debug, Default)]
pub struct Evaluation {
    /** Label-wise evaluations. */
    tbl: HashMap<String, LabelMeasure>,

    /** Number of correctly predicted tokens. */
    item_total_correct: usize,
    /** Total number of tokens. */
    item_total_num: usize,
    /** Token-level accuracy. */
    item_accuracy: f64,

    /** Number of fully correctly tagged sentences. */
    inst_total_correct: usize,
    /** Total number of sentences. */
    inst_total_num: usize,
    /** Sentence-level accuracy. */
    inst_accuracy: f64,

    /** Macro-averaged precision. */
    macro_precision: f64,
    /** Macro-averaged recall. */
    macro_recall: f64,
    /** Macro-averaged F1 score. */
    macro_fmeasure: f64,
}

#[derive(Debug)]
pub struct Estimation {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
}

impl Evaluation {
    pub fn accumulate<S: AsRef<str>>(&mut self, reference: &[String], prediction: &[S]) {
        let mut matched = 0;
        for (j, r) in reference.iter().enumerate() {
            self.tbl.entry(r.to_string()).or_default().num_observation += 1;
            if let Some(p) = prediction.get(j) {
                let p: &str = p.as_ref();
                self.tbl.entry(p.to_string()).or_default().num_prediction += 1;
                if r == p {
                    self.tbl.entry(r.to_string()).or_default().num_correct += 1;
                    matched += 1;
                }
            }
            self.item_total_num += 1;
        }

        if matched == reference.len() {
            self.inst_total_correct += 1;
        }
        self.inst_total_num += 1;
    }

    pub fn evaluate(&mut self) -> Estimation {
        let mut num_labels = 0;
        for lev in self.tbl.values_mut() {
            if lev.num_observation == 0 {
                continue;
            }
            num_labels += 1;
            self.item_total_correct += lev.num_correct;

            lev.precision = 0.0;
            lev.recall = 0.0;
            lev.fmeasure = 0.0;

            if lev.num_prediction > 0 {
                lev.precision = lev.num_correct as f64 / lev.num_prediction as f64;
            }
            if lev.num_observation > 0 {
                lev.recall = lev.num_correct as f64 / lev.num_observation as f64;
            }
            if lev.precision + lev.recall > 0.0 {
                lev.fmeasure = lev.precision * lev.recall * 2.0 / (lev.precision + lev.recall);
            }
            self.macro_precision += lev.precision;
            self.macro_recall += lev.recall;
            self.macro_fmeasure += lev.fmeasure;
        }

        if num_labels > 0 {
            self.macro_precision /= num_labels as f64;
            self.macro_recall /= num_labels as f64;
            self.macro_fmeasure /= num_labels as f64;
        }

        if self.item_total_num > 0 {
            self.item_accuracy = self.item_total_correct as f64 / self.item_total_num as f64;
        }
        if self.inst_total_num > 0 {
            self.inst_accuracy = self.inst_total_correct as f64 / self.inst_total_num as f64;
        }
        Estimation {
            accuracy: self.item_accuracy,
            precision: self.macro_precision,
            recall: self.macro_recall,
        }
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Performance by label (#match, #model, #ref) (precision, recall, F1):"
        )?;
        for (label, lev) in &self.tbl {
            if lev.num_observation == 0 {
                writeln!(
                    f,
                    "\t{}: ({}, {}, {}) (******, ******, ******)",
                    label, lev.num_correct, lev.num_prediction, lev.num_observation
                )?;
            } else {
                writeln!(
                    f,
                    "\t{}: ({}, {}, {}) ({:.4}, {:.4}, {:.4})",
                    label,
                    lev.num_correct,
                    lev.num_prediction,
                    lev.num_observation,
                    lev.precision,
                    lev.recall,
                    lev.fmeasure
                )?;
            }
        }
        writeln!(
            f,
            "Macro-average precision, recall, F1: ({:.4}, {:.4}, {:.4})",
            self.macro_precision, self.macro_recall, self.macro_fmeasure
        )?;
        writeln!(
            f,
            "Token accuracy: {}/{} => {:.4}",
            self.item_total_correct, self.item_total_num, self.item_accuracy
        )?;
        writeln!(
            f,
            "Sentence accuracy: {}/{} => {:.4}",
            self.inst_total_correct, self.inst_total_num, self.inst_accuracy
        )
    }
}
