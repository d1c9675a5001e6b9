use hmmtag::{cross_validate, train, Dataset, Sequence, Viterbi};

fn labeled(tokens: &[&str], labels: &[&str]) -> Sequence {
    Sequence::new(tokens.to_vec(), labels.to_vec())
}

#[test]
fn fold_independence() {
    // two disjoint example sets; neither model may see the other's counts
    let fold_a = vec![
        labeled(&["the", "dog", "runs"], &["DET", "NOUN", "VERB"]),
        labeled(&["a", "cat", "sleeps"], &["DET", "NOUN", "VERB"]),
    ];
    let fold_b = vec![labeled(&["bonjour", "monde"], &["INTJ", "NOUN"])];

    let model_a = train(&fold_a);
    let model_b = train(&fold_b);

    assert_eq!(model_a.emission_logp("INTJ", "bonjour"), None);
    assert_eq!(model_b.emission_logp("DET", "the"), None);
    assert_eq!(model_b.transition_logp("DET", "NOUN"), None);
}

#[test]
fn cross_validation_on_a_consistent_corpus() {
    let mut seqs = Vec::new();
    for _ in 0..8 {
        seqs.push(labeled(&["the", "dog", "runs"], &["DET", "NOUN", "VERB"]));
        seqs.push(labeled(&["a", "man", "eats"], &["DET", "NOUN", "VERB"]));
        seqs.push(labeled(&["the", "cat", "sleeps"], &["DET", "NOUN", "VERB"]));
    }
    let ds = Dataset { seqs };
    let report =
        cross_validate(&ds, 4, 33, &Viterbi::default()).expect("cross-validation failed");
    assert_eq!(report.folds.len(), 4);
    // a perfectly regular corpus should tag its held-out folds perfectly
    assert!((report.mean_accuracy - 1.0).abs() < 1e-9);
}

#[test]
fn rejects_degenerate_fold_counts() {
    let ds = Dataset {
        seqs: vec![labeled(&["the"], &["DET"]); 3],
    };
    assert!(cross_validate(&ds, 1, 0, &Viterbi::default()).is_err());
    assert!(cross_validate(&ds, 4, 0, &Viterbi::default()).is_err());
}
