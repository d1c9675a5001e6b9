use hmmtag::{train, HmmModel, Sequence, Viterbi, START_LABEL};

fn corpus() -> Vec<Sequence> {
    vec![
        Sequence::new(vec!["the", "dog", "runs"], vec!["DET", "NOUN", "VERB"]),
        Sequence::new(vec!["the", "dog", "runs"], vec!["DET", "NOUN", "VERB"]),
        Sequence::new(vec!["a", "cat", "sleeps"], vec!["DET", "NOUN", "VERB"]),
        Sequence::new(vec!["the", "man", "eats", "food"], vec!["DET", "NOUN", "VERB", "NOUN"]),
    ]
}

#[test]
fn known_sequence_recovery() {
    let model = train(&corpus());
    let tags = Viterbi::default().decode(&["the", "dog", "runs"], &model);
    assert_eq!(tags, ["DET", "NOUN", "VERB"]);
}

#[test]
fn length_preservation() {
    let model = train(&corpus());
    let decoder = Viterbi::default();
    for sentence in [
        vec!["the"],
        vec!["a", "dog"],
        vec!["the", "cat", "eats", "food"],
        vec!["completely", "novel", "words", "in", "every", "position"],
    ]
    .iter()
    {
        let tags = decoder.decode(sentence, &model);
        assert_eq!(tags.len(), sentence.len(), "{:?}", sentence);
    }
}

#[test]
fn unseen_token_robustness() {
    let model = train(&corpus());
    let tags = Viterbi::default().decode(&["a", "zyzzyva", "sleeps"], &model);
    assert_eq!(tags.len(), 3);
    assert_eq!(tags[1], "NOUN");
}

#[test]
fn decode_is_deterministic() {
    let model = train(&corpus());
    let decoder = Viterbi::default();
    let sentence = ["the", "unknown", "cat", "runs"];
    let first = decoder.decode(&sentence, &model);
    for _ in 0..20 {
        assert_eq!(decoder.decode(&sentence, &model), first);
    }
}

#[test]
fn tied_frontier_decodes_identically_on_repeat() {
    // two labels reach exactly the same score on an unseen first token;
    // the winner must not drift between calls
    let model = train(&[
        Sequence::new(vec!["x", "a"], vec!["A", "C"]),
        Sequence::new(vec!["y", "a"], vec!["B", "C"]),
    ]);
    let decoder = Viterbi::default();
    let first = decoder.decode(&["z", "a"], &model);
    assert_eq!(first[1], "C");
    for _ in 0..200 {
        assert_eq!(decoder.decode(&["z", "a"], &model), first);
    }
}

#[test]
fn start_label_exclusion() {
    let model = train(&corpus());
    let decoder = Viterbi::default();
    for sentence in [
        vec!["the", "dog", "runs"],
        vec!["x", "y", "z"],
        vec!["food"],
    ]
    .iter()
    {
        let tags = decoder.decode(sentence, &model);
        assert!(tags.iter().all(|t| t != START_LABEL), "{:?}", tags);
    }
}

#[test]
fn mismatched_length_example_is_skipped() {
    let mut examples = corpus();
    examples.insert(1, Sequence::new(vec!["short"], vec!["DET", "NOUN"]));
    let model = train(&examples);
    // training still succeeds on the remaining examples
    let tags = Viterbi::default().decode(&["the", "dog", "runs"], &model);
    assert_eq!(tags, ["DET", "NOUN", "VERB"]);
    assert_eq!(model.emission_logp("DET", "short"), None);
}

#[test]
fn normalization_invariant() {
    let model = train(&corpus());
    for table in [model.transitions(), model.emissions()].iter() {
        for (src, successors) in table.iter() {
            let sum: f64 = successors.values().map(|lp| lp.exp()).sum();
            assert!((sum - 1.0).abs() < 1e-9, "{} sums to {}", src, sum);
        }
    }
}

#[test]
fn training_replaces_rather_than_merges() {
    let first = train(&corpus());
    let second = train(&[Sequence::new(vec!["hello"], vec!["INTJ"])]);
    // the second model carries nothing over from the first corpus
    assert_eq!(second.num_labels(), 1);
    assert_eq!(second.transition_logp(START_LABEL, "DET"), None);
    // and the first is untouched by training the second
    assert_eq!(first.transition_logp(START_LABEL, "DET"), Some(0.0));
}

#[test]
fn model_file_roundtrip() {
    let model = train(&corpus());
    let path = std::env::temp_dir().join("hmmtag_roundtrip_model.json");
    model.save(&path).expect("failed to save model");
    let loaded = HmmModel::from_path(&path).expect("failed to load model");
    std::fs::remove_file(&path).ok();

    let sentence = ["the", "cat", "eats"];
    let decoder = Viterbi::default();
    assert_eq!(
        decoder.decode(&sentence, &model),
        decoder.decode(&sentence, &loaded)
    );
}

#[test]
fn loading_a_missing_model_does_not_panic() {
    let ret = HmmModel::from_path("tests/does-not-exist.json");
    assert!(ret.is_err());
}
