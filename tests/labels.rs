use setl::{Classifier, LexiconClassifier, Sentiment};

/// Prefix rule, case-insensitive: pos* -> pos, neg* -> neg, everything else
/// falls back to neutral. The fallback is deliberate; unexpected spellings
/// from a model must never become errors.
#[test]
fn label_prefix_rule() {
    assert_eq!(Sentiment::from_model_label("NEGATIVE"), Sentiment::Neg);
    assert_eq!(Sentiment::from_model_label("Positive"), Sentiment::Pos);
    assert_eq!(Sentiment::from_model_label("LABEL_1"), Sentiment::Neu);
    assert_eq!(Sentiment::from_model_label("neutral"), Sentiment::Neu);
    assert_eq!(Sentiment::from_model_label("pos"), Sentiment::Pos);
    assert_eq!(Sentiment::from_model_label("neg"), Sentiment::Neg);
}

#[test]
fn label_rule_is_total() {
    for odd in ["", "   ", "🤷", "positively negative", "NEG ", " pos"] {
        let s = Sentiment::from_model_label(odd);
        assert!(matches!(s, Sentiment::Pos | Sentiment::Neu | Sentiment::Neg));
    }
    // Leading whitespace is trimmed before the prefix check.
    assert_eq!(Sentiment::from_model_label(" pos"), Sentiment::Pos);
    // Prefix means prefix: the first recognizable stem wins.
    assert_eq!(Sentiment::from_model_label("positively negative"), Sentiment::Pos);
}

#[test]
fn label_storage_spellings() {
    assert_eq!(Sentiment::Pos.as_str(), "pos");
    assert_eq!(Sentiment::Neu.as_str(), "neu");
    assert_eq!(Sentiment::Neg.as_str(), "neg");
}

#[test]
fn lexicon_classifier_batch_shape_and_labels() {
    let texts: Vec<String> = [
        "this is the best, I love it",
        "terrible awful trash",
        "a comment about nothing in particular",
        "good but also bad",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    let mut clf = LexiconClassifier;
    let out = clf.classify_batch(&texts).unwrap();
    assert_eq!(out.len(), texts.len());

    assert_eq!(Sentiment::from_model_label(&out[0].label), Sentiment::Pos);
    assert_eq!(Sentiment::from_model_label(&out[1].label), Sentiment::Neg);
    // No lexicon hits and an exact tie both land on neutral at half confidence.
    assert_eq!(Sentiment::from_model_label(&out[2].label), Sentiment::Neu);
    assert_eq!(Sentiment::from_model_label(&out[3].label), Sentiment::Neu);
    assert_eq!(out[2].confidence, 0.5);
    assert_eq!(out[3].confidence, 0.5);

    for r in &out {
        assert!(r.confidence >= 0.0 && r.confidence <= 1.0);
    }
    // Decided labels carry more confidence than the neutral floor.
    assert!(out[0].confidence > 0.5);
    assert!(out[1].confidence > 0.5);
}
