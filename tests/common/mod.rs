use anyhow::{anyhow, Result};
use setl::{Classifier, RawScore, Storage};

/// Seed posts as the ingestion side would: `(post_id, text, created_at)`.
pub fn seed_posts(store: &mut Storage, rows: &[(&str, Option<&str>, &str)]) {
    store.insert_posts(rows.iter().copied()).unwrap();
}

/// Build a tiny deterministic corpus:
/// - c1 "I love this track"   (oldest; scores positive under the stub)
/// - c2 "absolute trash"      (scores negative under the stub)
/// - c3 ""                    (empty text: never pending)
/// - c4 NULL                  (null text: never pending)
/// - c5 "no strong opinion"   (newest; scores neutral under the stub)
pub fn corpus_basic(store: &mut Storage) {
    seed_posts(
        store,
        &[
            ("c1", Some("I love this track"), "2020-01-01T00:00:00Z"),
            ("c2", Some("absolute trash"), "2020-01-02T00:00:00Z"),
            ("c3", Some(""), "2020-01-03T00:00:00Z"),
            ("c4", None, "2020-01-04T00:00:00Z"),
            ("c5", Some("no strong opinion"), "2020-01-05T00:00:00Z"),
        ],
    );
}

/// Scripted classifier for driver tests. Labels derive deterministically from
/// the text (model-style spellings, including an opaque `LABEL_1` fallback),
/// every batch it sees is recorded, and a failure can be injected at a given
/// batch index to simulate a mid-run model crash.
pub struct StubClassifier {
    pub batches: Vec<Vec<String>>,
    pub fail_at_batch: Option<usize>,
}

impl StubClassifier {
    pub fn new() -> Self {
        Self { batches: Vec::new(), fail_at_batch: None }
    }

    pub fn failing_at(batch: usize) -> Self {
        Self { batches: Vec::new(), fail_at_batch: Some(batch) }
    }

    /// Every text this classifier has seen, across all batches, in order.
    pub fn seen_texts(&self) -> Vec<String> {
        self.batches.iter().flatten().cloned().collect()
    }
}

impl Classifier for StubClassifier {
    fn classify_batch(&mut self, texts: &[String]) -> Result<Vec<RawScore>> {
        if self.fail_at_batch == Some(self.batches.len()) {
            return Err(anyhow!("classifier backend unavailable"));
        }
        self.batches.push(texts.to_vec());
        Ok(texts
            .iter()
            .map(|t| {
                let label = if t.contains("love") {
                    "POSITIVE"
                } else if t.contains("trash") {
                    "NEGATIVE"
                } else {
                    "LABEL_1"
                };
                RawScore { label: label.to_string(), confidence: 0.9 }
            })
            .collect())
    }
}
