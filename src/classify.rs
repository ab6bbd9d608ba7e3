//! Classification boundary: the pretrained model is consumed as an opaque
//! batch capability and its raw label vocabulary is normalized here, at the
//! adapter, before anything else sees it.

use anyhow::Result;

/// Raw model output for one input text, in the model's own label vocabulary.
#[derive(Debug, Clone)]
pub struct RawScore {
    pub label: String,
    pub confidence: f64,
}

/// Three-way sentiment vocabulary stored in `scores.sentiment_label`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    Pos,
    Neu,
    Neg,
}

impl Sentiment {
    /// Normalize a model label by prefix, case-insensitively. Anything not
    /// recognizably positive or negative is absorbed as neutral; unexpected
    /// spellings from a model never become errors.
    pub fn from_model_label(label: &str) -> Self {
        let l = label.trim().to_lowercase();
        if l.starts_with("pos") {
            Sentiment::Pos
        } else if l.starts_with("neg") {
            Sentiment::Neg
        } else {
            Sentiment::Neu
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Pos => "pos",
            Sentiment::Neu => "neu",
            Sentiment::Neg => "neg",
        }
    }
}

/// The pretrained-model seam. Implementations must return exactly one result
/// per input, in input order; a batch-level failure propagates and the caller
/// leaves the batch uncommitted.
pub trait Classifier {
    fn classify_batch(&mut self, texts: &[String]) -> Result<Vec<RawScore>>;
}

/// Deterministic valence-lexicon classifier shipped as the binary's default
/// capability, so the tool runs end to end without a model download. Emits
/// model-style label spellings ("positive"/"negative"/"neutral") so the prefix
/// normalization is exercised on the real path.
pub struct LexiconClassifier;

const POSITIVE_WORDS: &[&str] = &[
    "amazing", "awesome", "beautiful", "best", "excellent", "fantastic", "fire", "goat", "good",
    "great", "incredible", "legend", "love", "loved", "perfect", "thank", "thanks", "wonderful",
];

const NEGATIVE_WORDS: &[&str] = &[
    "awful", "bad", "boring", "cringe", "disgusting", "garbage", "hate", "hated", "horrible",
    "scam", "stupid", "terrible", "trash", "ugly", "worst",
];

impl Classifier for LexiconClassifier {
    fn classify_batch(&mut self, texts: &[String]) -> Result<Vec<RawScore>> {
        Ok(texts.iter().map(|t| score_one(t)).collect())
    }
}

fn score_one(text: &str) -> RawScore {
    let lower = text.to_lowercase();
    let mut pos = 0u32;
    let mut neg = 0u32;
    for word in lower.split(|c: char| !c.is_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        if POSITIVE_WORDS.contains(&word) {
            pos += 1;
        } else if NEGATIVE_WORDS.contains(&word) {
            neg += 1;
        }
    }
    let total = pos + neg;
    if total == 0 || pos == neg {
        return RawScore { label: "neutral".to_string(), confidence: 0.5 };
    }
    let (label, hits) = if pos > neg { ("positive", pos) } else { ("negative", neg) };
    RawScore {
        label: label.to_string(),
        confidence: f64::from(hits) / f64::from(total),
    }
}
