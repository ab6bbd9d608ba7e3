mod classify;
mod clean;
mod config;
mod pipeline;
mod progress;
mod storage;
mod util;

pub use crate::classify::{Classifier, LexiconClassifier, RawScore, Sentiment};
pub use crate::clean::{normalize, truncate_chars};
pub use crate::config::{ScoreOptions, DEFAULT_MODEL};
pub use crate::pipeline::{RunSummary, SentimentETL};
pub use crate::storage::{PendingPost, ScoreEntry, Storage};

// Expose progress helper so binaries can reuse the bar for adjacent jobs.
pub use crate::progress::make_count_progress;

// Expose tracing init so binaries share the one-shot guard.
pub use crate::util::init_tracing_once;
