use std::path::{Path, PathBuf};

/// Default model identity recorded in `scores.model_name`. Runs with a
/// different identity score independently against the same table.
pub const DEFAULT_MODEL: &str = "cardiffnlp/twitter-roberta-base-sentiment-latest";

/// User-facing options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct ScoreOptions {
    pub db_path: PathBuf,
    pub model: String,             // discriminator stored in scores.model_name
    pub page_size: usize,          // pending rows fetched from the DB per cycle
    pub commit_every: usize,       // staged upserts between durability checkpoints
    pub max_text_len: usize,       // hard char cap applied after cleaning
    pub progress: bool,            // show progress bar
    pub progress_label: Option<String>, // optional label for progress bar
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("./data/databaser.db"),
            model: DEFAULT_MODEL.to_string(),
            page_size: 2000,
            commit_every: 500,
            max_text_len: 1200,
            progress: true,
            progress_label: None,
        }
    }
}

impl ScoreOptions {
    pub fn with_db_path(mut self, path: impl AsRef<Path>) -> Self {
        self.db_path = path.as_ref().to_path_buf();
        self
    }
    pub fn with_model(mut self, model: impl AsRef<str>) -> Self {
        self.model = model.as_ref().trim().to_string();
        self
    }
    pub fn with_page_size(mut self, n: usize) -> Self {
        self.page_size = n.max(1);
        self
    }
    pub fn with_commit_every(mut self, n: usize) -> Self {
        self.commit_every = n.max(1);
        self
    }
    pub fn with_max_text_len(mut self, n: usize) -> Self {
        self.max_text_len = n.max(1);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }
}
