use crate::classify::{Classifier, Sentiment};
use crate::clean::{normalize, truncate_chars};
use crate::config::ScoreOptions;
use crate::progress::make_count_progress;
use crate::storage::{ScoreEntry, Storage};
use crate::util::init_tracing_once;
use anyhow::{ensure, Context, Result};
use indicatif::ProgressBar;

/// Final accounting for one scoring run. `total_pending` is the snapshot taken
/// before the first page and may drift from `processed` if ingestion runs
/// concurrently; only `processed` is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total_pending: u64,
    pub processed: u64,
}

/// Incremental scoring driver. Pages through the pending anti-join, cleans and
/// truncates each text, classifies the page as one batch, stages upserts, and
/// checkpoints every `commit_every` staged rows. Safe to interrupt and rerun:
/// at most one uncommitted span of pages is lost, and the selector rediscovers
/// exactly those rows.
#[derive(Clone)]
pub struct SentimentETL {
    opts: ScoreOptions,
}

impl SentimentETL {
    pub fn new() -> Self {
        Self { opts: ScoreOptions::default() }
    }

    // -------- Builder methods --------
    pub fn db_path(mut self, path: impl AsRef<std::path::Path>) -> Self { self.opts = self.opts.with_db_path(path); self }
    pub fn model(mut self, model: impl AsRef<str>) -> Self { self.opts = self.opts.with_model(model); self }
    pub fn page_size(mut self, n: usize) -> Self { self.opts = self.opts.with_page_size(n); self }
    pub fn commit_every(mut self, n: usize) -> Self { self.opts = self.opts.with_commit_every(n); self }
    pub fn max_text_len(mut self, n: usize) -> Self { self.opts = self.opts.with_max_text_len(n); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }

    pub fn options(&self) -> &ScoreOptions {
        &self.opts
    }

    /// Score every pending post for the configured model. The storage handle
    /// and the classification capability are constructed by the caller and
    /// injected here; this driver owns neither.
    pub fn run<C: Classifier>(&self, store: &Storage, clf: &mut C) -> Result<RunSummary> {
        init_tracing_once();
        let model = self.opts.model.as_str();

        let total_pending = store.count_pending(model)?;
        if total_pending == 0 {
            tracing::info!(model, "no pending posts for this model, nothing to do");
            return Ok(RunSummary { total_pending: 0, processed: 0 });
        }
        tracing::info!(model, total_pending, "pending posts to classify");

        let pb = if self.opts.progress {
            Some(make_count_progress(
                total_pending,
                self.opts.progress_label.as_deref().unwrap_or("Scoring"),
            ))
        } else {
            None
        };

        store.begin()?;
        match self.run_loop(store, clf, pb.as_ref()) {
            Ok(processed) => {
                // Final checkpoint regardless of accumulator state.
                store.commit()?;
                if let Some(pb) = &pb {
                    pb.finish_with_message("done");
                }
                tracing::info!(model, processed, "classification complete");
                Ok(RunSummary { total_pending, processed })
            }
            Err(e) => {
                // Committed pages stand; the anti-join rediscovers the rest.
                let _ = store.rollback();
                Err(e)
            }
        }
    }

    fn run_loop<C: Classifier>(
        &self,
        store: &Storage,
        clf: &mut C,
        pb: Option<&ProgressBar>,
    ) -> Result<u64> {
        let model = self.opts.model.as_str();
        let mut processed: u64 = 0;
        let mut staged_since_checkpoint = 0usize;

        loop {
            let page = store.select_pending(model, self.opts.page_size)?;
            if page.is_empty() {
                break;
            }

            let texts: Vec<String> = page
                .iter()
                .map(|p| truncate_chars(&normalize(Some(&p.text)), self.opts.max_text_len).to_string())
                .collect();

            let raw = clf
                .classify_batch(&texts)
                .with_context(|| format!("classify page of {} posts", page.len()))?;
            ensure!(
                raw.len() == page.len(),
                "classifier returned {} results for {} inputs",
                raw.len(),
                page.len()
            );

            let entries: Vec<ScoreEntry> = page
                .iter()
                .zip(&raw)
                .map(|(p, r)| ScoreEntry {
                    post_id: p.post_id.clone(),
                    sentiment: Sentiment::from_model_label(&r.label),
                    confidence: r.confidence.clamp(0.0, 1.0),
                })
                .collect();

            store.upsert_scores(model, &entries)?;
            staged_since_checkpoint += entries.len();
            processed += entries.len() as u64;
            if let Some(pb) = pb {
                pb.inc(entries.len() as u64);
            }

            if staged_since_checkpoint >= self.opts.commit_every {
                store.checkpoint()?;
                staged_since_checkpoint = 0;
            }
        }
        Ok(processed)
    }
}

impl Default for SentimentETL {
    fn default() -> Self {
        Self::new()
    }
}
