use anyhow::Result;
use setl::{init_tracing_once, LexiconClassifier, SentimentETL, Storage};
use std::env;

const DEFAULT_DB: &str = "./data/databaser.db";

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

fn main() -> Result<()> {
    init_tracing_once();

    let db_path = env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DB.to_string());

    let mut etl = SentimentETL::new()
        .db_path(&db_path)
        .page_size(env_usize("SETL_PAGE_SIZE", 2000))
        .commit_every(env_usize("SETL_COMMIT_EVERY", 500))
        .max_text_len(env_usize("SETL_MAX_TEXT_LEN", 1200))
        .progress(true)
        .progress_label("Scoring comments");
    if let Ok(model) = env::var("SETL_MODEL") {
        if !model.trim().is_empty() {
            etl = etl.model(model);
        }
    }

    // Storage and classifier are built once here and injected; the driver
    // owns neither, and both are released when main returns.
    let store = Storage::open(&etl.options().db_path)?;
    for (table, rows) in store.table_counts()? {
        tracing::info!(table = %table, rows, "table");
    }

    let mut clf = LexiconClassifier;
    let summary = etl.run(&store, &mut clf)?;

    if summary.total_pending == 0 {
        println!("No pending posts for this model. Nothing to do.");
    } else {
        println!("Classification complete: {} posts scored.", summary.processed);
    }
    Ok(())
}
