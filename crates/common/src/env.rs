//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{debug, warn};

/// Ensure the directory holding `data_file` exists, creating it when missing.
pub async fn ensure_data_dir(data_file: impl AsRef<Path>) -> anyhow::Result<()> {
    let data_file = data_file.as_ref();
    let Some(dir) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        debug!(file = %data_file.display(), "data file lives in the working directory");
        return Ok(());
    };
    if tokio::fs::metadata(dir).await.is_err() {
        warn!(dir = %dir.display(), "data directory not found; creating it");
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    Ok(())
}
