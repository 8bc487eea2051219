//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected paths exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Ensure the parent directory of the SQLite file exists so `mode=rwc` can create it.
pub async fn ensure_db_dir(db_file: Option<&str>) -> anyhow::Result<()> {
    let Some(file) = db_file else { return Ok(()) };
    let Some(parent) = Path::new(file).parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    tokio::fs::create_dir_all(parent)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    info!(dir = %parent.display(), "database directory ready");
    Ok(())
}

/// Warn when the directory images are read from is missing; requests will fail per file.
pub async fn check_image_root(image_root: &str) {
    if tokio::fs::metadata(image_root).await.is_err() {
        warn!(%image_root, "image root directory not found; labeling requests will fail");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creates_missing_parent_dir() {
        let dir = format!("target/test-data/{}/nested", uuid::Uuid::new_v4());
        let file = format!("{dir}/annotations.db");
        ensure_db_dir(Some(&file)).await.unwrap();
        assert!(tokio::fs::metadata(&dir).await.unwrap().is_dir());
    }

    #[tokio::test]
    async fn bare_file_name_and_memory_are_noops() {
        ensure_db_dir(Some("annotations.db")).await.unwrap();
        ensure_db_dir(None).await.unwrap();
    }
}
