//! Environment/runtime helpers
//!
//! Sanity checks to ensure the data directory exists at startup.

/// Ensure the data directory exists, creating it if missing.
pub async fn ensure_env(data_dir: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(data_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {data_dir}: {e}"))?;
    Ok(())
}
