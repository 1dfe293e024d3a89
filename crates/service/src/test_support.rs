#![cfg(test)]
use configs::DatabaseConfig;

use crate::books::ConnectionManager;

/// Fresh in-memory store with the ISBN index in place; one per test.
pub async fn manager() -> Result<ConnectionManager, anyhow::Error> {
    let mgr = ConnectionManager::connect(&DatabaseConfig::sqlite_memory()).await?;
    mgr.ensure_index().await?;
    Ok(mgr)
}
