//! Document store backend selection.

use serde::{Deserialize, Serialize};

/// Which backend holds articles and audit entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// PostgreSQL via sqlx.
    #[default]
    Postgres,
    /// Process-local maps. Single node only; contents are lost on restart.
    Memory,
}

/// Store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Backend type: `"postgres"` or `"memory"`.
    #[serde(default)]
    pub backend: StoreBackend,
}
