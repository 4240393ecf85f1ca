//! Configuration I/O
//!
//! YAML schema types. Loading and export live on `IndexerConfig`.

use serde::{Deserialize, Serialize};

use super::indexer_config::IndexerConfig;

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Schema version (always 1 for v1)
    pub version: u32,

    #[serde(default)]
    pub indexer: IndexerConfig,
}
