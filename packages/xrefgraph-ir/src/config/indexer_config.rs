//! Indexer settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigExportV1;

/// Language tag written for every registered file.
pub const DEFAULT_FILE_LANGUAGE: &str = "cpp";

// ============================================================================
// Parallel Configuration
// ============================================================================

/// Worker pool settings for the two walk phases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Number of workers (0=auto, 1..=256)
    pub num_workers: usize,

    /// Walk files on a Rayon pool; `false` walks them one by one on the caller
    pub enable_rayon: bool,
}

impl ParallelConfig {
    /// Single-threaded walk, useful when diagnosing ordering problems
    pub fn sequential() -> Self {
        Self {
            num_workers: 1,
            enable_rayon: false,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.num_workers > 256 {
            return Err(ConfigError::range_with_hint(
                "num_workers",
                self.num_workers,
                0,
                256,
                "Number of workers must be reasonable (0=auto)",
            ));
        }
        Ok(())
    }

    /// Worker count with `0` resolved to the number of CPUs
    pub fn effective_workers(&self) -> usize {
        if !self.enable_rayon {
            1
        } else if self.num_workers == 0 {
            num_cpus::get()
        } else {
            self.num_workers
        }
    }
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            num_workers: 0, // Auto
            enable_rayon: true,
        }
    }
}

// ============================================================================
// Indexer Configuration
// ============================================================================

/// Settings for one indexing run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    /// Database file the graph is written to
    pub output_path: PathBuf,

    /// Skip symbols declared outside the analyzed assembly
    pub omit_externals: bool,

    /// Delete existing rows before the run starts
    pub clear_store: bool,

    /// Language tag recorded for registered files
    pub file_language: String,

    pub parallel: ParallelConfig,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::new(),
            omit_externals: false,
            clear_store: true,
            file_language: DEFAULT_FILE_LANGUAGE.to_string(),
            parallel: ParallelConfig::default(),
        }
    }
}

impl IndexerConfig {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
            ..Default::default()
        }
    }

    pub fn omit_externals(mut self, omit: bool) -> Self {
        self.omit_externals = omit;
        self
    }

    pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingOutput);
        }
        self.parallel.validate()
    }

    /// Load from YAML file (v1 schema)
    pub fn from_yaml(path: &str) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        // Version check
        if export.version != 1 {
            return Err(ConfigError::UnsupportedVersion {
                found: export.version,
                supported: vec![1],
            });
        }

        export.indexer.validate()?;
        Ok(export.indexer)
    }

    /// Export as YAML (v1 schema)
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: 1,
            indexer: self.clone(),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}
