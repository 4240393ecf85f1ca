//! Indexer configuration
//!
//! Built in code with `IndexerConfig::new(..)` or loaded from a versioned
//! YAML file:
//!
//! ```yaml
//! version: 1
//! indexer:
//!   output_path: graph.sqlite
//!   omit_externals: true
//!   parallel:
//!     num_workers: 0      # auto
//!     enable_rayon: true  # false = sequential walk
//! ```

pub mod error;
pub mod indexer_config;
pub mod io;

// Re-exports
pub use error::{ConfigError, ConfigResult};
pub use indexer_config::{IndexerConfig, ParallelConfig, DEFAULT_FILE_LANGUAGE};
pub use io::ConfigExportV1;
