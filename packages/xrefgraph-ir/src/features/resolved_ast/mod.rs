//! Resolved-AST input
//!
//! - `ResolvedAstProvider`: the read-only port walkers consume
//! - `ResolvedProject`: serializable snapshot implementing the port
//! - `ProjectBuilder`: fluent construction of snapshots (`test-fixtures`)

#[cfg(any(test, feature = "test-fixtures"))]
pub mod builder;
pub mod project;
pub mod provider;

#[cfg(any(test, feature = "test-fixtures"))]
pub use builder::{ProjectBuilder, EXTERNAL_ASSEMBLY};
pub use project::ResolvedProject;
pub use provider::ResolvedAstProvider;
