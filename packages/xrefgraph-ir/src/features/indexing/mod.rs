//! Two-phase indexing walk
//!
//! - `coordinator`: phases, worker pool, store lifecycle
//! - `walker`: pre-order traversal of one compilation unit
//! - `handlers`: per-node translation into symbols and references
//! - `session`: shared run state and the traversal cursor

pub mod coordinator;
mod handlers;
pub mod session;
pub mod walker;

pub use coordinator::Indexer;
pub use session::{IndexSession, WalkContext, WalkPhase};
pub use walker::walk_unit;
