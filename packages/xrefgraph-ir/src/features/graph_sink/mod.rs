//! Graph Sink: deduplicating, serialized writes into a `GraphStore`

mod sink;
mod stats;

pub use sink::GraphSink;
pub use stats::IndexStats;
