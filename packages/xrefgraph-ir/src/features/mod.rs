//! Feature slices, leaves first:
//! resolved_ast → name_encoding → interface_index → graph_sink → indexing

pub mod graph_sink;
pub mod indexing;
pub mod interface_index;
pub mod name_encoding;
pub mod resolved_ast;
