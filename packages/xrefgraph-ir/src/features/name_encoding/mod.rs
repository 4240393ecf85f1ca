//! Symbol name encoding
//!
//! `NameEncoder` derives the canonical identity of a semantic symbol;
//! `serialize_name` turns it into the store's structured name.

pub mod encoder;
pub mod serializer;

pub use encoder::{EncodedName, NameEncoder};
pub use serializer::{serialize_name, split_name};
