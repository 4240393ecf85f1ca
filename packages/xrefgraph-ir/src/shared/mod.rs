//! Shared layer - models used across features

pub mod models;
