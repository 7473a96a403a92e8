//! # tendril-core
//!
//! Core types and utilities shared across all Tendril crates.
//!
//! This crate provides:
//! - Bundle types for fetched components, blocks and repository trees
//! - TendrilError enum for unified error handling
//! - The `Resolved` wrapper that tags degraded (fallback) results
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (ComponentBundle, BlockBundle, DirectoryNode, ...)
//! - `error`: Error types and result aliases

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{TendrilError, TendrilResult};
pub use types::{
    BlockBundle, BlockEntry, BlockFile, BlockKind, BlockListing, ComponentBundle, DemoBundle,
    DirectoryNode, NodeKind, Resolved, SourceFile,
};
