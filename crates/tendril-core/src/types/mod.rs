//! Core data types for fetched registry content.
//!
//! All types are plain serde-serializable values: one instance is built per
//! request and handed back to the protocol layer, nothing is persisted.

mod block;
mod bundle;
mod tree;

pub use block::{BlockBundle, BlockEntry, BlockFile, BlockKind, BlockListing};
pub use bundle::{ComponentBundle, DemoBundle, SourceFile};
pub use tree::{DirectoryNode, NodeKind};

use serde::Serialize;

/// A result value that may have come from a degraded fallback path.
///
/// The two designed degraded paths (component listing and the default
/// directory tree) return this instead of failing on a rate limit, so
/// callers and tests can assert on degradation directly.
#[derive(Debug, Clone, Serialize)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// True when the value came from bundled fallback data
    pub fallback: bool,
}

impl<T> Resolved<T> {
    /// Wrap a value resolved from the live upstream
    pub fn fresh(value: T) -> Self {
        Self {
            value,
            fallback: false,
        }
    }

    /// Wrap a bundled fallback value returned on a degraded path
    pub fn degraded(value: T) -> Self {
        Self {
            value,
            fallback: true,
        }
    }
}
