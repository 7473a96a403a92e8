//! Block bundle types: prebuilt layout retrieval results.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Form of a retrieved block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    /// A single source file
    Simple,
    /// A directory of files, optionally with one level of sub-directories
    Complex,
}

/// One file inside a complex block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockFile {
    /// Path relative to the repository root
    pub path: String,
    /// Raw file content
    pub content: String,
    /// Content size in bytes
    pub size: u64,
    /// Line count of the content
    pub lines: usize,
}

impl BlockFile {
    /// Build a block file record, filling in the derived size and line count
    pub fn new(path: impl Into<String>, content: String) -> Self {
        let lines = content.split('\n').count();
        Self {
            path: path.into(),
            size: content.len() as u64,
            lines,
            content,
        }
    }
}

/// One entry in a complex block's file map: a file or a one-level
/// sub-directory of files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockEntry {
    File(BlockFile),
    Directory(IndexMap<String, BlockFile>),
}

/// Aggregated result of a `get_block` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockBundle {
    /// Block name as requested
    pub name: String,
    /// Simple (single file) or complex (directory) form
    pub kind: BlockKind,
    /// First leading comment found in the block's sources, if any
    pub description: Option<String>,
    /// Full source for a simple block; None for complex blocks
    pub code: Option<String>,
    /// File map for a complex block; empty for simple blocks
    pub files: IndexMap<String, BlockEntry>,
    /// Union of external dependencies across all files
    pub dependencies: IndexSet<String>,
    /// Component tag names referenced across all files
    pub components_used: IndexSet<String>,
    /// Generated human-readable note describing how to use the block
    pub usage: String,
}

/// Result shape of a `list_blocks` request
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum BlockListing {
    /// Full categorized map with summary counts (no filter supplied)
    Overview {
        total: usize,
        categories: IndexMap<String, Vec<String>>,
        counts: IndexMap<String, usize>,
    },
    /// A single category (filter supplied); `available` names the non-empty
    /// categories when the filter matched nothing
    Category {
        category: String,
        blocks: Vec<String>,
        count: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        available: Option<Vec<String>>,
    },
}
