//! Repository directory tree types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One node of the lazily-built repository tree
///
/// The node kind is an enum, so a directory node can never carry a
/// download URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryNode {
    /// Path relative to the repository root
    pub path: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

/// Node payload, discriminated by the `kind` field on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeKind {
    File {
        download_url: Option<String>,
        sha: String,
    },
    Directory {
        children: IndexMap<String, DirectoryNode>,
    },
    /// A sub-directory whose listing failed; the failure is recorded on the
    /// node instead of aborting the whole tree
    Error { message: String },
}

impl DirectoryNode {
    /// Create a file leaf
    pub fn file(path: impl Into<String>, download_url: Option<String>, sha: String) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::File { download_url, sha },
        }
    }

    /// Create a directory node with no children yet
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::Directory {
                children: IndexMap::new(),
            },
        }
    }

    /// Create an error marker for a failed sub-directory fetch
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::Error {
                message: message.into(),
            },
        }
    }
}
