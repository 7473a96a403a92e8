//! GitHub contents API response types

use serde::{Deserialize, Serialize};

/// Entry type reported by the contents endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    File,
    Dir,
    /// Symlinks, submodules and anything GitHub adds later
    #[serde(other)]
    Other,
}

/// One entry of a contents listing
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContentEntry {
    /// Entry name (last path segment)
    pub name: String,
    /// Path relative to the repository root
    pub path: String,
    /// File or directory
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Size in bytes (0 for directories)
    #[serde(default)]
    pub size: u64,
    /// Direct download URL (absent for directories)
    pub download_url: Option<String>,
    /// Content hash
    pub sha: String,
}

impl ContentEntry {
    /// True for plain file entries
    pub fn is_file(&self) -> bool {
        self.entry_type == EntryType::File
    }

    /// True for directory entries
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Dir
    }
}

/// Contents response shape: a JSON array for a directory path, a single
/// object for a file path. Callers must discriminate.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Listing {
    Directory(Vec<ContentEntry>),
    File(ContentEntry),
}
