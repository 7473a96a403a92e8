//! Retrieval operations for the Tendril registry fetcher.
//!
//! This crate implements the five retrieval operations (component source,
//! demo, metadata, block code, block listing) and the recursive repository
//! tree builder, composing the GitHub client with the lexical extractors.
//! Two operations carry designed degraded paths: the component listing and
//! the default-root directory tree fall back to bundled data when the host
//! rate-limits the call.

pub mod blocks;
pub mod components;
pub mod fallback;
pub mod tree;

#[cfg(test)]
pub(crate) mod testutil;

use std::sync::Arc;

use tendril_github::{GithubClient, RepoConfig};

/// File extensions recognized as component/block source
pub const SOURCE_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// Maximum directory levels the tree builder descends below the starting
/// path
pub const MAX_TREE_DEPTH: usize = 3;

/// Default starting path for `get_directory_structure`
pub const DEFAULT_TREE_ROOT: &str = "apps/v4/registry/new-york-v4";

/// Repository paths the registry content lives under
#[derive(Debug, Clone)]
pub struct RegistryPaths {
    /// Directory containing one sub-directory per component
    pub components_root: String,
    /// Directory containing demo files
    pub demos_root: String,
    /// Directory containing block files and block directories
    pub blocks_root: String,
    /// Directory containing per-component metadata JSON
    pub metadata_root: String,
}

impl Default for RegistryPaths {
    fn default() -> Self {
        Self {
            components_root: "apps/v4/registry/new-york-v4/ui".to_string(),
            demos_root: "apps/v4/registry/new-york-v4/examples".to_string(),
            blocks_root: "apps/v4/registry/new-york-v4/blocks".to_string(),
            metadata_root: "apps/v4/public/r".to_string(),
        }
    }
}

/// Orchestrator for all retrieval operations.
///
/// Holds shared ownership of the GitHub client; one instance serves many
/// concurrent requests and keeps no per-request state.
#[derive(Debug)]
pub struct Resolver {
    client: Arc<GithubClient>,
    repo: RepoConfig,
    paths: RegistryPaths,
}

impl Resolver {
    /// Create a resolver against the default registry layout
    pub fn new(client: Arc<GithubClient>, repo: RepoConfig) -> Self {
        Self::with_paths(client, repo, RegistryPaths::default())
    }

    /// Create a resolver with custom registry paths
    pub fn with_paths(client: Arc<GithubClient>, repo: RepoConfig, paths: RegistryPaths) -> Self {
        Self {
            client,
            repo,
            paths,
        }
    }
}

/// True when the file name carries one of the recognized source extensions
pub(crate) fn has_source_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| SOURCE_EXTENSIONS.contains(&ext))
}

/// Count the non-empty segments of a repository path
pub(crate) fn segment_count(path: &str) -> usize {
    path.split('/').filter(|s| !s.is_empty()).count()
}
