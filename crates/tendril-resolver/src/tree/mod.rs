//! Recursive repository-tree builder

use std::future::Future;
use std::pin::Pin;

use indexmap::IndexMap;
use tracing::warn;

use tendril_core::{DirectoryNode, NodeKind, Resolved, TendrilError, TendrilResult};
use tendril_github::{Listing, RepoConfig};

use crate::{segment_count, Resolver, DEFAULT_TREE_ROOT, MAX_TREE_DEPTH};

impl Resolver {
    /// Build a directory tree for a repository path, recursing sequentially
    /// into sub-directories.
    ///
    /// The depth ceiling is measured relative to the starting path, so a
    /// deeply nested starting path gets the same headroom as the default
    /// root. A sub-directory fetch failure is recorded as an error-marker
    /// node; only a failure at the starting path fails the call. When the
    /// default root is rate-limited, a bundled placeholder tree is returned
    /// instead with the fallback flag set.
    pub async fn build_directory_tree(
        &self,
        owner: Option<String>,
        repo: Option<String>,
        path: Option<String>,
        branch: Option<String>,
    ) -> TendrilResult<Resolved<DirectoryNode>> {
        let target = RepoConfig::new(
            owner.unwrap_or_else(|| self.repo.owner.clone()),
            repo.unwrap_or_else(|| self.repo.repo.clone()),
            branch.unwrap_or_else(|| self.repo.branch.clone()),
        );
        let root = path.unwrap_or_else(|| DEFAULT_TREE_ROOT.to_string());
        let is_default_root = root == DEFAULT_TREE_ROOT
            && target.owner == self.repo.owner
            && target.repo == self.repo.repo;

        let base_depth = segment_count(&root);
        match self.build_node(&target, &root, base_depth).await {
            Ok(node) => Ok(Resolved::fresh(node)),
            Err(TendrilError::RateLimited { message }) if is_default_root => {
                warn!(%message, "tree build rate-limited; serving placeholder tree");
                Ok(Resolved::degraded(crate::fallback::placeholder_tree(&root)))
            }
            Err(e) => Err(e),
        }
    }

    /// Recursively list one path into a DirectoryNode
    fn build_node<'a>(
        &'a self,
        repo: &'a RepoConfig,
        path: &'a str,
        base_depth: usize,
    ) -> Pin<Box<dyn Future<Output = TendrilResult<DirectoryNode>> + Send + 'a>> {
        Box::pin(async move {
            let entries = match self.client.fetch_listing(repo, path).await? {
                Listing::Directory(entries) => entries,
                Listing::File(entry) => {
                    return Ok(DirectoryNode::file(entry.path, entry.download_url, entry.sha));
                }
            };

            let mut children = IndexMap::new();
            for entry in entries {
                if entry.is_file() {
                    children.insert(
                        entry.name.clone(),
                        DirectoryNode::file(entry.path, entry.download_url, entry.sha),
                    );
                } else if entry.is_dir() {
                    let depth = segment_count(&entry.path).saturating_sub(base_depth);
                    let child = if depth >= MAX_TREE_DEPTH {
                        // Ceiling reached: record the directory, do not descend
                        DirectoryNode::directory(entry.path)
                    } else {
                        // Sequential on purpose: keeps call volume predictable
                        // against the host's rate limit
                        match self.build_node(repo, &entry.path, base_depth).await {
                            Ok(node) => node,
                            Err(error) => {
                                warn!(path = %entry.path, %error, "sub-directory fetch failed");
                                DirectoryNode::error(entry.path, error.to_string())
                            }
                        }
                    };
                    children.insert(entry.name.clone(), child);
                }
            }

            Ok(DirectoryNode {
                path: path.to_string(),
                kind: NodeKind::Directory { children },
            })
        })
    }
}
