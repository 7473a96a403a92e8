//! Component retrieval operations: source, demo, metadata and listing

use serde_json::{json, Value};
use tracing::warn;

use tendril_core::{ComponentBundle, DemoBundle, Resolved, SourceFile, TendrilError, TendrilResult};
use tendril_extract::{extract_dependencies, extract_imports};
use tendril_github::Listing;

use crate::{fallback, has_source_extension, Resolver};

impl Resolver {
    /// Fetch every source file of a component and assemble a bundle with
    /// aggregated dependencies and imports.
    pub async fn get_component_source(&self, name: &str) -> TendrilResult<ComponentBundle> {
        let dir = format!("{}/{}", self.paths.components_root, name);
        let listing = self
            .client
            .fetch_listing(&self.repo, &dir)
            .await
            .map_err(|e| component_not_found(e, name))?;

        let entries = match listing {
            Listing::Directory(entries) => entries,
            // A file at the component path is treated as a one-file component
            Listing::File(entry) => vec![entry],
        };

        let mut bundle = ComponentBundle::new(name);
        for entry in entries {
            if !entry.is_file() || !has_source_extension(&entry.name) {
                continue;
            }
            let content = self.client.fetch_raw(&self.repo, &entry.path).await?;
            let dependencies = extract_dependencies(&content);
            let imports = extract_imports(&content);
            bundle.push_file(SourceFile::new(entry.path, content, dependencies, imports));
        }

        if bundle.files.is_empty() {
            return Err(TendrilError::not_found(format!("component '{name}'")));
        }
        Ok(bundle)
    }

    /// Resolve the first conventional demo file for a component
    pub async fn get_component_demo(&self, name: &str) -> TendrilResult<DemoBundle> {
        let candidates = [
            format!("{}/{name}-demo.tsx", self.paths.demos_root),
            format!("{}/{name}-demo.ts", self.paths.demos_root),
            format!("{}/{name}/demo.tsx", self.paths.demos_root),
            format!("{}/{name}/demo.tsx", self.paths.components_root),
        ];

        for path in candidates {
            match self.client.fetch_raw(&self.repo, &path).await {
                Ok(content) => {
                    let dependencies = extract_dependencies(&content);
                    let imports = extract_imports(&content);
                    let lines = content.split('\n').count();
                    return Ok(DemoBundle {
                        name: name.to_string(),
                        path,
                        content,
                        lines,
                        dependencies,
                        imports,
                    });
                }
                Err(TendrilError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }
        Err(TendrilError::not_found(format!("demo for component '{name}'")))
    }

    /// List available component names, sorted.
    ///
    /// The one operation with a non-error degraded path: on any remote
    /// failure the bundled fallback list is returned instead.
    pub async fn list_components(&self) -> TendrilResult<Resolved<Vec<String>>> {
        match self
            .client
            .fetch_listing(&self.repo, &self.paths.components_root)
            .await
        {
            Ok(Listing::Directory(entries)) => {
                let mut names: Vec<String> = entries
                    .iter()
                    .filter(|e| e.is_dir())
                    .map(|e| e.name.clone())
                    .collect();
                names.sort();
                Ok(Resolved::fresh(names))
            }
            Ok(Listing::File(_)) => {
                warn!("components root resolved to a file; serving fallback list");
                Ok(Resolved::degraded(fallback::fallback_components()))
            }
            Err(error) => {
                warn!(%error, "component listing unavailable; serving fallback list");
                Ok(Resolved::degraded(fallback::fallback_components()))
            }
        }
    }

    /// Fetch per-component metadata, synthesizing a minimal object when the
    /// metadata file is absent.
    ///
    /// Malformed content is reported as `Ok(None)` so the caller decides the
    /// user-facing behavior; it never fails the request.
    pub async fn get_component_metadata(&self, name: &str) -> TendrilResult<Option<Value>> {
        let path = format!("{}/{name}.json", self.paths.metadata_root);
        match self.client.fetch_raw(&self.repo, &path).await {
            Ok(text) => match serde_json::from_str::<Value>(&text) {
                Ok(value) if value.is_object() => Ok(Some(value)),
                Ok(_) => {
                    warn!(component = name, "metadata file is not a JSON object");
                    Ok(None)
                }
                Err(error) => {
                    warn!(component = name, %error, "metadata file is malformed");
                    Ok(None)
                }
            },
            Err(TendrilError::NotFound { .. }) => Ok(Some(json!({
                "name": name,
                "type": "registry:ui",
                "description": format!("The {name} component"),
                "files": [],
                "synthesized": true,
            }))),
            Err(e) => Err(e),
        }
    }
}

/// Map a missing component directory to a component-level NotFound
fn component_not_found(error: TendrilError, name: &str) -> TendrilError {
    match error {
        TendrilError::NotFound { .. } => TendrilError::not_found(format!("component '{name}'")),
        other => other,
    }
}
