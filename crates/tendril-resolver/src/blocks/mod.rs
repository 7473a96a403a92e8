//! Block retrieval: simple/complex block code and categorized listings

use indexmap::{IndexMap, IndexSet};

use tendril_core::{
    BlockBundle, BlockEntry, BlockFile, BlockKind, BlockListing, TendrilError, TendrilResult,
};
use tendril_extract::{extract_component_usage, extract_dependencies, extract_leading_description};
use tendril_github::Listing;

use crate::{has_source_extension, Resolver};

/// Category heuristics in precedence order; a block name is classified by
/// the first category whose needle it contains
const CATEGORIES: &[(&str, &[&str])] = &[
    ("calendar", &["calendar"]),
    ("dashboard", &["dashboard"]),
    ("login", &["login", "signin"]),
    ("sidebar", &["sidebar"]),
    ("auth", &["auth"]),
    ("charts", &["chart", "graph"]),
];

impl Resolver {
    /// Retrieve a block: a single-file ("simple") block when one exists at
    /// the conventional path, otherwise a directory ("complex") block.
    pub async fn get_block_code(&self, name: &str, include_sub: bool) -> TendrilResult<BlockBundle> {
        let simple_path = format!("{}/{name}.tsx", self.paths.blocks_root);
        match self.client.fetch_raw(&self.repo, &simple_path).await {
            Ok(content) => Ok(simple_bundle(name, content)),
            Err(TendrilError::NotFound { .. }) => self.complex_block(name, include_sub).await,
            Err(e) => Err(e),
        }
    }

    /// List block names grouped into fixed categories, or a single category
    /// when a filter is supplied.
    pub async fn list_blocks(&self, filter: Option<&str>) -> TendrilResult<BlockListing> {
        let listing = self
            .client
            .fetch_listing(&self.repo, &self.paths.blocks_root)
            .await?;
        let entries = match listing {
            Listing::Directory(entries) => entries,
            Listing::File(entry) => vec![entry],
        };

        let mut categories: IndexMap<String, Vec<String>> = IndexMap::new();
        for entry in entries {
            let name = if entry.is_dir() {
                entry.name.clone()
            } else if entry.is_file() && has_source_extension(&entry.name) {
                match entry.name.rsplit_once('.') {
                    Some((stem, _)) => stem.to_string(),
                    None => entry.name.clone(),
                }
            } else {
                continue;
            };
            categories
                .entry(classify(&name).to_string())
                .or_default()
                .push(name);
        }
        for blocks in categories.values_mut() {
            blocks.sort();
        }
        categories.sort_keys();

        match filter {
            None => {
                let counts: IndexMap<String, usize> = categories
                    .iter()
                    .map(|(category, blocks)| (category.clone(), blocks.len()))
                    .collect();
                Ok(BlockListing::Overview {
                    total: counts.values().sum(),
                    categories,
                    counts,
                })
            }
            Some(filter) => {
                let wanted = filter.to_lowercase();
                match categories.shift_remove(&wanted) {
                    Some(blocks) => Ok(BlockListing::Category {
                        category: wanted,
                        count: blocks.len(),
                        blocks,
                        available: None,
                    }),
                    // Unknown filter: name the categories that do exist
                    None => Ok(BlockListing::Category {
                        category: wanted,
                        blocks: Vec::new(),
                        count: 0,
                        available: Some(categories.keys().cloned().collect()),
                    }),
                }
            }
        }
    }

    /// Assemble a directory-form block, descending one level into
    /// sub-directories when requested.
    async fn complex_block(&self, name: &str, include_sub: bool) -> TendrilResult<BlockBundle> {
        let dir = format!("{}/{name}", self.paths.blocks_root);
        let listing = match self.client.fetch_listing(&self.repo, &dir).await {
            Ok(listing) => listing,
            Err(TendrilError::NotFound { .. }) => {
                return Err(TendrilError::not_found(format!("block '{name}'")))
            }
            Err(e) => return Err(e),
        };
        let entries = match listing {
            Listing::Directory(entries) => entries,
            Listing::File(entry) => {
                let content = self.client.fetch_raw(&self.repo, &entry.path).await?;
                return Ok(simple_bundle(name, content));
            }
        };

        let mut bundle = BlockBundle {
            name: name.to_string(),
            kind: BlockKind::Complex,
            description: None,
            code: None,
            files: IndexMap::new(),
            dependencies: IndexSet::new(),
            components_used: IndexSet::new(),
            usage: String::new(),
        };

        for entry in entries {
            if entry.is_file() && has_source_extension(&entry.name) {
                let content = self.client.fetch_raw(&self.repo, &entry.path).await?;
                absorb(&mut bundle, &content);
                bundle
                    .files
                    .insert(entry.name.clone(), BlockEntry::File(BlockFile::new(entry.path, content)));
            } else if entry.is_dir() && include_sub {
                // One level only
                let mut sub_files = IndexMap::new();
                if let Listing::Directory(children) =
                    self.client.fetch_listing(&self.repo, &entry.path).await?
                {
                    for child in children {
                        if !child.is_file() || !has_source_extension(&child.name) {
                            continue;
                        }
                        let content = self.client.fetch_raw(&self.repo, &child.path).await?;
                        absorb(&mut bundle, &content);
                        sub_files.insert(child.name.clone(), BlockFile::new(child.path, content));
                    }
                }
                bundle
                    .files
                    .insert(entry.name.clone(), BlockEntry::Directory(sub_files));
            }
        }

        if bundle.files.is_empty() {
            return Err(TendrilError::not_found(format!("block '{name}'")));
        }
        bundle.usage = complex_usage_note(name, &bundle.files);
        Ok(bundle)
    }
}

/// Classify a block name into its category
fn classify(name: &str) -> &'static str {
    let lower = name.to_lowercase();
    for (category, needles) in CATEGORIES {
        if needles.iter().any(|needle| lower.contains(needle)) {
            return category;
        }
    }
    "other"
}

/// Build a single-file block bundle from raw content
fn simple_bundle(name: &str, content: String) -> BlockBundle {
    let description = extract_leading_description(&content);
    let dependencies = extract_dependencies(&content);
    let components_used = extract_component_usage(&content);
    BlockBundle {
        name: name.to_string(),
        kind: BlockKind::Simple,
        description,
        usage: format!(
            "Copy {name}.tsx into your project and import the block component from it."
        ),
        code: Some(content),
        files: IndexMap::new(),
        dependencies,
        components_used,
    }
}

/// Fold one file's extractions into the bundle aggregates
fn absorb(bundle: &mut BlockBundle, content: &str) {
    if bundle.description.is_none() {
        bundle.description = extract_leading_description(content);
    }
    bundle.dependencies.extend(extract_dependencies(content));
    bundle.components_used.extend(extract_component_usage(content));
}

/// Generate the usage note for a complex block from its file map
fn complex_usage_note(name: &str, files: &IndexMap<String, BlockEntry>) -> String {
    let mut top_level = Vec::new();
    let mut sub_dirs = Vec::new();
    for (entry_name, entry) in files {
        match entry {
            BlockEntry::File(_) => top_level.push(entry_name.as_str()),
            BlockEntry::Directory(children) => {
                let listed: Vec<&str> = children.keys().map(String::as_str).collect();
                sub_dirs.push(format!("{}/ ({})", entry_name, listed.join(", ")));
            }
        }
    }
    let mut note = format!(
        "Create a '{name}' folder and copy these files into it: {}.",
        top_level.join(", ")
    );
    if !sub_dirs.is_empty() {
        note.push_str(&format!(" Sub-directories: {}.", sub_dirs.join("; ")));
    }
    note
}
