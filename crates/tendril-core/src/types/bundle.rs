//! Component bundle types: the aggregated result of one component request.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// One fetched source file with its locally extracted metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// Path relative to the repository root
    pub path: String,
    /// Raw file content
    pub content: String,
    /// Content size in bytes
    pub size: u64,
    /// Line count of the content
    pub lines: usize,
    /// External package specifiers imported by this file
    pub dependencies: IndexSet<String>,
    /// Identifier names bound by import statements in this file
    pub imports: IndexSet<String>,
}

impl SourceFile {
    /// Build a source file record from raw content, filling in the
    /// derived size and line count
    pub fn new(
        path: impl Into<String>,
        content: String,
        dependencies: IndexSet<String>,
        imports: IndexSet<String>,
    ) -> Self {
        let lines = content.split('\n').count();
        Self {
            path: path.into(),
            size: content.len() as u64,
            lines,
            content,
            dependencies,
            imports,
        }
    }
}

/// Aggregated result of a `get_component` request
///
/// Dependencies and imports are deduplicated in first-seen order and never
/// contain relative or local-alias specifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentBundle {
    /// Component name as requested
    pub name: String,
    /// Fetched source files in listing order
    pub files: Vec<SourceFile>,
    /// Union of per-file external dependencies
    pub dependencies: IndexSet<String>,
    /// Union of per-file import bindings
    pub imports: IndexSet<String>,
}

impl ComponentBundle {
    /// Create an empty bundle for a component
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
            dependencies: IndexSet::new(),
            imports: IndexSet::new(),
        }
    }

    /// Add a file, folding its extractions into the bundle aggregates
    pub fn push_file(&mut self, file: SourceFile) {
        self.dependencies.extend(file.dependencies.iter().cloned());
        self.imports.extend(file.imports.iter().cloned());
        self.files.push(file);
    }
}

/// Result of a `get_component_demo` request: the first conventional demo
/// file that resolved for the component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoBundle {
    /// Component name as requested
    pub name: String,
    /// Repository path of the demo file that resolved
    pub path: String,
    /// Raw demo content
    pub content: String,
    /// Line count of the content
    pub lines: usize,
    /// External package specifiers used by the demo
    pub dependencies: IndexSet<String>,
    /// Identifier names bound by import statements in the demo
    pub imports: IndexSet<String>,
}
