//! Lexical extraction of imports, dependencies and component usage from
//! fetched source text.
//!
//! These are best-effort heuristics over raw text, not a parser: they never
//! fail, and false positives/negatives on unusual syntax are acceptable.
//! All functions are pure and return sets deduplicated in first-seen order.

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches import/export-from statements and captures the binding clause
/// (optional) and the module specifier.
static IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*(?:import|export)\s+(?:([\w\s{},*$]+?)\s+from\s+)?["']([^"']+)["']"#)
        .expect("import pattern is valid")
});

/// Matches CommonJS-style require calls.
static REQUIRE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"require\(\s*["']([^"']+)["']\s*\)"#).expect("require pattern is valid")
});

/// Matches the named-binding brace group of an import clause.
static NAMED_GROUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]*)\}").expect("named group pattern is valid"));

/// Matches a namespace binding (`* as ns`).
static NAMESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\s+as\s+([A-Za-z_$][\w$]*)").expect("namespace pattern is valid"));

/// Matches an opening markup tag with an uppercase name.
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([A-Z][\w]*)").expect("tag pattern is valid"));

/// True for relative and local-alias module specifiers, which are never
/// external dependencies.
fn is_local_specifier(spec: &str) -> bool {
    spec.starts_with("./") || spec.starts_with("../") || spec.starts_with('$') || spec.starts_with('/')
}

/// Collect external module specifiers from import/from statements and
/// require calls, in first-seen order.
pub fn extract_dependencies(text: &str) -> IndexSet<String> {
    let mut deps = IndexSet::new();
    for caps in IMPORT_RE.captures_iter(text) {
        if let Some(spec) = caps.get(2) {
            if !is_local_specifier(spec.as_str()) {
                deps.insert(spec.as_str().to_string());
            }
        }
    }
    for caps in REQUIRE_RE.captures_iter(text) {
        if let Some(spec) = caps.get(1) {
            if !is_local_specifier(spec.as_str()) {
                deps.insert(spec.as_str().to_string());
            }
        }
    }
    deps
}

/// Collect the identifier names bound by named, default and namespace
/// import bindings, in first-seen order.
pub fn extract_imports(text: &str) -> IndexSet<String> {
    let mut names = IndexSet::new();
    for caps in IMPORT_RE.captures_iter(text) {
        let Some(clause) = caps.get(1) else { continue };
        for name in clause_bindings(clause.as_str()) {
            names.insert(name);
        }
    }
    names
}

/// Collect component names: uppercase named-import bindings plus uppercase
/// tag names appearing in angle-bracket markup.
pub fn extract_component_usage(text: &str) -> IndexSet<String> {
    let mut components = IndexSet::new();
    for caps in IMPORT_RE.captures_iter(text) {
        let Some(clause) = caps.get(1) else { continue };
        let Some(group) = NAMED_GROUP_RE.captures(clause.as_str()) else {
            continue;
        };
        for name in named_bindings(&group[1]) {
            if name.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
                components.insert(name);
            }
        }
    }
    for caps in TAG_RE.captures_iter(text) {
        components.insert(caps[1].to_string());
    }
    components
}

/// Return the first line of the leading comment, trimmed, or None when no
/// comment precedes other content.
pub fn extract_leading_description(text: &str) -> Option<String> {
    let trimmed = text.trim_start();
    let (body, terminator) = if let Some(rest) = trimmed.strip_prefix("{/*") {
        (rest, Some("*/"))
    } else if let Some(rest) = trimmed.strip_prefix("/*") {
        (rest, Some("*/"))
    } else if let Some(rest) = trimmed.strip_prefix("<!--") {
        (rest, Some("-->"))
    } else if let Some(rest) = trimmed.strip_prefix("//") {
        (rest, None)
    } else {
        return None;
    };
    match terminator {
        // Line comment: the rest of the line
        None => {
            let line = body.lines().next().unwrap_or("").trim();
            (!line.is_empty()).then(|| line.to_string())
        }
        // Block comment: first non-empty line before the terminator,
        // decoration stripped
        Some(term) => {
            let inner = match body.find(term) {
                Some(end) => &body[..end],
                None => body,
            };
            inner
                .lines()
                .map(|line| line.trim().trim_start_matches('*').trim())
                .find(|line| !line.is_empty())
                .map(str::to_string)
        }
    }
}

/// Parse every identifier bound by one import clause.
fn clause_bindings(clause: &str) -> Vec<String> {
    let clause = clause.trim();
    let clause = clause.strip_prefix("type ").unwrap_or(clause);
    let mut bindings = Vec::new();

    let mut remainder = clause.to_string();
    if let Some(group) = NAMED_GROUP_RE.captures(clause) {
        bindings.extend(named_bindings(&group[1]));
        remainder = NAMED_GROUP_RE.replace(clause, "").into_owned();
    }
    if let Some(ns) = NAMESPACE_RE.captures(&remainder) {
        bindings.push(ns[1].to_string());
    } else {
        // Whatever identifier remains outside braces is the default binding
        let default = remainder
            .split(',')
            .map(str::trim)
            .find(|part| !part.is_empty() && *part != "*");
        if let Some(name) = default {
            if name.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
                bindings.push(name.to_string());
            }
        }
    }
    bindings
}

/// Parse the comma-separated bindings inside a named-import brace group,
/// honoring `as` renames.
fn named_bindings(group: &str) -> Vec<String> {
    group
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let part = part.strip_prefix("type ").unwrap_or(part);
            match part.rsplit_once(" as ") {
                Some((_, local)) => local.trim().to_string(),
                None => part.to_string(),
            }
        })
        .filter(|name| !name.is_empty())
        .collect()
}

#[cfg(test)]
mod tests;
