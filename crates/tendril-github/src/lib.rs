//! GitHub API client for the Tendril registry fetcher.
//!
//! This crate provides HTTP access to the two endpoints Tendril reads from:
//! the repository contents (listing) endpoint and the raw-file endpoint.
//! Responses are mapped to the typed error taxonomy in `tendril-core`; no
//! retries happen at this layer.

pub mod api;
pub mod client;

// Re-export main types
pub use api::{ContentEntry, EntryType, Listing};
pub use client::{GithubClient, RepoConfig};
