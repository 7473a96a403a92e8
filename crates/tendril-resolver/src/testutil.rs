//! Shared helpers for resolver tests

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tendril_github::{GithubClient, RepoConfig};

use crate::{RegistryPaths, Resolver};

/// Short registry roots so test mock paths stay readable
pub(crate) fn short_paths() -> RegistryPaths {
    RegistryPaths {
        components_root: "ui".to_string(),
        demos_root: "examples".to_string(),
        blocks_root: "blocks".to_string(),
        metadata_root: "r".to_string(),
    }
}

/// Resolver pointed at a mock server, default repo coordinates
pub(crate) fn resolver_for(server: &MockServer) -> Resolver {
    let client =
        Arc::new(GithubClient::with_endpoints(server.uri(), server.uri(), None).unwrap());
    Resolver::with_paths(client, RepoConfig::default(), short_paths())
}

/// One contents-listing entry as the API would return it
pub(crate) fn entry(name: &str, repo_path: &str, entry_type: &str) -> Value {
    json!({
        "name": name,
        "path": repo_path,
        "type": entry_type,
        "size": 0,
        "download_url": if entry_type == "file" {
            Some(format!("https://example.com/{repo_path}"))
        } else {
            None
        },
        "sha": "testsha",
    })
}

/// Mount a listing response for a contents path
pub(crate) async fn mount_listing(server: &MockServer, repo_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/shadcn-ui/ui/contents/{repo_path}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

/// Mount a raw-file response
pub(crate) async fn mount_raw(server: &MockServer, repo_path: &str, content: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/shadcn-ui/ui/main/{repo_path}")))
        .respond_with(ResponseTemplate::new(200).set_body_string(content))
        .mount(server)
        .await;
}
