//! Request facade: validation, failure isolation and dispatch.
//!
//! Every inbound request passes Validator -> Circuit Breaker -> Resolver.
//! Validation failures never reach the breaker; breaker failures
//! short-circuit before any network attempt. The facade owns the shared
//! breaker instance so ownership is explicit at the composition root.

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::debug;

use tendril_breaker::CircuitBreaker;
use tendril_core::{TendrilError, TendrilResult};
use tendril_github::GithubClient;
use tendril_resolver::Resolver;

use crate::validator;

/// Dispatch target for all protocol methods
pub struct Facade {
    client: Arc<GithubClient>,
    resolver: Resolver,
    breaker: Arc<CircuitBreaker>,
}

impl Facade {
    /// Wire the facade up from the composition root's parts
    pub fn new(
        client: Arc<GithubClient>,
        resolver: Resolver,
        breaker: Arc<CircuitBreaker>,
    ) -> Self {
        Self {
            client,
            resolver,
            breaker,
        }
    }

    /// Handle one request: validate the arguments, then run the operation
    /// through the circuit breaker.
    pub async fn handle(&self, method: &str, args: Value) -> TendrilResult<Value> {
        let args = validator::validate(method, args)?;
        debug!(method, "dispatching request");

        match method {
            "get_component" => {
                let name = str_arg(&args, "componentName");
                let bundle = self
                    .breaker
                    .call(|| self.resolver.get_component_source(name))
                    .await?;
                to_result(&bundle)
            }
            "get_component_demo" => {
                let name = str_arg(&args, "componentName");
                let demo = self
                    .breaker
                    .call(|| self.resolver.get_component_demo(name))
                    .await?;
                to_result(&demo)
            }
            "get_component_metadata" => {
                let name = str_arg(&args, "componentName");
                let metadata = self
                    .breaker
                    .call(|| self.resolver.get_component_metadata(name))
                    .await?;
                to_result(&metadata)
            }
            "list_components" => {
                let listed = self.breaker.call(|| self.resolver.list_components()).await?;
                Ok(json!({
                    "components": listed.value,
                    "fallback": listed.fallback,
                }))
            }
            "get_block" => {
                let name = str_arg(&args, "blockName");
                let include_sub = args
                    .get("includeComponents")
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                let block = self
                    .breaker
                    .call(|| self.resolver.get_block_code(name, include_sub))
                    .await?;
                to_result(&block)
            }
            "list_blocks" => {
                let category = args.get("category").and_then(Value::as_str);
                let listing = self
                    .breaker
                    .call(|| self.resolver.list_blocks(category))
                    .await?;
                to_result(&listing)
            }
            "get_directory_structure" => {
                let tree = self
                    .breaker
                    .call(|| {
                        self.resolver.build_directory_tree(
                            owned_arg(&args, "owner"),
                            owned_arg(&args, "repo"),
                            owned_arg(&args, "path"),
                            owned_arg(&args, "branch"),
                        )
                    })
                    .await?;
                Ok(json!({
                    "tree": tree.value,
                    "fallback": tree.fallback,
                }))
            }
            // Credential update: no network call, so no breaker
            "configure" => {
                let token = owned_arg(&args, "token");
                self.client.set_token(token);
                Ok(json!({ "token_configured": self.client.has_token() }))
            }
            _ => Err(TendrilError::not_found(format!("method '{method}'"))),
        }
    }
}

/// Read a validated string argument (validation guarantees presence for
/// required fields)
fn str_arg<'a>(args: &'a Map<String, Value>, field: &str) -> &'a str {
    args.get(field).and_then(Value::as_str).unwrap_or_default()
}

/// Read an optional string argument as an owned value
fn owned_arg(args: &Map<String, Value>, field: &str) -> Option<String> {
    args.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Serialize an operation result for the protocol layer
fn to_result<T: serde::Serialize>(value: &T) -> TendrilResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| TendrilError::network("Failed to serialize result".to_string(), e))
}
