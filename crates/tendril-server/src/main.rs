//! # tendril
//!
//! Request server for retrieving UI component sources, demos, metadata and
//! prebuilt block layouts from a hosted GitHub repository.
//!
//! This is the composition root: it parses flags/environment, sets up
//! logging, wires the GitHub client, resolver and circuit breaker together,
//! and runs a newline-delimited JSON request loop over stdin/stdout.

use std::sync::Arc;

use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

use tendril_breaker::CircuitBreaker;
use tendril_github::{GithubClient, RepoConfig};
use tendril_resolver::Resolver;

mod facade;
mod validator;

use facade::Facade;

/// Registry fetcher for UI component sources and blocks
#[derive(Parser)]
#[command(name = "tendril", version, about = "UI component registry fetcher")]
struct Cli {
    /// GitHub bearer token; optional, raises the API quota
    #[arg(long, env = "GITHUB_TOKEN")]
    token: Option<String>,

    /// Repository owner to read from
    #[arg(long, default_value = "shadcn-ui")]
    owner: String,

    /// Repository name to read from
    #[arg(long, default_value = "ui")]
    repo: String,

    /// Branch to read from
    #[arg(long, default_value = "main")]
    branch: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// One inbound request line
#[derive(Deserialize)]
struct Request {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    args: Value,
}

/// One outbound response line
#[derive(Serialize)]
struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<WireError>,
}

/// Typed failure as seen on the wire
#[derive(Serialize)]
struct WireError {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    suggestion: Option<&'static str>,
}

impl Response {
    fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    fn failure(id: Option<Value>, code: &'static str, message: String, suggestion: Option<&'static str>) -> Self {
        Self {
            id,
            result: None,
            error: Some(WireError {
                code,
                message,
                suggestion,
            }),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    info!("Starting tendril v{}", env!("CARGO_PKG_VERSION"));

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run(cli))
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = Arc::new(GithubClient::new(cli.token)?);
    if !client.has_token() {
        warn!("no GitHub token configured; running at the lower unauthenticated quota");
    }

    let repo = RepoConfig::new(cli.owner, cli.repo, cli.branch);
    let resolver = Resolver::new(Arc::clone(&client), repo);
    let breaker = Arc::new(CircuitBreaker::default());
    let facade = Facade::new(client, resolver, breaker);

    serve(facade).await
}

/// Read newline-delimited JSON requests from stdin, answer on stdout
async fn serve(facade: Facade) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = respond(&facade, &line).await;
        let mut framed = serde_json::to_string(&response)?;
        framed.push('\n');
        stdout.write_all(framed.as_bytes()).await?;
        stdout.flush().await?;
    }
    Ok(())
}

async fn respond(facade: &Facade, line: &str) -> Response {
    let request: Request = match serde_json::from_str(line) {
        Ok(request) => request,
        Err(error) => {
            return Response::failure(
                None,
                "validation_failed",
                format!("Malformed request: {error}"),
                None,
            )
        }
    };

    match facade.handle(&request.method, request.args).await {
        Ok(result) => Response::success(request.id, result),
        Err(error) => {
            Response::failure(request.id, error.code(), error.to_string(), error.suggestion())
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tendril={level},tendril_server={level},tendril_resolver={level},tendril_github={level},tendril_breaker={level}"
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
