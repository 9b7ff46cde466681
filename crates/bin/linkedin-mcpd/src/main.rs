use std::error::Error;
use std::sync::Arc;

use linkedin_core::api::VoyagerClient;
use linkedin_core::control::search::render_jobs;
use linkedin_core::control::{ControlError, LinkedinControlPlane};
use linkedin_mcp::server::{self, McpHttpServerConfig, ServerDeps};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod client;
mod config;

use crate::config::LinkedinConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = LinkedinConfig::from_args()?;
    init_tracing(&config.log_filter);
    info!(
        stdio = config.enable_stdio,
        smoke = config.smoke,
        timeout_secs = config.request_timeout.as_secs(),
        "starting linkedin-mcpd"
    );

    let scoring = Arc::new(config.load_scoring()?);
    let deps = ServerDeps::new(client::build_client(&config), scoring);

    if config.smoke {
        run_smoke(&deps).await;
        return Ok(());
    }

    if config.enable_stdio {
        server::serve_stdio(deps).await
    } else {
        let http = McpHttpServerConfig::new(config.mcp_http_addr);
        server::serve_streamable_http(deps, http).await
    }
}

// Logs go to stderr; stdout belongs to the stdio transport.
fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_smoke(deps: &ServerDeps<VoyagerClient>) {
    let outcome: Result<_, ControlError> = async {
        LinkedinControlPlane::new((deps.build_client)()?)
            .with_scoring(Arc::clone(&deps.scoring))
            .search_jobs("data engineer", Some("Jakarta"), 2, 0)
            .await
    }
    .await;

    match outcome {
        Ok(listings) => println!("{}", render_jobs(&listings)),
        Err(err) => println!("Error searching jobs: {err}"),
    }
}
