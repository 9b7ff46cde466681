//! Transports for the LinkedIn MCP server.
//!
//! Both runners take a `ServerDeps` and build one `LinkedinMcp` per session.
//! The HTTP runner also answers `GET /health` and stops on Ctrl-C.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use linkedin_core::api::LinkedinApi;
use linkedin_core::control::ScoringConfig;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use tracing::{info, warn};

use crate::{BuildClientFn, LinkedinMcp};

pub type ServeResult = Result<(), Box<dyn Error + Send + Sync>>;

const DEFAULT_PORT: u16 = 4030;

/// Client factory and scoring weights shared by every session.
pub struct ServerDeps<A: LinkedinApi> {
    pub build_client: BuildClientFn<A>,
    pub scoring: Arc<ScoringConfig>,
}

impl<A: LinkedinApi> Clone for ServerDeps<A> {
    fn clone(&self) -> Self {
        Self {
            build_client: Arc::clone(&self.build_client),
            scoring: Arc::clone(&self.scoring),
        }
    }
}

impl<A: LinkedinApi> ServerDeps<A> {
    #[must_use]
    pub const fn new(build_client: BuildClientFn<A>, scoring: Arc<ScoringConfig>) -> Self {
        Self {
            build_client,
            scoring,
        }
    }

    fn session(&self) -> LinkedinMcp<A> {
        LinkedinMcp::with_scoring(Arc::clone(&self.build_client), Arc::clone(&self.scoring))
    }
}

/// Streamable HTTP listener settings.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    pub stateful_mode: bool,
    /// Interval between SSE keep-alive pings; `None` disables them.
    pub sse_keep_alive: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
        }
    }

    #[must_use]
    pub const fn with_stateful_mode(mut self, stateful_mode: bool) -> Self {
        self.stateful_mode = stateful_mode;
        self
    }

    fn transport(&self) -> StreamableHttpServerConfig {
        StreamableHttpServerConfig {
            sse_keep_alive: self.sse_keep_alive,
            stateful_mode: self.stateful_mode,
            ..Default::default()
        }
    }
}

impl Default for McpHttpServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)))
    }
}

/// Runs a single MCP session over stdin/stdout until the client disconnects.
///
/// # Errors
/// Returns any transport or server error.
pub async fn serve_stdio<A: LinkedinApi>(deps: ServerDeps<A>) -> ServeResult {
    info!("serving MCP over stdio");
    let running = serve_server(deps.session(), stdio()).await?;
    let reason = running.waiting().await?;
    info!(?reason, "stdio session closed");
    Ok(())
}

/// Serves MCP at `/mcp` and a plain-text `/health` until Ctrl-C.
///
/// # Errors
/// Returns any listener or server error.
pub async fn serve_streamable_http<A: LinkedinApi>(
    deps: ServerDeps<A>,
    config: McpHttpServerConfig,
) -> ServeResult {
    let mcp: StreamableHttpService<LinkedinMcp<A>, LocalSessionManager> =
        StreamableHttpService::new(
            move || Ok(deps.session()),
            Arc::new(LocalSessionManager::default()),
            config.transport(),
        );
    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .nest_service("/mcp", mcp);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, stateful = config.stateful_mode, "serving MCP over streamable HTTP");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "could not listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
