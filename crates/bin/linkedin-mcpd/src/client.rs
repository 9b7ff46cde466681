use std::sync::Arc;

use linkedin_core::api::{VoyagerClient, VoyagerConfig};
use linkedin_mcp::BuildClientFn;

use crate::config::LinkedinConfig;

/// Builds the per-call client factory. Each call gets a fresh session, so a
/// failed login never poisons later tool calls.
pub fn build_client(config: &LinkedinConfig) -> BuildClientFn<VoyagerClient> {
    let credentials = Arc::clone(&config.credentials);
    let voyager = VoyagerConfig::default().with_timeout(config.request_timeout);
    Arc::new(move || VoyagerClient::new(Arc::clone(&credentials), &voyager))
}
