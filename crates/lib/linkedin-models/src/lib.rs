//! Upstream record models and schema helpers for linkedin-mcp.
//!
//! This crate defines the records read from the networking platform and the
//! constants (URL bases, internal type keys) shared by the client and the
//! control plane.

pub mod models;
pub mod schema;

pub use models::*;
