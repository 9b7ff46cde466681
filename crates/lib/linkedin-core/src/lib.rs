//! Core client and control plane for linkedin-mcp.
//!
//! This crate owns the upstream client seam (`LinkedinApi`) with its Voyager
//! HTTP and in-memory implementations, and the control plane that turns
//! upstream records into search results, sales heuristics and outreach context.

pub mod api;
pub mod control;
