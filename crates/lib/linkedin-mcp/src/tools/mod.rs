//! MCP tool modules.
//!
//! Tools are grouped by domain: feed reading, search, profile and company
//! lookup, sales intelligence, and contextual help.

pub mod feed;
pub mod profile;
pub mod sales;
pub mod search;
mod context;
