//! Tools module
//!
//! MCP tool implementations for the unit converter.

pub mod charts;
pub mod convert;
pub mod explain;
pub mod status;
