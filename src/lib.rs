//! Unit Converter (unitconv) Library
//!
//! Conversion engine, chart rendering and Gemini explanations.

pub mod build_info;
pub mod config;
pub mod conversion;
pub mod explain;
pub mod mcp;
pub mod tools;
