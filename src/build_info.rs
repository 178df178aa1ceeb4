//! Version and build metadata embedded by build.rs

use serde::Serialize;

use crate::conversion::ALL_CATEGORIES;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const RAW_BUILD_NUMBER: Option<&str> = option_env!("UNITCONV_BUILD_NUMBER");
const RAW_BUILD_TIMESTAMP: Option<&str> = option_env!("UNITCONV_BUILD_TIMESTAMP");
const RAW_BUILD_PROFILE: Option<&str> = option_env!("UNITCONV_BUILD_PROFILE");

#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    /// 0 when built without build.rs metadata
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub profile: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_raw(RAW_BUILD_NUMBER, RAW_BUILD_TIMESTAMP, RAW_BUILD_PROFILE)
    }

    fn from_raw(
        number: Option<&str>,
        timestamp: Option<&'static str>,
        profile: Option<&'static str>,
    ) -> Self {
        let fallback_profile = if cfg!(debug_assertions) { "debug" } else { "release" };
        Self {
            version: VERSION,
            build_number: number.and_then(|n| n.trim().parse().ok()).unwrap_or(0),
            build_timestamp: timestamp.unwrap_or("unknown"),
            profile: profile.unwrap_or(fallback_profile),
        }
    }

    /// e.g. `unitconv 1.0.0 (build 12, release)`
    pub fn label(&self) -> String {
        format!("unitconv {} (build {}, {})", self.version, self.build_number, self.profile)
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    let info = BuildInfo::current();
    let rule = "=".repeat(47);
    eprintln!("{}", rule);
    eprintln!("  Unit Converter MCP server");
    eprintln!("  {}", info.label());
    eprintln!("  Compiled: {} | {} categories", info.build_timestamp, ALL_CATEGORIES.len());
    eprintln!("{}", rule);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_metadata() {
        let info = BuildInfo::from_raw(Some("42"), Some("2026-01-01T00:00:00Z"), Some("release"));
        assert_eq!(info.build_number, 42);
        assert_eq!(info.label(), format!("unitconv {} (build 42, release)", VERSION));
    }

    #[test]
    fn test_missing_or_garbled_metadata() {
        let info = BuildInfo::from_raw(Some("4x"), None, None);
        assert_eq!(info.build_number, 0);
        assert_eq!(info.build_timestamp, "unknown");
        assert!(info.profile == "debug" || info.profile == "release");
    }
}
