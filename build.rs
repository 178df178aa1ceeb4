//! Embeds a build counter, timestamp and cargo profile for the banner and status tool.

use std::fs;
use std::path::{Path, PathBuf};

const COUNTER_FILE: &str = "build_number.txt";

fn read_counter(path: &Path) -> u64 {
    fs::read_to_string(path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0)
}

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_default();
    let counter_path = manifest_dir.join(COUNTER_FILE);

    let build_number = read_counter(&counter_path) + 1;
    if let Err(e) = fs::write(&counter_path, build_number.to_string()) {
        println!("cargo:warning=could not update {}: {}", counter_path.display(), e);
    }

    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    for (key, value) in [
        ("UNITCONV_BUILD_NUMBER", build_number.to_string()),
        ("UNITCONV_BUILD_TIMESTAMP", timestamp),
        ("UNITCONV_BUILD_PROFILE", profile),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }
}
