//! Status Tool
//!
//! Provides runtime status information about the unitconv service.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::conversion::ALL_CATEGORIES;

/// Conversion instructions for AI assistants
pub const CONVERSION_INSTRUCTIONS: &str = r#"
# Unit Converter Instructions

## Workflow

1. Call `list_categories` (or `list_units` for one category) to get the exact unit names.
2. Call `convert_units` with `value`, `category`, `from_unit` and `to_unit`.
3. Report `formatted_result` (2 decimals) to the user. `result` is the unrounded value.
4. Optional: `render_conversion_chart` writes a PNG of the conversion curve from 0 to 100
   with the converted value highlighted. `sample_conversion` returns the same 100 points as data.
5. Optional: `explain_conversion` asks Gemini to explain the result. If it returns a `notice`
   instead of an `explanation`, the conversion itself is still valid - show the result and the notice.

## Rules

- Units must belong to the chosen category. "meter" is not a Mass unit; the call fails instead of guessing.
- Unit names are lowercase and may contain spaces: "bit per second", "liters per 100 kilometers".
- Category names accept "Data Transfer Rate", "data_transfer_rate" or "data-transfer-rate".
- Digital Storage uses binary multiples (1 kilobyte = 1024 bytes); Data Transfer Rate uses decimal ones.
- Temperature converts between celsius, fahrenheit and kelvin only.
"#;

/// Runtime status of the service
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub version: &'static str,
    pub build_profile: &'static str,
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
    pub category_count: usize,
    pub explanations_enabled: bool,
    pub explanation_model: Option<String>,
    pub chart_dir: String,
}

/// Tracks service runtime information
pub struct StatusTracker {
    start_time: Instant,
    started_at: String,
    chart_dir: PathBuf,
    explanation_model: Option<String>,
}

impl StatusTracker {
    pub fn new(chart_dir: PathBuf, explanation_model: Option<String>) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
            chart_dir,
            explanation_model,
        }
    }

    pub fn get_status(&self) -> ServiceStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        ServiceStatus {
            build_number: build_info.build_number,
            build_timestamp: build_info.build_timestamp,
            version: build_info.version,
            build_profile: build_info.profile,
            started_at: self.started_at.clone(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            category_count: ALL_CATEGORIES.len(),
            explanations_enabled: self.explanation_model.is_some(),
            explanation_model: self.explanation_model.clone(),
            chart_dir: self.chart_dir.display().to_string(),
        }
    }
}
