//! unitconv MCP Server Implementation
//!
//! Implements the MCP server with all conversion tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::explain::Explainer;
use crate::tools::charts::{self, ChartError};
use crate::tools::convert::{self, ConversionRequest};
use crate::tools::explain;
use crate::tools::status::StatusTracker;

/// unitconv MCP Service
#[derive(Clone)]
pub struct UnitConvService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    /// `None` when no API key is configured
    explainer: Option<Arc<dyn Explainer>>,
    chart_dir: PathBuf,
    tool_router: ToolRouter<UnitConvService>,
}

impl UnitConvService {
    pub fn new(chart_dir: PathBuf, explainer: Option<Arc<dyn Explainer>>) -> Self {
        let model = explainer.as_ref().map(|e| e.model().to_string());
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(chart_dir.clone(), model))),
            explainer,
            chart_dir,
            tool_router: Self::tool_router(),
        }
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListUnitsParams {
    /// Category name, e.g. "Length", "Data Transfer Rate" or "fuel_economy"
    pub category: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertUnitsParams {
    /// Value to convert
    pub value: f64,
    /// Category name (see list_categories)
    pub category: String,
    /// Source unit, must belong to the category
    pub from_unit: String,
    /// Target unit, must belong to the category
    pub to_unit: String,
}

impl From<&ConvertUnitsParams> for ConversionRequest {
    fn from(p: &ConvertUnitsParams) -> Self {
        ConversionRequest::new(p.value, &p.category, &p.from_unit, &p.to_unit)
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SampleConversionParams {
    /// Category name
    pub category: String,
    /// Source unit (x axis)
    pub from_unit: String,
    /// Target unit (y axis)
    pub to_unit: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct RenderChartParams {
    /// Value to highlight on the curve
    pub value: f64,
    /// Category name
    pub category: String,
    /// Source unit (x axis)
    pub from_unit: String,
    /// Target unit (y axis)
    pub to_unit: String,
    /// Output PNG path (defaults to the chart directory)
    pub file_path: Option<String>,
    /// Image width in pixels (default 1000)
    pub width: Option<u32>,
    /// Image height in pixels (default 600)
    pub height: Option<u32>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl UnitConvService {
    // --- Status ---

    #[tool(description = "Get the current status of the unitconv service including build info, explanation availability, and process information")]
    async fn unitconv_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status())
    }

    #[tool(description = "Get instructions for using the conversion tools. Call this when unsure which tool or unit names to use.")]
    fn conversion_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::CONVERSION_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(CONVERSION_INSTRUCTIONS)]))
    }

    // --- Catalog ---

    #[tool(description = "List all measurement categories with their base unit and unit names")]
    fn list_categories(&self) -> Result<CallToolResult, McpError> {
        json_result(&convert::list_categories())
    }

    #[tool(description = "List the unit names of one category")]
    fn list_units(&self, Parameters(p): Parameters<ListUnitsParams>) -> Result<CallToolResult, McpError> {
        let result = convert::list_units(&p.category).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    // --- Conversion ---

    #[tool(description = "Convert a value between two units of the same category. Returns the exact result and a 2-decimal formatted result.")]
    fn convert_units(&self, Parameters(p): Parameters<ConvertUnitsParams>) -> Result<CallToolResult, McpError> {
        tracing::info!("convert_units: {} {} -> {} ({})", p.value, p.from_unit, p.to_unit, p.category);
        let result = convert::convert_units(&ConversionRequest::from(&p))
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Sample the conversion function at 100 evenly spaced values from 0 to 100 and return the (x, y) points")]
    fn sample_conversion(&self, Parameters(p): Parameters<SampleConversionParams>) -> Result<CallToolResult, McpError> {
        let result = convert::sample(&p.category, &p.from_unit, &p.to_unit)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Render a PNG chart of the conversion curve from 0 to 100 with the converted value highlighted. Returns the file path.")]
    fn render_conversion_chart(&self, Parameters(p): Parameters<RenderChartParams>) -> Result<CallToolResult, McpError> {
        let request = ConversionRequest::new(p.value, &p.category, &p.from_unit, &p.to_unit);

        tracing::info!("render_conversion_chart: {} to {}", p.from_unit, p.to_unit);
        let result = charts::render_conversion_chart(
            &request,
            &self.chart_dir,
            p.file_path.as_deref(),
            p.width,
            p.height,
        )
        .map_err(|e| match e {
            ChartError::InvalidRequest(msg) => McpError::invalid_params(msg, None),
            other => McpError::internal_error(other.to_string(), None),
        })?;
        json_result(&result)
    }

    // --- Explanation ---

    #[tool(description = "Convert a value and ask Gemini to explain the conversion. The conversion result is always returned; if the explanation fails a notice is included instead.")]
    async fn explain_conversion(&self, Parameters(p): Parameters<ConvertUnitsParams>) -> Result<CallToolResult, McpError> {
        tracing::info!("explain_conversion: {} {} -> {}", p.value, p.from_unit, p.to_unit);
        let result = explain::explain_conversion(&ConversionRequest::from(&p), self.explainer.as_deref())
            .await
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for UnitConvService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "unitconv".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Unit Converter".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Unit Converter - convert values between units of 13 measurement categories. \
                 Call conversion_instructions first if unsure. \
                 Catalog: list_categories, list_units. \
                 Conversion: convert_units (report formatted_result). \
                 Charts: sample_conversion (data), render_conversion_chart (PNG file). \
                 Explanations: explain_conversion (Gemini; returns a notice if unavailable). \
                 Status: unitconv_status."
                    .into(),
            ),
        }
    }
}
