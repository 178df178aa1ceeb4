//! Unit Converter (unitconv)
//!
//! An MCP server for unit conversion, conversion charts and explanations.

use std::sync::Arc;

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use unitconv::build_info;
use unitconv::config::Config;
use unitconv::explain::{ExplainError, Explainer, GeminiClient};
use unitconv::mcp::UnitConvService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("unitconv=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    let config = Config::load();
    eprintln!("Chart directory: {}", config.chart_dir.display());

    // Conversion and chart tools are served even when explanations are unavailable
    let explainer: Option<Arc<dyn Explainer>> = match GeminiClient::from_config(config.gemini.as_ref()) {
        Ok(client) => {
            tracing::info!("Explanations enabled (model {})", client.model());
            Some(Arc::new(client) as Arc<dyn Explainer>)
        }
        Err(ExplainError::MissingApiKey) => {
            match &config.gemini_error {
                Some(e) => tracing::warn!("{}; explain_conversion is disabled", e),
                None => tracing::warn!("GEMINI_API_KEY not found in secrets or environment; explain_conversion is disabled"),
            }
            None
        }
        Err(e) => {
            tracing::warn!("Gemini client unavailable ({}); explain_conversion is disabled", e);
            None
        }
    };

    let service = UnitConvService::new(config.chart_dir, explainer);

    let transport = (stdin(), stdout());
    let server = service.serve(transport).await?;
    server.waiting().await?;

    Ok(())
}
