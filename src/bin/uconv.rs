//! Command line unit converter
//! Usage: cargo run --bin uconv -- convert 1 length mile meter --chart mile.png --explain

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use unitconv::config::Config;
use unitconv::explain::{Explainer, GeminiClient};
use unitconv::tools::charts;
use unitconv::tools::convert::{self, ConversionRequest};
use unitconv::tools::explain as explain_tool;

#[derive(Parser)]
#[command(name = "uconv")]
#[command(about = "Convert values between units of measurement", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a value and print the result
    #[command(allow_negative_numbers = true)]
    Convert {
        /// Value to convert
        value: f64,

        /// Category (e.g. "length", "data transfer rate")
        category: String,

        /// Source unit (quote multi-word units)
        from_unit: String,

        /// Target unit
        to_unit: String,

        /// Write a PNG chart of the conversion to this path
        #[arg(long)]
        chart: Option<PathBuf>,

        /// Ask Gemini to explain the conversion (requires GEMINI_API_KEY)
        #[arg(long)]
        explain: bool,

        /// Print the full response as JSON
        #[arg(long)]
        json: bool,
    },

    /// List categories, or the units of one category
    List {
        category: Option<String>,
    },

    /// Print the 100 sampled (x, y) points of a conversion
    Sample {
        category: String,
        from_unit: String,
        to_unit: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("unitconv=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            value,
            category,
            from_unit,
            to_unit,
            chart,
            explain,
            json,
        } => {
            let mut config = Config::load();

            // Fail before converting when an explanation was asked for but cannot be produced
            let explainer = if explain {
                if let Some(e) = config.gemini_error.take() {
                    return Err(e.into());
                }
                Some(GeminiClient::from_config(config.gemini.as_ref())?)
            } else {
                if let Some(e) = &config.gemini_error {
                    tracing::debug!("Ignoring explanation settings: {}", e);
                }
                None
            };

            let request = ConversionRequest::new(value, &category, &from_unit, &to_unit);
            let response = convert::convert_units(&request)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("Converted value: {} {}", response.formatted_result, response.to_unit);
            }

            if let Some(path) = chart {
                let rendered = charts::render_conversion_chart(
                    &request,
                    &config.chart_dir,
                    path.to_str(),
                    None,
                    None,
                )?;
                println!("Chart: {}", rendered.file_path);
            }

            if let Some(client) = explainer {
                let explained = explain_tool::explain_conversion(&request, Some(&client as &dyn Explainer)).await?;
                match (explained.explanation, explained.notice) {
                    (Some(text), _) => println!("\nGemini Explanation:\n{}", text),
                    (None, Some(notice)) => eprintln!("{}", notice),
                    (None, None) => {}
                }
            }
        }

        Commands::List { category } => match category {
            Some(name) => {
                let summary = convert::list_units(&name)?;
                println!("{} (base unit: {})", summary.name, summary.base_unit);
                for unit in summary.units {
                    println!("  {}", unit);
                }
            }
            None => {
                for summary in convert::list_categories().categories {
                    println!("{}: {}", summary.name, summary.units.join(", "));
                }
            }
        },

        Commands::Sample {
            category,
            from_unit,
            to_unit,
        } => {
            let sample = convert::sample(&category, &from_unit, &to_unit)?;
            println!("{}\t{}", from_unit, to_unit);
            for point in sample.series.points {
                println!("{:.4}\t{}", point.x, point.y);
            }
        }
    }

    Ok(())
}
