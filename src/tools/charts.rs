//! Chart generation tools
//!
//! Render the sampled conversion curve with the converted value highlighted,
//! as PNG bytes or a PNG file.

use std::ops::Range;
use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageFormat, RgbImage};
use serde::Serialize;
use thiserror::Error;

use crate::conversion::{convert, format_result, sample_conversion, ConversionSeries};
use crate::tools::convert::ConversionRequest;

// ============================================================================
// Color Constants (RGB 0-255)
// ============================================================================

const COLOR_LINE: (u8, u8, u8) = (106, 17, 203);     // Purple curve
const COLOR_POINT: (u8, u8, u8) = (255, 0, 0);       // Red highlight
const COLOR_PLOT_BG: (u8, u8, u8) = (30, 30, 30);    // Dark plotting area
const COLOR_TEXT: (u8, u8, u8) = (0, 0, 0);

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 600;
const MIN_DIMENSION: u32 = 200;
const MAX_DIMENSION: u32 = 4000;

/// Chart error types
#[derive(Debug, Error)]
pub enum ChartError {
    /// The request cannot be charted; nothing was drawn or written
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Chart rendering failed: {0}")]
    Render(String),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ChartResult<T> = Result<T, ChartError>;

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Response for render_conversion_chart
#[derive(Debug, Serialize)]
pub struct RenderChartResponse {
    pub success: bool,
    pub file_path: String,
    pub value: f64,
    pub result: f64,
    pub formatted_result: String,
    pub point_count: usize,
    pub width: u32,
    pub height: u32,
    pub message: String,
}

/// Axis ranges covering the series and the highlighted point, with padding
pub fn axis_ranges(series: &ConversionSeries, value: f64, result: f64) -> (Range<f64>, Range<f64>) {
    let x_min = series.points.iter().map(|p| p.x).fold(value, f64::min);
    let x_max = series.points.iter().map(|p| p.x).fold(value, f64::max);
    let (y_min, y_max) = series
        .y_range()
        .map(|(lo, hi)| (lo.min(result), hi.max(result)))
        .unwrap_or((result, result));

    (pad(x_min, x_max), pad(y_min, y_max))
}

fn pad(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    let margin = if span > 0.0 { span * 0.05 } else { min.abs().max(1.0) * 0.05 };
    (min - margin)..(max + margin)
}

/// File name for a chart of the given unit pair
pub fn chart_file_name(from_unit: &str, to_unit: &str) -> String {
    let slug = |s: &str| -> String {
        s.trim()
            .to_lowercase()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect()
    };
    format!("{}_to_{}.png", slug(from_unit), slug(to_unit))
}

fn check_dimension(name: &str, v: u32) -> ChartResult<u32> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&v) {
        Ok(v)
    } else {
        Err(ChartError::InvalidRequest(format!(
            "Chart {} must be between {} and {} pixels, got {}",
            name, MIN_DIMENSION, MAX_DIMENSION, v
        )))
    }
}

/// Plotters cannot lay out an axis over inf or NaN
fn check_finite(series: &ConversionSeries, value: f64, result: f64) -> ChartResult<()> {
    let non_finite = |what: &str, v: f64| {
        ChartError::InvalidRequest(format!(
            "Cannot chart {} to {}: {} {} is not finite",
            series.from_unit, series.to_unit, what, v
        ))
    };
    if !value.is_finite() {
        return Err(non_finite("value", value));
    }
    if !result.is_finite() {
        return Err(non_finite("converted value", result));
    }
    if let Some(p) = series.points.iter().find(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(non_finite("sampled value", if p.x.is_finite() { p.y } else { p.x }));
    }
    Ok(())
}

/// Generate the conversion chart as PNG bytes
pub fn generate_conversion_chart(
    series: &ConversionSeries,
    value: f64,
    result: f64,
    width: u32,
    height: u32,
) -> ChartResult<Vec<u8>> {
    use plotters::prelude::*;

    if series.points.is_empty() {
        return Err(ChartError::InvalidRequest("No data to chart".to_string()));
    }
    check_finite(series, value, result)?;

    let line_color = RGBColor(COLOR_LINE.0, COLOR_LINE.1, COLOR_LINE.2);
    let point_color = RGBColor(COLOR_POINT.0, COLOR_POINT.1, COLOR_POINT.2);
    let text_color = RGBColor(COLOR_TEXT.0, COLOR_TEXT.1, COLOR_TEXT.2);

    let from = series.from_unit.as_str();
    let to = series.to_unit.as_str();
    let (x_range, y_range) = axis_ranges(series, value, result);

    let mut buffer = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} to {} Conversion", from, to),
                ("sans-serif", 24).into_font().color(&text_color),
            )
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(x_range, y_range)
            .map_err(render_err)?;

        chart
            .plotting_area()
            .fill(&RGBColor(COLOR_PLOT_BG.0, COLOR_PLOT_BG.1, COLOR_PLOT_BG.2))
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .light_line_style(&WHITE.mix(0.05))
            .bold_line_style(&WHITE.mix(0.25))
            .x_desc(from)
            .y_desc(to)
            .axis_desc_style(("sans-serif", 16).into_font().color(&text_color))
            .label_style(("sans-serif", 13).into_font().color(&text_color))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(LineSeries::new(
                series.points.iter().map(|p| (p.x, p.y)),
                line_color.stroke_width(3),
            ))
            .map_err(render_err)?
            .label(format!("{} to {}", from, to))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(3)));

        // Highlighted converted value with annotation
        let annotation = format!("{} {}", format_result(result), to);
        chart
            .draw_series(std::iter::once(
                EmptyElement::at((value, result))
                    + Circle::new((0, 0), 6, point_color.filled())
                    + Text::new(annotation, (10, -20), ("sans-serif", 16).into_font().color(&point_color)),
            ))
            .map_err(render_err)?
            .label("Converted Value")
            .legend(move |(x, y)| Circle::new((x + 10, y), 5, point_color.filled()));

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.9))
            .border_style(BLACK)
            .draw()
            .map_err(render_err)?;

        root.present().map_err(render_err)?;
    }

    // Convert RGB buffer to PNG
    let img = RgbImage::from_raw(width, height, buffer).ok_or_else(|| render_err("Failed to create image from buffer"))?;

    let mut png_bytes = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut std::io::Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(render_err)?;

    Ok(png_bytes)
}

/// Convert, sample, render and write the chart for one conversion
///
/// `file_path` defaults to `<chart_dir>/<from>_to_<to>.png`.
pub fn render_conversion_chart(
    request: &ConversionRequest,
    chart_dir: &Path,
    file_path: Option<&str>,
    width: Option<u32>,
    height: Option<u32>,
) -> ChartResult<RenderChartResponse> {
    let width = check_dimension("width", width.unwrap_or(DEFAULT_WIDTH))?;
    let height = check_dimension("height", height.unwrap_or(DEFAULT_HEIGHT))?;

    let category = request.category().map_err(ChartError::InvalidRequest)?;
    let result = convert(request.value, &request.from_unit, &request.to_unit, category)
        .map_err(|e| ChartError::InvalidRequest(e.to_string()))?;
    let series = sample_conversion(category, &request.from_unit, &request.to_unit)
        .map_err(|e| ChartError::InvalidRequest(e.to_string()))?;

    let png = generate_conversion_chart(&series, request.value, result, width, height)?;

    let path = match file_path {
        Some(p) => PathBuf::from(p),
        None => chart_dir.join(chart_file_name(&request.from_unit, &request.to_unit)),
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| ChartError::Write {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }
    std::fs::write(&path, &png).map_err(|source| ChartError::Write {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!("Wrote chart {} ({} bytes)", path.display(), png.len());

    Ok(RenderChartResponse {
        success: true,
        file_path: path.display().to_string(),
        value: request.value,
        result,
        formatted_result: format_result(result),
        point_count: series.points.len(),
        width,
        height,
        message: format!(
            "Chart of {} to {} written with {} points",
            request.from_unit,
            request.to_unit,
            series.points.len()
        ),
    })
}
