//! Chart sampling
//!
//! Applies the scalar converter over a fixed domain so the plotted curve and
//! the displayed result always agree.

use serde::Serialize;

use super::converter::{convert, ConversionResult};
use super::units::Category;

/// Number of points in the sample domain
pub const SAMPLE_POINTS: usize = 100;
/// Start of the sample domain
pub const DOMAIN_START: f64 = 0.0;
/// End of the sample domain (inclusive)
pub const DOMAIN_END: f64 = 100.0;

/// A single (x, y) point of a conversion curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

/// The conversion function sampled over the domain
#[derive(Debug, Clone, Serialize)]
pub struct ConversionSeries {
    pub category: Category,
    pub from_unit: String,
    pub to_unit: String,
    pub points: Vec<SamplePoint>,
}

impl ConversionSeries {
    /// Smallest and largest y value, if any points exist
    pub fn y_range(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let min = self.points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max = self.points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
            values[count - 1] = end;
            values
        }
    }
}

/// The x values of the chart domain
pub fn sample_domain() -> Vec<f64> {
    linspace(DOMAIN_START, DOMAIN_END, SAMPLE_POINTS)
}

/// Sample the conversion between two units over the chart domain
pub fn sample_conversion(category: Category, from_unit: &str, to_unit: &str) -> ConversionResult<ConversionSeries> {
    let points = sample_domain()
        .into_iter()
        .map(|x| Ok(SamplePoint { x, y: convert(x, from_unit, to_unit, category)? }))
        .collect::<ConversionResult<Vec<_>>>()?;

    Ok(ConversionSeries {
        category,
        from_unit: from_unit.to_string(),
        to_unit: to_unit.to_string(),
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::ConversionError;

    #[test]
    fn test_linspace_endpoints() {
        let xs = sample_domain();
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[99], 100.0);
        assert!((xs[1] - 100.0 / 99.0).abs() < 1e-12);
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_linspace_small_counts() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(5.0, 10.0, 1), vec![5.0]);
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_sample_matches_scalar_result() {
        let series = sample_conversion(Category::Temperature, "celsius", "fahrenheit").unwrap();
        for (i, point) in series.points.iter().enumerate() {
            let scalar = convert(point.x, "celsius", "fahrenheit", Category::Temperature).unwrap();
            assert_eq!(point.y, scalar, "index {}", i);
        }
        assert_eq!(series.points[0].y, 32.0);
        assert_eq!(series.points[99].y, 212.0);
    }

    #[test]
    fn test_sample_ratio_category() {
        let series = sample_conversion(Category::Length, "kilometer", "meter").unwrap();
        assert_eq!(series.points[99].y, 100000.0);
        assert_eq!(series.y_range(), Some((0.0, 100000.0)));
    }

    #[test]
    fn test_sample_unknown_unit() {
        let err = sample_conversion(Category::Mass, "kilogram", "stone").unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit { .. }));
    }
}
