//! Conversion MCP Tools
//!
//! Category listing, scalar conversion and chart sampling.

use serde::Serialize;

use crate::conversion::{
    convert, format_result, parse_category, sample_conversion, Category, ConversionSeries,
    ALL_CATEGORIES,
};

/// A conversion as supplied by a caller
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    pub value: f64,
    pub category: String,
    pub from_unit: String,
    pub to_unit: String,
}

/// Response for convert_units
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResponse {
    pub value: f64,
    pub category: String,
    pub from_unit: String,
    pub to_unit: String,
    pub result: f64,
    /// Result rounded to 2 decimals for display
    pub formatted_result: String,
}

/// Category with its units for list_categories
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub name: &'static str,
    pub base_unit: &'static str,
    pub units: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct ListCategoriesResponse {
    pub categories: Vec<CategorySummary>,
    pub total: usize,
}

/// Response for sample_conversion
#[derive(Debug, Serialize)]
pub struct SampleResponse {
    pub category: String,
    pub from_unit: String,
    pub to_unit: String,
    pub point_count: usize,
    pub series: ConversionSeries,
}

impl ConversionRequest {
    pub fn new(value: f64, category: &str, from_unit: &str, to_unit: &str) -> Self {
        Self {
            value,
            category: category.to_string(),
            from_unit: from_unit.to_string(),
            to_unit: to_unit.to_string(),
        }
    }

    pub fn category(&self) -> Result<Category, String> {
        parse_category(&self.category).map_err(|e| e.to_string())
    }
}

fn summarize(category: Category) -> CategorySummary {
    CategorySummary {
        name: category.display_name(),
        base_unit: category.base_unit(),
        units: category.units(),
    }
}

/// List every category with its units
pub fn list_categories() -> ListCategoriesResponse {
    let categories: Vec<CategorySummary> = ALL_CATEGORIES.iter().copied().map(summarize).collect();
    let total = categories.len();
    ListCategoriesResponse { categories, total }
}

/// List the units of one category
pub fn list_units(category: &str) -> Result<CategorySummary, String> {
    let category = parse_category(category).map_err(|e| e.to_string())?;
    Ok(summarize(category))
}

/// Convert a single value
pub fn convert_units(request: &ConversionRequest) -> Result<ConvertResponse, String> {
    let category = request.category()?;
    let result = convert(request.value, &request.from_unit, &request.to_unit, category)
        .map_err(|e| e.to_string())?;

    tracing::debug!(
        "{} {} -> {} {} ({})",
        request.value,
        request.from_unit,
        result,
        request.to_unit,
        category
    );

    Ok(ConvertResponse {
        value: request.value,
        category: category.display_name().to_string(),
        from_unit: request.from_unit.clone(),
        to_unit: request.to_unit.clone(),
        result,
        formatted_result: format_result(result),
    })
}

/// Sample the conversion curve over the chart domain
pub fn sample(category: &str, from_unit: &str, to_unit: &str) -> Result<SampleResponse, String> {
    let category = parse_category(category).map_err(|e| e.to_string())?;
    let series = sample_conversion(category, from_unit, to_unit).map_err(|e| e.to_string())?;

    Ok(SampleResponse {
        category: category.display_name().to_string(),
        from_unit: from_unit.to_string(),
        to_unit: to_unit.to_string(),
        point_count: series.points.len(),
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_categories() {
        let response = list_categories();
        assert_eq!(response.total, 13);
        assert_eq!(response.categories[0].name, "Data Transfer Rate");
        let length = response.categories.iter().find(|c| c.name == "Length").unwrap();
        assert_eq!(length.base_unit, "meter");
        assert_eq!(length.units.len(), 8);
    }

    #[test]
    fn test_list_units() {
        let summary = list_units("plane angle").unwrap();
        assert_eq!(summary.units, vec!["degree", "radian", "gradian"]);
        assert!(list_units("Colour").unwrap_err().contains("Unsupported category"));
    }

    #[test]
    fn test_convert_units_formats_result() {
        let request = ConversionRequest::new(1.0, "Length", "mile", "meter");
        let response = convert_units(&request).unwrap();
        assert_eq!(response.formatted_result, "1609.34");
        assert_eq!(response.category, "Length");

        let request = ConversionRequest::new(30.0, "temperature", "celsius", "fahrenheit");
        assert_eq!(convert_units(&request).unwrap().formatted_result, "86.00");
    }

    #[test]
    fn test_convert_units_rejects_foreign_unit() {
        let request = ConversionRequest::new(1.0, "Mass", "kilogram", "liter");
        let err = convert_units(&request).unwrap_err();
        assert!(err.contains("Unknown unit 'liter'"), "{}", err);
    }

    #[test]
    fn test_sample_contains_scalar_point() {
        let domain = crate::conversion::sample_domain();
        let x = domain[42];
        let scalar = convert_units(&ConversionRequest::new(x, "Speed", "knot", "kilometer per hour"))
            .unwrap()
            .result;
        let response = sample("Speed", "knot", "kilometer per hour").unwrap();
        assert_eq!(response.point_count, 100);
        assert_eq!(response.series.points[42].y, scalar);
    }
}
