//! Unit conversion functions
//!
//! Ratio conversion through a category's base unit, and the affine
//! temperature formulas.

use thiserror::Error;

use super::units::{Category, TemperatureUnit};

/// Conversion error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("Unknown unit '{unit}' for category {category}")]
    UnknownUnit { unit: String, category: Category },

    #[error("Unsupported category '{0}'")]
    UnsupportedCategory(String),
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convert a value between two units of the same category
///
/// Ratio categories compute `value * factor(from) / factor(to)`. Temperature
/// resolves both names and applies [`convert_temperature`]. Equal units
/// return `value` unchanged.
pub fn convert(value: f64, from_unit: &str, to_unit: &str, category: Category) -> ConversionResult<f64> {
    let unknown = |unit: &str| ConversionError::UnknownUnit {
        unit: unit.to_string(),
        category,
    };

    if category == Category::Temperature {
        let from = TemperatureUnit::from_name(from_unit).ok_or_else(|| unknown(from_unit))?;
        let to = TemperatureUnit::from_name(to_unit).ok_or_else(|| unknown(to_unit))?;
        return Ok(convert_temperature(value, from, to));
    }

    let from_factor = category.factor(from_unit).ok_or_else(|| unknown(from_unit))?;
    let to_factor = category.factor(to_unit).ok_or_else(|| unknown(to_unit))?;

    if from_unit.trim().eq_ignore_ascii_case(to_unit.trim()) {
        return Ok(value);
    }

    Ok(value * from_factor / to_factor)
}

/// Convert using a category name as received from a caller
pub fn convert_named(value: f64, from_unit: &str, to_unit: &str, category: &str) -> ConversionResult<f64> {
    let category = parse_category(category)?;
    convert(value, from_unit, to_unit, category)
}

/// Resolve a category name or fail with `UnsupportedCategory`
pub fn parse_category(name: &str) -> ConversionResult<Category> {
    Category::from_name(name).ok_or_else(|| ConversionError::UnsupportedCategory(name.to_string()))
}

/// Convert a temperature between Celsius, Fahrenheit and Kelvin
///
/// Pairs outside the six explicit formulas (the identity pairs) return the
/// input unchanged.
pub fn convert_temperature(value: f64, from_unit: TemperatureUnit, to_unit: TemperatureUnit) -> f64 {
    use TemperatureUnit::*;

    match (from_unit, to_unit) {
        (Celsius, Fahrenheit) => (value * 9.0 / 5.0) + 32.0,
        (Fahrenheit, Celsius) => (value - 32.0) * 5.0 / 9.0,
        (Celsius, Kelvin) => value + 273.15,
        (Kelvin, Celsius) => value - 273.15,
        (Fahrenheit, Kelvin) => (value - 32.0) * 5.0 / 9.0 + 273.15,
        (Kelvin, Fahrenheit) => (value - 273.15) * 9.0 / 5.0 + 32.0,
        _ => value,
    }
}

/// Format a converted value for display (fixed 2 decimals)
pub fn format_result(result: f64) -> String {
    format!("{:.2}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversion::units::ALL_CATEGORIES;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() < tolerance,
            "expected {} but got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_temperature_spot_checks() {
        let c_to_f = |v| convert(v, "celsius", "fahrenheit", Category::Temperature).unwrap();
        assert_eq!(c_to_f(0.0), 32.0);
        assert_eq!(c_to_f(100.0), 212.0);
        assert_eq!(convert(0.0, "celsius", "kelvin", Category::Temperature).unwrap(), 273.15);
        assert_eq!(convert(32.0, "fahrenheit", "celsius", Category::Temperature).unwrap(), 0.0);
    }

    #[test]
    fn test_temperature_all_formulas() {
        use TemperatureUnit::*;
        assert_close(convert_temperature(273.15, Kelvin, Celsius), 0.0);
        assert_close(convert_temperature(212.0, Fahrenheit, Kelvin), 373.15);
        assert_close(convert_temperature(373.15, Kelvin, Fahrenheit), 212.0);
        assert_close(convert_temperature(-40.0, Celsius, Fahrenheit), -40.0);
        assert_close(convert_temperature(-40.0, Fahrenheit, Celsius), -40.0);
    }

    #[test]
    fn test_temperature_identity_fallback() {
        for unit in TemperatureUnit::ALL {
            assert_eq!(convert_temperature(37.5, unit, unit), 37.5);
        }
    }

    #[test]
    fn test_length_spot_checks() {
        assert_close(convert(1.0, "mile", "meter", Category::Length).unwrap(), 1609.34);
        assert_eq!(convert(1.0, "kilometer", "meter", Category::Length).unwrap(), 1000.0);
        assert_close(convert(12.0, "inch", "foot", Category::Length).unwrap(), 1.0);
    }

    #[test]
    fn test_digital_storage_kilobyte_to_bit() {
        assert_eq!(convert(1.0, "kilobyte", "bit", Category::DigitalStorage).unwrap(), 8192.0);
        assert_close(convert(1.0, "gigabyte", "megabyte", Category::DigitalStorage).unwrap(), 1024.0);
    }

    #[test]
    fn test_pressure_spot_checks() {
        assert_eq!(convert(1.0, "bar", "pascal", Category::Pressure).unwrap(), 100000.0);
        assert_close(convert(1.0, "psi", "pascal", Category::Pressure).unwrap(), 6894.76);
    }

    #[test]
    fn test_fuel_economy_uses_table_ratio() {
        let result = convert(1.0, "kilometers per liter", "miles per gallon", Category::FuelEconomy).unwrap();
        assert_close(result, 0.425144);
    }

    #[test]
    fn test_same_unit_is_exact_identity() {
        let samples = [0.1, 1.0 / 3.0, 123456.789, -7.25, 1e-12];
        for category in ALL_CATEGORIES {
            for unit in category.units() {
                for v in samples {
                    assert_eq!(convert(v, unit, unit, category).unwrap(), v, "{} {}", category, unit);
                }
            }
        }
    }

    #[test]
    fn test_round_trip_every_pair() {
        let samples = [0.0, 1.0, 2.5, 99.9, 12345.678];
        for category in ALL_CATEGORIES {
            if category == Category::Temperature {
                continue;
            }
            let units = category.units();
            for a in &units {
                for b in &units {
                    for v in samples {
                        let there = convert(v, a, b, category).unwrap();
                        let back = convert(there, b, a, category).unwrap();
                        assert_close(back, v);
                    }
                }
            }
        }
    }

    #[test]
    fn test_temperature_round_trip() {
        for a in TemperatureUnit::ALL {
            for b in TemperatureUnit::ALL {
                let there = convert_temperature(21.3, a, b);
                assert!((convert_temperature(there, b, a) - 21.3).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_unknown_unit_is_rejected() {
        let err = convert(1.0, "meter", "gram", Category::Length).unwrap_err();
        assert_eq!(
            err,
            ConversionError::UnknownUnit {
                unit: "gram".to_string(),
                category: Category::Length
            }
        );

        let err = convert(1.0, "rankine", "kelvin", Category::Temperature).unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit { ref unit, .. } if unit == "rankine"));
    }

    #[test]
    fn test_unknown_unit_rejected_even_when_equal() {
        assert!(convert(1.0, "parsec", "parsec", Category::Length).is_err());
    }

    #[test]
    fn test_convert_named() {
        assert_eq!(convert_named(1.0, "bar", "pascal", "pressure").unwrap(), 100000.0);
        assert_eq!(
            convert_named(1.0, "a", "b", "Currency").unwrap_err(),
            ConversionError::UnsupportedCategory("Currency".to_string())
        );
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(1609.34), "1609.34");
        assert_eq!(format_result(2.0), "2.00");
        assert_eq!(format_result(0.005), "0.01");
        assert_eq!(format_result(-17.7777), "-17.78");
    }
}
