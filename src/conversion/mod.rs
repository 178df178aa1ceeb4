//! Conversion engine
//!
//! Pure, deterministic unit conversion for a fixed catalog of categories.

pub mod converter;
pub mod sampling;
pub mod units;

pub use converter::{
    convert, convert_named, convert_temperature, format_result, parse_category, ConversionError,
    ConversionResult,
};
pub use sampling::{sample_conversion, sample_domain, ConversionSeries, SamplePoint, SAMPLE_POINTS};
pub use units::{Category, TemperatureUnit, ALL_CATEGORIES};
