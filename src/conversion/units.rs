//! Unit types and conversion constants
//!
//! Provides the closed catalog of measurement categories, their units and the
//! factor tables relating each unit to its category's base unit.

use serde::{Deserialize, Serialize};

/// A measurement domain with its own closed set of units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    DataTransferRate,
    DigitalStorage,
    Energy,
    Frequency,
    FuelEconomy,
    Length,
    Mass,
    PlaneAngle,
    Pressure,
    Speed,
    Temperature,
    Time,
    Volume,
}

/// Every category, in display order
pub const ALL_CATEGORIES: [Category; 13] = [
    Category::DataTransferRate,
    Category::DigitalStorage,
    Category::Energy,
    Category::Frequency,
    Category::FuelEconomy,
    Category::Length,
    Category::Mass,
    Category::PlaneAngle,
    Category::Pressure,
    Category::Speed,
    Category::Temperature,
    Category::Time,
    Category::Volume,
];

impl Category {
    /// Human-readable name (e.g. "Data Transfer Rate")
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::DataTransferRate => "Data Transfer Rate",
            Category::DigitalStorage => "Digital Storage",
            Category::Energy => "Energy",
            Category::Frequency => "Frequency",
            Category::FuelEconomy => "Fuel Economy",
            Category::Length => "Length",
            Category::Mass => "Mass",
            Category::PlaneAngle => "Plane Angle",
            Category::Pressure => "Pressure",
            Category::Speed => "Speed",
            Category::Temperature => "Temperature",
            Category::Time => "Time",
            Category::Volume => "Volume",
        }
    }

    /// Parse from a display name, snake_case or kebab-case string
    pub fn from_name(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == '_' || c == '-' { ' ' } else { c })
            .collect();
        let normalized = normalized.split_whitespace().collect::<Vec<_>>().join(" ");

        ALL_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.display_name().to_lowercase() == normalized)
    }

    /// Factor table for ratio categories, `None` for Temperature
    pub fn factor_table(&self) -> Option<&'static [(&'static str, f64)]> {
        match self {
            Category::DataTransferRate => Some(DATA_TRANSFER_RATE),
            Category::DigitalStorage => Some(DIGITAL_STORAGE),
            Category::Energy => Some(ENERGY),
            Category::Frequency => Some(FREQUENCY),
            Category::FuelEconomy => Some(FUEL_ECONOMY),
            Category::Length => Some(LENGTH),
            Category::Mass => Some(MASS),
            Category::PlaneAngle => Some(PLANE_ANGLE),
            Category::Pressure => Some(PRESSURE),
            Category::Speed => Some(SPEED),
            Category::Temperature => None,
            Category::Time => Some(TIME),
            Category::Volume => Some(VOLUME),
        }
    }

    /// Unit names of this category, in display order
    pub fn units(&self) -> Vec<&'static str> {
        match self.factor_table() {
            Some(table) => table.iter().map(|(name, _)| *name).collect(),
            None => TemperatureUnit::ALL.iter().map(|u| u.name()).collect(),
        }
    }

    /// The unit whose factor is 1.0 (Celsius for Temperature)
    pub fn base_unit(&self) -> &'static str {
        match self.factor_table() {
            Some(table) => table[0].0,
            None => TemperatureUnit::Celsius.name(),
        }
    }

    /// Look up a unit's factor relative to the base unit
    pub fn factor(&self, unit: &str) -> Option<f64> {
        let lower = unit.to_lowercase();
        let trimmed = lower.trim();

        self.factor_table()?
            .iter()
            .find(|(name, _)| *name == trimmed)
            .map(|(_, factor)| *factor)
    }

    /// Whether a unit name belongs to this category
    pub fn has_unit(&self, unit: &str) -> bool {
        match self {
            Category::Temperature => TemperatureUnit::from_name(unit).is_some(),
            _ => self.factor(unit).is_some(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Temperature units; converted with affine formulas instead of a factor table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 3] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Kelvin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
            TemperatureUnit::Kelvin => "kelvin",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "celsius" => Some(TemperatureUnit::Celsius),
            "fahrenheit" => Some(TemperatureUnit::Fahrenheit),
            "kelvin" => Some(TemperatureUnit::Kelvin),
            _ => None,
        }
    }
}

// ============================================================================
// Factor Tables (base unit first, factor 1.0)
// ============================================================================

pub const LENGTH: &[(&str, f64)] = &[
    ("meter", 1.0),
    ("kilometer", 1000.0),
    ("centimeter", 0.01),
    ("millimeter", 0.001),
    ("mile", 1609.34),
    ("yard", 0.9144),
    ("foot", 0.3048),
    ("inch", 0.0254),
];

pub const MASS: &[(&str, f64)] = &[
    ("kilogram", 1.0),
    ("gram", 0.001),
    ("milligram", 0.000001),
    ("pound", 0.453592),
    ("ounce", 0.0283495),
];

/// Month and year use the Julian year (365.25 days)
pub const TIME: &[(&str, f64)] = &[
    ("second", 1.0),
    ("millisecond", 0.001),
    ("minute", 60.0),
    ("hour", 3600.0),
    ("day", 86400.0),
    ("week", 604800.0),
    ("month", 2629800.0),
    ("year", 31557600.0),
];

/// US customary volumes, except the 240 ml metric cup
pub const VOLUME: &[(&str, f64)] = &[
    ("liter", 1.0),
    ("milliliter", 0.001),
    ("gallon", 3.78541),
    ("quart", 0.946353),
    ("pint", 0.473176),
    ("cup", 0.24),
    ("tablespoon", 0.0147868),
    ("teaspoon", 0.00492892),
];

pub const DATA_TRANSFER_RATE: &[(&str, f64)] = &[
    ("bit per second", 1.0),
    ("kilobit per second", 1000.0),
    ("megabit per second", 1000000.0),
    ("gigabit per second", 1000000000.0),
    ("byte per second", 8.0),
    ("kilobyte per second", 8000.0),
    ("megabyte per second", 8000000.0),
    ("gigabyte per second", 8000000000.0),
];

/// Binary multiples (1 kilobyte = 1024 bytes)
pub const DIGITAL_STORAGE: &[(&str, f64)] = &[
    ("bit", 1.0),
    ("byte", 8.0),
    ("kilobyte", 8192.0),
    ("megabyte", 8388608.0),
    ("gigabyte", 8589934592.0),
    ("terabyte", 8796093022208.0),
];

pub const ENERGY: &[(&str, f64)] = &[
    ("joule", 1.0),
    ("kilojoule", 1000.0),
    ("calorie", 4.184),
    ("kilocalorie", 4184.0),
    ("watt-hour", 3600.0),
    ("kilowatt-hour", 3600000.0),
];

pub const FREQUENCY: &[(&str, f64)] = &[
    ("hertz", 1.0),
    ("kilohertz", 1000.0),
    ("megahertz", 1000000.0),
    ("gigahertz", 1000000000.0),
];

pub const FUEL_ECONOMY: &[(&str, f64)] = &[
    ("miles per gallon", 1.0),
    ("kilometers per liter", 0.425144),
    ("liters per 100 kilometers", 235.214583),
];

pub const PLANE_ANGLE: &[(&str, f64)] = &[
    ("degree", 1.0),
    ("radian", 57.2958),
    ("gradian", 0.9),
];

pub const PRESSURE: &[(&str, f64)] = &[
    ("pascal", 1.0),
    ("kilopascal", 1000.0),
    ("bar", 100000.0),
    ("psi", 6894.76),
];

pub const SPEED: &[(&str, f64)] = &[
    ("meter per second", 1.0),
    ("kilometer per hour", 0.277778),
    ("mile per hour", 0.44704),
    ("knot", 0.514444),
];
