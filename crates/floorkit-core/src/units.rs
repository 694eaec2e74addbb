//! Length units
//!
//! Scene coordinates are millimeters. These helpers format lengths for
//! labels and parse what a user types, either in a property field
//! ("2.4 m") or into the draw-wall length buffer ("1500").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display unit for lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Millimeter,
    Centimeter,
    Meter,
}

impl LengthUnit {
    /// Millimeters per one of this unit
    pub fn mm_per_unit(self) -> f64 {
        match self {
            Self::Millimeter => 1.0,
            Self::Centimeter => 10.0,
            Self::Meter => 1000.0,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" => Ok(Self::Millimeter),
            "cm" | "centimeter" | "centimeters" => Ok(Self::Centimeter),
            "m" | "meter" | "meters" => Ok(Self::Meter),
            other => Err(format!("Unknown length unit: {}", other)),
        }
    }
}

/// Format a length for display
///
/// Millimeters print without decimals, larger units with two.
pub fn format_length(value_mm: f64, unit: LengthUnit) -> String {
    let value = value_mm / unit.mm_per_unit();
    match unit {
        LengthUnit::Millimeter => format!("{:.0} {}", value, unit),
        _ => format!("{:.2} {}", value, unit),
    }
}

/// Parse a length with an optional unit suffix into millimeters
///
/// A bare number is read in `default_unit`.
pub fn parse_length(input: &str, default_unit: LengthUnit) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty length".to_string());
    }

    let split = input
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    let (number, suffix) = input.split_at(split);
    let unit = if suffix.trim().is_empty() {
        default_unit
    } else {
        suffix.parse::<LengthUnit>()?
    };

    let value = number
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("Invalid length '{}': {}", number.trim(), e))?;
    if !value.is_finite() {
        return Err(format!("Invalid length '{}'", input));
    }
    Ok(value * unit.mm_per_unit())
}

/// Whether a keystroke may enter the typed-length buffer
pub fn is_length_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Parse the typed-length buffer.
///
/// Only a finite, strictly positive number is a usable length; everything
/// else (empty, "..", "0") yields `None`.
pub fn parse_typed_length(buffer: &str) -> Option<f64> {
    buffer
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
