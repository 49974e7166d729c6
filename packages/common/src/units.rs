//! Conversion between absolute (px) and relative (rem) spacing units

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Root font size assumed when converting between px and rem
pub const DEFAULT_BASE_SIZE: f64 = 16.0;

/// Decimal places kept for relative units
pub const REM_PRECISION: u32 = 3;

/// Spacing unit tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Px,
    Rem,
}

impl Unit {
    pub const NAMES: &'static [&'static str] = &["px", "rem"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Px => "px",
            Unit::Rem => "rem",
        }
    }

    /// Case-insensitive parse; `None` for anything other than px/rem
    pub fn parse(value: &str) -> Option<Unit> {
        match value.trim().to_ascii_lowercase().as_str() {
            "px" => Some(Unit::Px),
            "rem" => Some(Unit::Rem),
            _ => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round to a fixed number of decimals
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Convert a spacing value between units.
///
/// px→rem divides by `base_size` and keeps 3 decimals, rem→px multiplies and
/// rounds to a whole pixel. Identical units and unusable base sizes return the
/// value unchanged.
pub fn convert(value: f64, from: Unit, to: Unit, base_size: f64) -> f64 {
    if from == to || !base_size.is_finite() || base_size <= 0.0 {
        return value;
    }

    match (from, to) {
        (Unit::Px, Unit::Rem) => round_to(value / base_size, REM_PRECISION),
        (Unit::Rem, Unit::Px) => (value * base_size).round(),
        _ => value,
    }
}

/// String-tagged variant of [`convert`]. Unknown unit names leave the value untouched.
pub fn convert_units(value: f64, from: &str, to: &str, base_size: f64) -> f64 {
    match (Unit::parse(from), Unit::parse(to)) {
        (Some(from), Some(to)) => convert(value, from, to, base_size),
        _ => {
            debug!(from, to, "Unsupported unit pair, value left unchanged");
            value
        }
    }
}

/// Normalize a value expressed in `unit` to pixels
pub fn to_px(value: f64, unit: Unit, base_size: f64) -> f64 {
    match unit {
        Unit::Px => value,
        Unit::Rem => value * base_size,
    }
}

/// Render a number without trailing zeros (`1.500` → `1.5`, `40.0` → `40`)
pub fn format_number(value: f64) -> String {
    let rounded = round_to(value, REM_PRECISION);
    if rounded == 0.0 {
        return "0".to_string();
    }
    if rounded.fract() == 0.0 {
        return format!("{}", rounded as i64);
    }

    let text = format!("{:.3}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Render a length such as `40px` or `0.625rem`
pub fn format_length(value: f64, unit: Unit) -> String {
    format!("{}{}", format_number(value), unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_when_units_match() {
        assert_eq!(convert(13.0, Unit::Px, Unit::Px, 16.0), 13.0);
        assert_eq!(convert(0.815, Unit::Rem, Unit::Rem, 16.0), 0.815);
    }

    #[test]
    fn test_px_to_rem_rounds_to_three_decimals() {
        assert_eq!(convert(10.0, Unit::Px, Unit::Rem, 16.0), 0.625);
        assert_eq!(convert(7.0, Unit::Px, Unit::Rem, 16.0), 0.438);
        assert_eq!(convert(13.0, Unit::Px, Unit::Rem, 12.0), 1.083);
    }

    #[test]
    fn test_rem_to_px_rounds_to_integer() {
        assert_eq!(convert(0.625, Unit::Rem, Unit::Px, 16.0), 10.0);
        assert_eq!(convert(0.438, Unit::Rem, Unit::Px, 16.0), 7.0);
        assert_eq!(convert(1.3, Unit::Rem, Unit::Px, 16.0), 21.0);
    }

    #[test]
    fn test_round_trip_within_one_pixel() {
        for px in -50..=100 {
            let value = px as f64;
            let back = convert(convert(value, Unit::Px, Unit::Rem, 16.0), Unit::Rem, Unit::Px, 16.0);
            assert!((back - value).abs() <= 1.0, "{} came back as {}", value, back);
        }
    }

    #[test]
    fn test_unknown_units_are_passed_through() {
        assert_eq!(convert_units(12.0, "px", "em", 16.0), 12.0);
        assert_eq!(convert_units(12.0, "pt", "rem", 16.0), 12.0);
        assert_eq!(convert_units(16.0, "PX", "rem", 16.0), 1.0);
    }

    #[test]
    fn test_bad_base_size_is_identity() {
        assert_eq!(convert(10.0, Unit::Px, Unit::Rem, 0.0), 10.0);
        assert_eq!(convert(10.0, Unit::Px, Unit::Rem, f64::NAN), 10.0);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(40.0), "40");
        assert_eq!(format_number(0.625), "0.625");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_length(-1.25, Unit::Rem), "-1.25rem");
    }
}
