use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::OnceLock;

fn hex_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
            .expect("hex color pattern is a valid regex")
    })
}

/// A 3, 4, 6 or 8 digit hex color, stored lowercase with its leading `#`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    pub fn parse(value: &str) -> Option<HexColor> {
        let trimmed = value.trim();
        if hex_pattern().is_match(trimmed) {
            Some(HexColor(trimmed.to_ascii_lowercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        HexColor::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color '{}'", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_all_hex_lengths() {
        for raw in ["#abc", "#abcd", "#AABBCC", "#aabbccdd"] {
            assert!(HexColor::parse(raw).is_some(), "{} should parse", raw);
        }
        assert_eq!(HexColor::parse(" #AABBCC ").unwrap().as_str(), "#aabbcc");
    }

    #[test]
    fn test_rejects_malformed_colors() {
        for raw in ["abc", "#ab", "#abcde", "#gggggg", "red", "", "#1234567"] {
            assert!(HexColor::parse(raw).is_none(), "{} should be rejected", raw);
        }
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: HexColor = serde_json::from_str("\"#112233\"").unwrap();
        assert_eq!(ok.to_string(), "#112233");
        assert!(serde_json::from_str::<HexColor>("\"blue\"").is_err());
    }
}
