//! Export/import envelope

use adminstyle_settings::{FieldError, SettingsDocument, ValidationErrors, Validator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Marker identifying payloads produced by this tool
pub const PLUGIN_MARKER: &str = "adminstyle";

pub const ENVELOPE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("import payload is not valid JSON: {0}")]
    Malformed(String),

    #[error("import payload has no plugin marker")]
    MissingMarker,

    #[error("import payload was exported by '{found}', expected '{expected}'")]
    MarkerMismatch { found: String, expected: &'static str },

    #[error("imported settings are invalid: {0}")]
    InvalidSettings(#[source] ValidationErrors),
}

impl ImportError {
    /// Field-level report when the settings themselves were rejected
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        match self {
            ImportError::InvalidSettings(errors) => Some(errors),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub plugin_marker: String,
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub settings: SettingsDocument,
}

impl Envelope {
    pub fn new(settings: SettingsDocument, exported_at: DateTime<Utc>) -> Self {
        Self {
            plugin_marker: PLUGIN_MARKER.to_string(),
            version: ENVELOPE_VERSION.to_string(),
            exported_at,
            settings,
        }
    }
}

/// Check an import payload and return the complete document it carries.
///
/// The settings go through the same validation as an update, applied over
/// the defaults; nothing is persisted here.
pub fn parse_envelope(payload: &str) -> Result<SettingsDocument, ImportError> {
    let value: Value = serde_json::from_str(payload).map_err(|e| ImportError::Malformed(e.to_string()))?;
    let Value::Object(envelope) = value else {
        return Err(ImportError::Malformed("expected a JSON object".to_string()));
    };

    match envelope.get("plugin_marker").and_then(Value::as_str) {
        None => return Err(ImportError::MissingMarker),
        Some(marker) if marker != PLUGIN_MARKER => {
            return Err(ImportError::MarkerMismatch {
                found: marker.to_string(),
                expected: PLUGIN_MARKER,
            })
        }
        Some(_) => {}
    }

    if let Some(version) = envelope.get("version").and_then(Value::as_str) {
        debug!(version, "Importing settings envelope");
    }

    let settings = match envelope.get("settings") {
        Some(settings @ Value::Object(_)) => settings,
        _ => {
            return Err(ImportError::InvalidSettings(ValidationErrors::single(
                "settings",
                FieldError::NotAnObject,
            )))
        }
    };

    Validator::new()
        .apply(&SettingsDocument::default(), settings)
        .map_err(ImportError::InvalidSettings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_export_round_trip() {
        let mut settings = SettingsDocument::default();
        settings.admin_bar.height = Some(40);
        let envelope = Envelope::new(settings.clone(), DateTime::<Utc>::UNIX_EPOCH);

        let payload = serde_json::to_string(&envelope).unwrap();
        assert_eq!(parse_envelope(&payload).unwrap(), settings);
    }

    #[test]
    fn test_rejects_foreign_marker() {
        let payload = json!({ "plugin_marker": "OTHER", "settings": {} }).to_string();
        assert!(matches!(
            parse_envelope(&payload),
            Err(ImportError::MarkerMismatch { found, .. }) if found == "OTHER"
        ));
    }

    #[test]
    fn test_rejects_missing_marker() {
        let payload = json!({ "settings": {} }).to_string();
        assert!(matches!(parse_envelope(&payload), Err(ImportError::MissingMarker)));

        let payload = json!({ "plugin_marker": 7, "settings": {} }).to_string();
        assert!(matches!(parse_envelope(&payload), Err(ImportError::MissingMarker)));
    }

    #[test]
    fn test_malformed_payloads() {
        assert!(matches!(parse_envelope("{ nope"), Err(ImportError::Malformed(_))));
        assert!(matches!(parse_envelope("[1, 2]"), Err(ImportError::Malformed(_))));
    }

    #[test]
    fn test_invalid_settings_are_reported_by_field() {
        let payload = json!({
            "plugin_marker": PLUGIN_MARKER,
            "settings": { "admin_bar": { "height": 9000 } }
        })
        .to_string();

        let error = parse_envelope(&payload).unwrap_err();
        let fields = error.field_errors().unwrap();
        assert!(fields.get("admin_bar.height").is_some());

        let payload = json!({ "plugin_marker": PLUGIN_MARKER, "settings": "none" }).to_string();
        assert!(matches!(
            parse_envelope(&payload),
            Err(ImportError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_partial_settings_are_completed_with_defaults() {
        let payload = json!({
            "plugin_marker": PLUGIN_MARKER,
            "version": "0.0.1",
            "settings": { "admin_menu": { "width": 180 } }
        })
        .to_string();

        let settings = parse_envelope(&payload).unwrap();
        assert_eq!(settings.admin_menu.width, Some(180));
        assert_eq!(settings.performance.cache_ttl, 3600);
    }
}
