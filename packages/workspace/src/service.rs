//! Orchestration of validation, persistence, generation and caching

use crate::envelope::{parse_envelope, Envelope, ImportError};
use adminstyle_cache::{Cache, CacheStoreError};
use adminstyle_common::{Unit, DEFAULT_BASE_SIZE};
use adminstyle_compiler_css::{minify, GenerationError, Generator};
use adminstyle_linter::{lint_spacing, Diagnostic, LintOptions};
use adminstyle_settings::{
    convert_section, detect_preset, load_or_default, preset_values, PresetKind, RepositoryError,
    SettingsDocument, SettingsRepository, ValidationErrors, Validator,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Cache(#[from] CacheStoreError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Unknown {kind} preset '{name}'")]
    UnknownPreset { kind: &'static str, name: String },

    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Cache key of the generated stylesheet
    pub stylesheet_key: String,

    /// Root font size for px↔rem conversion
    pub base_font_size: f64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            stylesheet_key: "adminstyle-css".to_string(),
            base_font_size: DEFAULT_BASE_SIZE,
        }
    }
}

/// Presets matching the live settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetReport {
    pub palette: String,
    pub spacing: String,
    /// Per visual effects element
    pub shadows: Vec<(String, String)>,
}

pub struct StyleService {
    repository: Arc<dyn SettingsRepository>,
    cache: Cache,
    config: ServiceConfig,
    validator: Validator,
    generator: Generator,
}

impl StyleService {
    pub fn new(repository: Arc<dyn SettingsRepository>, cache: Cache, config: ServiceConfig) -> Self {
        Self {
            repository,
            cache,
            validator: Validator::new().with_base_size(config.base_font_size),
            generator: Generator::new(),
            config,
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The persisted document, or the defaults before the first save
    pub fn settings(&self) -> ServiceResult<SettingsDocument> {
        Ok(load_or_default(self.repository.as_ref())?)
    }

    /// Validate a partial update, merge it over the persisted document and
    /// save the result. Nothing is saved when any field is rejected.
    #[instrument(skip_all)]
    pub fn update(&self, candidate: &Value) -> ServiceResult<SettingsDocument> {
        let persisted = self.settings()?;
        let updated = self.validator.apply(&persisted, candidate)?;
        self.persist(&updated)?;
        Ok(updated)
    }

    /// Replace the persisted document with the defaults
    pub fn reset(&self) -> ServiceResult<SettingsDocument> {
        let defaults = SettingsDocument::default();
        self.persist(&defaults)?;
        info!("Settings reset to defaults");
        Ok(defaults)
    }

    fn persist(&self, document: &SettingsDocument) -> ServiceResult<()> {
        self.repository.save(document)?;

        if let Err(error) = self.cache.invalidate(&self.config.stylesheet_key) {
            warn!(%error, "Failed to invalidate cached stylesheet");
        }
        Ok(())
    }

    /// Generate stylesheet text for `document`, minified when the document asks for it
    pub fn compile_document(&self, document: &SettingsDocument) -> ServiceResult<String> {
        let css = self.generator.generate(document)?.to_css();
        Ok(if document.performance.minify_css {
            minify(&css)
        } else {
            css
        })
    }

    /// Stylesheet for the persisted settings, bypassing the cache
    pub fn compile(&self) -> ServiceResult<String> {
        let document = self.settings()?;
        self.compile_document(&document)
    }

    fn cached_stylesheet(&self) -> ServiceResult<String> {
        let document = self.settings()?;
        if !document.performance.enable_cache {
            return self.compile_document(&document);
        }

        let ttl = u64::try_from(document.performance.cache_ttl).unwrap_or(0);
        self.cache
            .remember(&self.config.stylesheet_key, ttl, || self.compile_document(&document))
    }

    /// The stylesheet to serve.
    ///
    /// Regenerates through the cache; when that fails, falls back to the last
    /// successfully generated stylesheet. `None` when neither is available.
    #[instrument(skip(self))]
    pub fn stylesheet(&self) -> Option<String> {
        let error = match self.cached_stylesheet() {
            Ok(css) => return Some(css),
            Err(error) => error,
        };

        warn!(%error, "Stylesheet generation failed, serving last known good");
        match self.cache.last_known_good(&self.config.stylesheet_key) {
            Ok(css) => css,
            Err(error) => {
                warn!(%error, "No stylesheet available");
                None
            }
        }
    }

    pub fn export(&self, now: DateTime<Utc>) -> ServiceResult<Envelope> {
        Ok(Envelope::new(self.settings()?, now))
    }

    pub fn export_json(&self, now: DateTime<Utc>) -> ServiceResult<String> {
        Ok(serde_json::to_string_pretty(&self.export(now)?)?)
    }

    /// Replace the persisted settings with those of an export envelope.
    /// A rejected payload leaves the persisted settings untouched.
    #[instrument(skip_all, fields(bytes = payload.len()))]
    pub fn import(&self, payload: &str) -> ServiceResult<SettingsDocument> {
        let document = parse_envelope(payload)?;
        self.persist(&document)?;
        info!("Settings imported");
        Ok(document)
    }

    pub fn detect_presets(&self) -> ServiceResult<PresetReport> {
        let document = self.settings()?.to_value();

        let shadows = ["admin_bar", "admin_menu", "buttons", "form_fields"]
            .iter()
            .map(|element| {
                let live = &document["visual_effects"][*element];
                (element.to_string(), detect_preset(PresetKind::Shadow, live))
            })
            .collect();

        Ok(PresetReport {
            palette: detect_preset(PresetKind::Palette, &document),
            spacing: detect_preset(PresetKind::Spacing, &document["spacing"]),
            shadows,
        })
    }

    /// Apply a named preset as a regular update
    pub fn apply_preset(&self, kind: PresetKind, name: &str) -> ServiceResult<SettingsDocument> {
        let patch = preset_values(kind, name).ok_or_else(|| ServiceError::UnknownPreset {
            kind: kind.as_str(),
            name: name.to_string(),
        })?;
        self.update(&patch)
    }

    /// Rewrite every spacing subsection into `target` and save
    pub fn convert_spacing_units(&self, target: Unit) -> ServiceResult<SettingsDocument> {
        let mut document = self.settings()?;
        document.spacing = convert_section(&document.spacing, target, self.config.base_font_size);
        self.persist(&document)?;
        Ok(document)
    }

    pub fn spacing_advice(&self) -> ServiceResult<Vec<Diagnostic>> {
        let document = self.settings()?;
        Ok(lint_spacing(
            &document.spacing,
            LintOptions {
                base_size: self.config.base_font_size,
                ..LintOptions::default()
            },
        ))
    }

    /// Advisory accessibility warnings for the persisted spacing
    pub fn spacing_warnings(&self) -> ServiceResult<Vec<String>> {
        Ok(self
            .spacing_advice()?
            .into_iter()
            .map(|diagnostic| diagnostic.message)
            .collect())
    }
}
