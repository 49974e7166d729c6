//! Schema-driven validation of partial settings updates
//!
//! Only fields present in the candidate are checked. Every field is checked
//! (collect-all); a single failure rejects the whole candidate.

use crate::color::HexColor;
use crate::document::SettingsDocument;
use crate::merge::merge_distinct;
use crate::schema::{schema, FieldKind, Schema};
use crate::units::convert_subsection;
use adminstyle_common::{format_number, round_to, Unit, DEFAULT_BASE_SIZE};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Why a single field was rejected
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("invalid hex color")]
    InvalidHexColor,

    #[error("must be a number")]
    NotANumber,

    #[error("must be at least {min}")]
    BelowMinimum { min: String },

    #[error("must be at most {max}")]
    AboveMaximum { max: String },

    #[error("must be one of: {}", .allowed.join(", "))]
    InvalidChoice { allowed: Vec<String> },

    #[error("must be a boolean")]
    NotABoolean,

    #[error("must be an object")]
    NotAnObject,

    #[error("must be px or rem")]
    InvalidUnit,

    #[error("must not be blank")]
    Required,

    #[error("malformed document: {0}")]
    Malformed(String),
}

/// Field-level error report keyed by dotted path
#[derive(Error, Debug, Clone, PartialEq, Default)]
#[error("settings rejected: {} invalid field(s)", .errors.len())]
pub struct ValidationErrors {
    errors: BTreeMap<String, FieldError>,
}

impl ValidationErrors {
    pub fn single(path: impl Into<String>, error: FieldError) -> Self {
        let mut errors = Self::default();
        errors.insert(path, error);
        errors
    }

    fn insert(&mut self, path: impl Into<String>, error: FieldError) {
        self.errors.insert(path.into(), error);
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&FieldError> {
        self.errors.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.errors.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldError)> {
        self.errors.iter()
    }

    /// Path → human-readable reason
    pub fn to_messages(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(path, error)| (path.clone(), error.to_string()))
            .collect()
    }
}

/// The accepted, normalized subset of a candidate update
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFields {
    tree: Value,
}

impl Default for ValidatedFields {
    fn default() -> Self {
        Self {
            tree: Value::Object(Map::new()),
        }
    }
}

impl ValidatedFields {
    pub fn as_value(&self) -> &Value {
        &self.tree
    }

    pub fn into_value(self) -> Value {
        self.tree
    }

    pub fn is_empty(&self) -> bool {
        self.tree.as_object().map(Map::is_empty).unwrap_or(true)
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        lookup(&self.tree, path)
    }

    fn set(&mut self, path: &str, value: Value) {
        let mut node = &mut self.tree;
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            let Value::Object(map) = node else { return };

            if segments.peek().is_none() {
                map.insert(segment.to_string(), value);
                return;
            }
            node = map
                .entry(segment.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
    }
}

/// Walk a dotted path through nested objects
fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |node, segment| node.as_object()?.get(segment))
}

fn is_blank(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn coerce_number(raw: &Value) -> Option<f64> {
    let number = match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn coerce_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::Null => Some(false),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => Some(!matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "" | "0" | "false" | "no" | "off"
        )),
        _ => None,
    }
}

fn check_bounds(value: f64, min: f64, max: f64) -> Result<(), FieldError> {
    if value < min {
        return Err(FieldError::BelowMinimum {
            min: format_number(min),
        });
    }
    if value > max {
        return Err(FieldError::AboveMaximum {
            max: format_number(max),
        });
    }
    Ok(())
}

/// `unit` is the unit declared for the enclosing spacing subsection; only
/// lengths read it.
fn check_leaf(kind: &FieldKind, raw: &Value, nullable: bool, unit: Unit) -> Result<Value, FieldError> {
    if is_blank(raw) {
        return match kind {
            FieldKind::Bool => Ok(Value::Bool(false)),
            FieldKind::Unit => Ok(json!(Unit::Px.as_str())),
            _ if nullable => Ok(Value::Null),
            _ => Err(FieldError::Required),
        };
    }

    match kind {
        FieldKind::Color => raw
            .as_str()
            .and_then(HexColor::parse)
            .map(|color| json!(color.as_str()))
            .ok_or(FieldError::InvalidHexColor),

        FieldKind::Int { min, max } => {
            let number = coerce_number(raw).ok_or(FieldError::NotANumber)?.trunc();
            check_bounds(number, *min as f64, *max as f64)?;
            Ok(json!(number as i64))
        }

        FieldKind::Float { min, max, precision } => {
            let number = round_to(coerce_number(raw).ok_or(FieldError::NotANumber)?, *precision);
            check_bounds(number, *min, *max)?;
            Ok(json!(number))
        }

        FieldKind::Enum(allowed) => {
            let text = match raw {
                Value::String(s) => s.trim().to_lowercase(),
                Value::Number(n) => n.to_string(),
                _ => String::new(),
            };
            allowed
                .iter()
                .find(|choice| **choice == text)
                .map(|choice| json!(choice))
                .ok_or_else(|| FieldError::InvalidChoice {
                    allowed: allowed.iter().map(|choice| choice.to_string()).collect(),
                })
        }

        FieldKind::Bool => coerce_bool(raw).map(Value::Bool).ok_or(FieldError::NotABoolean),

        FieldKind::Unit => raw
            .as_str()
            .and_then(Unit::parse)
            .map(|unit| json!(unit.as_str()))
            .ok_or(FieldError::InvalidUnit),

        FieldKind::Spacing { .. } => check_leaf(&kind.resolve(unit), raw, nullable, unit),
    }
}

/// Schema-driven validator for settings candidates
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    schema: &'static Schema,
    base_size: f64,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self {
            schema: schema(),
            base_size: DEFAULT_BASE_SIZE,
        }
    }

    /// Root font size used when an update switches a stored subsection's unit
    pub fn with_base_size(mut self, base_size: f64) -> Self {
        self.base_size = base_size;
        self
    }

    /// Check every field present in `candidate`.
    ///
    /// Returns the normalized accepted subset, or every violation found.
    #[instrument(skip(self, candidate), fields(sections = candidate.as_object().map(Map::len).unwrap_or(0)))]
    pub fn validate(&self, candidate: &Value) -> Result<ValidatedFields, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut validated = ValidatedFields::default();

        if !candidate.is_object() {
            return Err(ValidationErrors::single("document", FieldError::NotAnObject));
        }

        self.check_shape(candidate, "", &mut errors);

        for field in self.schema.fields() {
            let Some(raw) = lookup(candidate, &field.path) else {
                continue;
            };

            let unit = unit_in(candidate, field.parent());
            let outcome = check_leaf(&field.kind, raw, field.nullable, unit);

            match outcome {
                Ok(value) => validated.set(&field.path, value),
                Err(error) => {
                    debug!(path = %field.path, %error, "Field rejected");
                    errors.insert(field.path.clone(), error);
                }
            }
        }

        // A subsection that receives lengths without a unit is read as px
        for field in self.schema.fields() {
            if field.kind == FieldKind::Unit
                && validated.get(&field.path).is_none()
                && !errors.contains(&field.path)
                && self.touches_lengths(candidate, field.parent())
            {
                validated.set(&field.path, json!(Unit::Px.as_str()));
            }
        }

        if errors.is_empty() {
            Ok(validated)
        } else {
            debug!(errors = errors.len(), "Candidate rejected");
            Err(errors)
        }
    }

    /// Validate `candidate`, merge it over `persisted` and restore any keys
    /// missing from the default skeleton. Nothing is merged on failure.
    ///
    /// A stored spacing subsection whose unit differs from the one the
    /// candidate settles on is converted first, so lengths the candidate
    /// does not mention keep their rendered size.
    #[instrument(skip_all)]
    pub fn apply(
        &self,
        persisted: &SettingsDocument,
        candidate: &Value,
    ) -> Result<SettingsDocument, ValidationErrors> {
        let validated = self.validate(candidate)?;

        let mut base = persisted.clone();
        for (name, section) in base.spacing.sections_mut() {
            let unit = validated
                .get(&format!("spacing.{}.unit", name))
                .and_then(Value::as_str)
                .and_then(Unit::parse);
            if let Some(unit) = unit {
                convert_subsection(name, section, unit, self.base_size);
            }
        }

        let merged = merge_distinct(&base.to_value(), validated.as_value());

        let document = SettingsDocument::from_value(&merged)
            .map_err(|e| ValidationErrors::single("document", FieldError::Malformed(e.to_string())))?;

        info!("Settings update accepted");
        Ok(document)
    }

    /// Report containers that are not objects; ignore unknown keys
    fn check_shape(&self, value: &Value, prefix: &str, errors: &mut ValidationErrors) {
        let Some(map) = value.as_object() else {
            return;
        };

        for (key, child) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };

            if !self.schema.is_known(&path) {
                debug!(path = %path, "Ignoring unknown settings field");
                continue;
            }

            if self.schema.is_container(&path) {
                if child.is_object() {
                    self.check_shape(child, &path, errors);
                } else {
                    errors.insert(path, FieldError::NotAnObject);
                }
            }
        }
    }

    fn touches_lengths(&self, candidate: &Value, section: &str) -> bool {
        self.schema
            .children_of(section)
            .any(|field| matches!(field.kind, FieldKind::Spacing { .. }) && lookup(candidate, &field.path).is_some())
    }
}

/// The unit a candidate declares for a spacing subsection, `px` when absent or invalid
fn unit_in(candidate: &Value, section: &str) -> Unit {
    lookup(candidate, &format!("{}.unit", section))
        .and_then(Value::as_str)
        .and_then(Unit::parse)
        .unwrap_or_default()
}
