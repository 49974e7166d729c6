//! Settings document → ordered stylesheet rules
//!
//! Plain fields are emitted from the schema table; the admin bar height,
//! the menu width and the shadow fields fan out into derived rules here.

use crate::shadow::box_shadow;
use crate::stylesheet::{CssResult, CssRule, GenerationError, Stylesheet};
use adminstyle_common::{format_length, format_number, Unit};
use adminstyle_settings::schema::selectors::*;
use adminstyle_settings::{schema, CssFormat, FieldSpec, Schema, SettingsDocument, SpacingSettings};
use serde_json::{Number, Value};
use tracing::{debug, info, instrument};

/// Width of the collapsed admin menu
const FOLDED_MENU_WIDTH: i64 = 36;

/// Font stack for a font family keyword
pub fn font_stack(family: &str) -> Option<&'static str> {
    let stack = match family {
        "system" => {
            "-apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, Oxygen-Sans, Ubuntu, Cantarell, \"Helvetica Neue\", sans-serif"
        }
        "inter" => "\"Inter\", -apple-system, BlinkMacSystemFont, \"Segoe UI\", sans-serif",
        "roboto" => "\"Roboto\", \"Helvetica Neue\", Arial, sans-serif",
        "open-sans" => "\"Open Sans\", \"Helvetica Neue\", Arial, sans-serif",
        "lato" => "\"Lato\", \"Helvetica Neue\", Arial, sans-serif",
        "georgia" => "Georgia, \"Times New Roman\", serif",
        "monospace" => "Menlo, Consolas, Monaco, \"Liberation Mono\", monospace",
        _ => return None,
    };
    Some(stack)
}

fn effect_selector(element: &str) -> Option<&'static str> {
    match element {
        "admin_bar" => Some(EFFECT_ADMIN_BAR),
        "admin_menu" => Some(EFFECT_ADMIN_MENU),
        "buttons" => Some(EFFECT_BUTTONS),
        "form_fields" => Some(EFFECT_FORM_FIELDS),
        _ => None,
    }
}

fn unexpected(field: &FieldSpec, raw: &Value) -> GenerationError {
    GenerationError::UnexpectedValue {
        path: field.path.clone(),
        value: raw.to_string(),
    }
}

/// A numeric leaf, or `None` when a zero should be left out
fn emitted_number(field: &FieldSpec, number: &Number) -> CssResult<Option<f64>> {
    let value = number
        .as_f64()
        .ok_or_else(|| unexpected(field, &Value::Number(number.clone())))?;

    if value == 0.0 && !field.zero_meaningful {
        return Ok(None);
    }
    Ok(Some(value))
}

/// Render one leaf into a declaration value. `section` is the object that
/// holds the leaf, used to resolve the sibling `unit`.
fn render_value(
    field: &FieldSpec,
    format: CssFormat,
    raw: &Value,
    section: Option<&Value>,
) -> CssResult<Option<String>> {
    match (format, raw) {
        (_, Value::Null) => Ok(None),
        (CssFormat::Flag(on), Value::Bool(enabled)) => Ok(enabled.then(|| on.to_string())),
        (CssFormat::Raw, Value::String(text)) => Ok((!text.is_empty()).then(|| text.clone())),
        (CssFormat::FontStack, Value::String(family)) => font_stack(family)
            .map(|stack| Some(stack.to_string()))
            .ok_or_else(|| unexpected(field, raw)),
        (CssFormat::Raw, Value::Number(number)) => Ok(emitted_number(field, number)?.map(format_number)),
        (CssFormat::Px, Value::Number(number)) => {
            Ok(emitted_number(field, number)?.map(|value| format_length(value, Unit::Px)))
        }
        (CssFormat::Length, Value::Number(number)) => {
            let unit = section
                .and_then(|node| node.get("unit"))
                .and_then(Value::as_str)
                .and_then(Unit::parse)
                .unwrap_or_default();
            Ok(emitted_number(field, number)?.map(|value| format_length(value, unit)))
        }
        _ => Err(unexpected(field, raw)),
    }
}

fn lookup<'a>(tree: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(tree, |node, segment| node.get(segment))
}

fn admin_bar_rules(document: &SettingsDocument) -> Vec<CssRule> {
    let Some(height) = document.admin_bar.height.filter(|height| *height > 0) else {
        return Vec::new();
    };
    let height = format!("{}px", height);

    let mut content = CssRule::new(CONTENT_WRAPPER);
    content.declare("padding-top", &height);

    let mut sub_panel = CssRule::new(ADMIN_BAR_SUB_PANEL);
    sub_panel.declare("top", &height);

    let mut items = CssRule::new(ADMIN_BAR_QUICKLINKS);
    items.declare("line-height", &height);
    items.declare("height", &height);

    vec![content, sub_panel, items]
}

fn admin_menu_rules(document: &SettingsDocument) -> Vec<CssRule> {
    let Some(width) = document.admin_menu.width.filter(|width| *width > 0) else {
        return Vec::new();
    };

    let mut content = CssRule::new(CONTENT_OFFSET);
    content.declare("margin-left", format!("{}px", width));

    let mut folded_menu = CssRule::new(ADMIN_MENU_FOLDED);
    folded_menu.declare("width", format!("{}px", FOLDED_MENU_WIDTH));

    let mut folded_content = CssRule::new(CONTENT_OFFSET_FOLDED);
    folded_content.declare("margin-left", format!("{}px", FOLDED_MENU_WIDTH));

    vec![content, folded_menu, folded_content]
}

/// Stylesheet generator driven by the field schema
#[derive(Debug, Clone, Copy)]
pub struct Generator {
    schema: &'static Schema,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator {
    pub fn new() -> Self {
        Self { schema: schema() }
    }

    /// Generate the ordered rule list for a validated document
    #[instrument(skip_all)]
    pub fn generate(&self, document: &SettingsDocument) -> CssResult<Stylesheet> {
        info!("Starting stylesheet generation");

        let tree = serde_json::to_value(document).map_err(|e| GenerationError::Projection {
            message: e.to_string(),
        })?;
        let mut sheet = Stylesheet::new();

        sheet.extend(self.section_rules(&tree, "admin_bar")?);
        sheet.extend(admin_bar_rules(document));

        sheet.extend(self.section_rules(&tree, "admin_menu")?);
        sheet.extend(admin_menu_rules(document));

        for element in ["admin_bar", "admin_menu", "content"] {
            sheet.extend(self.section_rules(&tree, &format!("typography.{}", element))?);
        }

        for (element, effect) in document.visual_effects.elements() {
            let mut rules = self.section_rules(&tree, &format!("visual_effects.{}", element))?;

            if let (Some(shadow), Some(selector)) = (box_shadow(effect), effect_selector(element)) {
                debug!(element, shadow = %shadow, "Synthesized box-shadow");
                match rules.iter_mut().find(|rule| rule.selector == selector) {
                    Some(rule) => rule.declare("box-shadow", shadow),
                    None => {
                        let mut rule = CssRule::new(selector);
                        rule.declare("box-shadow", shadow);
                        rules.push(rule);
                    }
                }
            }

            sheet.extend(rules);
        }

        for section in SpacingSettings::SECTIONS {
            sheet.extend(self.section_rules(&tree, &format!("spacing.{}", section))?);
        }

        sheet.extend(self.section_rules(&tree, "visual_effects.flags")?);

        info!(rules = sheet.len(), "Stylesheet generation complete");
        Ok(sheet)
    }

    /// Rules for the schema fields directly under `section`, grouped by
    /// selector and media query in order of first appearance
    fn section_rules(&self, tree: &Value, section: &str) -> CssResult<Vec<CssRule>> {
        let node = lookup(tree, section);
        let mut rules: Vec<CssRule> = Vec::new();

        for field in self.schema.children_of(section) {
            let Some(binding) = &field.css else {
                continue;
            };

            if let Some(flag) = binding.when {
                let enabled = node
                    .and_then(|node| node.get(flag))
                    .and_then(Value::as_bool)
                    .unwrap_or(false);
                if !enabled {
                    continue;
                }
            }

            let raw = node
                .and_then(|node| node.get(field.name()))
                .unwrap_or(&Value::Null);
            let Some(value) = render_value(field, binding.format, raw, node)? else {
                continue;
            };

            let position = rules
                .iter()
                .position(|rule| rule.selector == binding.selector && rule.media_query.as_deref() == binding.media);
            let index = match position {
                Some(index) => index,
                None => {
                    let mut rule = CssRule::new(binding.selector);
                    if let Some(query) = binding.media {
                        rule = rule.with_media(query);
                    }
                    rules.push(rule);
                    rules.len() - 1
                }
            };

            for property in binding.properties {
                rules[index].declare(*property, value.clone());
            }
            debug!(path = %field.path, value = %value, "Emitted declaration");
        }

        Ok(rules)
    }
}

/// Generate with the default schema
pub fn generate(document: &SettingsDocument) -> CssResult<Stylesheet> {
    Generator::new().generate(document)
}
