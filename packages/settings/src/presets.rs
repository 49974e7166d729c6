//! Named preset tables and exact-match detection
//!
//! Each table is scoped to a subtree of the document:
//!
//! * palettes compare the color leaves of `admin_bar` and `admin_menu` from the document root
//! * spacing presets compare the `spacing` subtree (mobile overrides excluded)
//! * shadow presets compare a single visual effects element

use crate::document::CUSTOM;
use serde_json::{json, Map, Value};
use std::sync::OnceLock;
use tracing::debug;

pub const SHADOW_PRESET_NAMES: &[&str] = &["custom", "flat", "soft", "elevated", "dramatic"];
pub const SPACING_PRESET_NAMES: &[&str] = &["custom", "compact", "default", "comfortable", "spacious"];
pub const PALETTE_NAMES: &[&str] = &["default", "midnight", "ocean", "forest", "sunset", "light"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetKind {
    Palette,
    Spacing,
    Shadow,
}

impl PresetKind {
    pub const ALL: [PresetKind; 3] = [PresetKind::Palette, PresetKind::Spacing, PresetKind::Shadow];

    pub fn as_str(&self) -> &'static str {
        match self {
            PresetKind::Palette => "palette",
            PresetKind::Spacing => "spacing",
            PresetKind::Shadow => "shadow",
        }
    }

    pub fn parse(value: &str) -> Option<PresetKind> {
        match value.trim().to_ascii_lowercase().as_str() {
            "palette" | "palettes" | "colors" => Some(PresetKind::Palette),
            "spacing" => Some(PresetKind::Spacing),
            "shadow" | "shadows" => Some(PresetKind::Shadow),
            _ => None,
        }
    }
}

/// An immutable named snapshot of every comparable leaf in its scope
#[derive(Debug, Clone, PartialEq)]
pub struct PresetRecord {
    pub name: &'static str,
    pub label: &'static str,
    pub values: Value,
}

fn palette(
    name: &'static str,
    label: &'static str,
    bar: [&str; 3],
    menu: [&str; 6],
) -> PresetRecord {
    PresetRecord {
        name,
        label,
        values: json!({
            "admin_bar": {
                "bg_color": bar[0],
                "text_color": bar[1],
                "hover_color": bar[2],
            },
            "admin_menu": {
                "bg_color": menu[0],
                "text_color": menu[1],
                "hover_bg_color": menu[2],
                "hover_text_color": menu[3],
                "active_bg_color": menu[4],
                "submenu_bg_color": menu[5],
            }
        }),
    }
}

fn sides(top: i64, right: i64, bottom: i64, left: i64) -> Value {
    json!({ "top": top, "right": right, "bottom": bottom, "left": left, "unit": "px" })
}

fn spacing(
    name: &'static str,
    label: &'static str,
    menu_padding: [i64; 4],
    menu_margin: [i64; 4],
    admin_bar_padding: [i64; 4],
    submenu: [i64; 3],
    content_margin: [i64; 4],
) -> PresetRecord {
    let [t, r, b, l] = menu_padding;
    let menu_padding = sides(t, r, b, l);
    let [t, r, b, l] = menu_margin;
    let menu_margin = sides(t, r, b, l);
    let [t, r, b, l] = admin_bar_padding;
    let admin_bar_padding = sides(t, r, b, l);
    let [t, r, b, l] = content_margin;
    let content_margin = sides(t, r, b, l);

    PresetRecord {
        name,
        label,
        values: json!({
            "menu_padding": menu_padding,
            "menu_margin": menu_margin,
            "admin_bar_padding": admin_bar_padding,
            "submenu_spacing": {
                "indent": submenu[0],
                "item_padding": submenu[1],
                "offset": submenu[2],
                "unit": "px",
            },
            "content_margin": content_margin,
        }),
    }
}

fn shadow(name: &'static str, label: &'static str, intensity: &str, blur: i64, color: &str) -> PresetRecord {
    PresetRecord {
        name,
        label,
        values: json!({
            "shadow_intensity": intensity,
            "shadow_direction": "bottom",
            "shadow_blur": blur,
            "shadow_color": color,
        }),
    }
}

fn palette_table() -> Vec<PresetRecord> {
    vec![
        palette(
            "default",
            "Default",
            ["#1d2327", "#f0f0f1", "#72aee6"],
            ["#1d2327", "#f0f0f1", "#2c3338", "#72aee6", "#2271b1", "#2c3338"],
        ),
        palette(
            "midnight",
            "Midnight",
            ["#0f172a", "#e2e8f0", "#38bdf8"],
            ["#111827", "#e5e7eb", "#1f2937", "#38bdf8", "#2563eb", "#1f2937"],
        ),
        palette(
            "ocean",
            "Ocean",
            ["#0b3954", "#e0f2fe", "#7dd3fc"],
            ["#0c4a6e", "#e0f2fe", "#075985", "#bae6fd", "#0284c7", "#075985"],
        ),
        palette(
            "forest",
            "Forest",
            ["#1b4332", "#d8f3dc", "#95d5b2"],
            ["#2d6a4f", "#d8f3dc", "#40916c", "#ffffff", "#52b788", "#40916c"],
        ),
        palette(
            "sunset",
            "Sunset",
            ["#7c2d12", "#fff7ed", "#fdba74"],
            ["#9a3412", "#ffedd5", "#c2410c", "#fff7ed", "#ea580c", "#c2410c"],
        ),
        palette(
            "light",
            "Light",
            ["#ffffff", "#1d2327", "#2271b1"],
            ["#f6f7f7", "#1d2327", "#dcdcde", "#1d2327", "#2271b1", "#ffffff"],
        ),
    ]
}

fn spacing_table() -> Vec<PresetRecord> {
    vec![
        spacing("compact", "Compact", [6, 8, 6, 8], [0, 0, 2, 0], [0, 6, 0, 6], [8, 4, 0], [10, 10, 10, 10]),
        spacing("default", "Default", [10, 12, 10, 12], [0, 0, 4, 0], [0, 8, 0, 8], [12, 6, 0], [20, 20, 20, 20]),
        spacing(
            "comfortable",
            "Comfortable",
            [12, 16, 12, 16],
            [0, 0, 6, 0],
            [0, 10, 0, 10],
            [16, 8, 0],
            [24, 24, 24, 24],
        ),
        spacing("spacious", "Spacious", [16, 20, 16, 20], [0, 0, 8, 0], [0, 12, 0, 12], [20, 10, 0], [32, 32, 32, 32]),
    ]
}

fn shadow_table() -> Vec<PresetRecord> {
    vec![
        shadow("flat", "Flat", "none", 0, "#000000"),
        shadow("soft", "Soft", "subtle", 4, "#0000001a"),
        shadow("elevated", "Elevated", "medium", 8, "#00000033"),
        shadow("dramatic", "Dramatic", "strong", 16, "#0000004d"),
    ]
}

/// The ordered table for `kind`
pub fn presets(kind: PresetKind) -> &'static [PresetRecord] {
    static PALETTES: OnceLock<Vec<PresetRecord>> = OnceLock::new();
    static SPACING: OnceLock<Vec<PresetRecord>> = OnceLock::new();
    static SHADOWS: OnceLock<Vec<PresetRecord>> = OnceLock::new();

    match kind {
        PresetKind::Palette => PALETTES.get_or_init(palette_table),
        PresetKind::Spacing => SPACING.get_or_init(spacing_table),
        PresetKind::Shadow => SHADOWS.get_or_init(shadow_table),
    }
}

pub fn find_preset(kind: PresetKind, name: &str) -> Option<&'static PresetRecord> {
    let name = name.trim();
    presets(kind)
        .iter()
        .find(|record| record.name.eq_ignore_ascii_case(name))
}

/// Numbers (including numeric strings) compare numerically, other strings
/// compare case-insensitively. No tolerance.
fn leaf_matches(expected: &Value, live: Option<&Value>) -> bool {
    let live = live.unwrap_or(&Value::Null);

    if let (Some(a), Some(b)) = (as_number(expected), as_number(live)) {
        return a == b;
    }

    match (expected, live) {
        (Value::String(a), Value::String(b)) => a.trim().eq_ignore_ascii_case(b.trim()),
        (a, b) => a == b,
    }
}

fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Whether every leaf of `expected` has an equal counterpart in `live`
fn subtree_matches(expected: &Value, live: Option<&Value>) -> bool {
    match expected {
        Value::Object(fields) => {
            let live = live.and_then(Value::as_object);
            fields
                .iter()
                .all(|(key, value)| subtree_matches(value, live.and_then(|map| map.get(key))))
        }
        leaf => leaf_matches(leaf, live),
    }
}

/// Name of the first preset whose every comparable field equals `live`,
/// or `"custom"` when none does. Never fails.
pub fn detect_preset(kind: PresetKind, live: &Value) -> String {
    let detected = presets(kind)
        .iter()
        .find(|record| subtree_matches(&record.values, Some(live)))
        .map(|record| record.name)
        .unwrap_or(CUSTOM);

    debug!(kind = kind.as_str(), preset = detected, "Detected preset");
    detected.to_string()
}

/// The candidate patch (document-root relative) that applies preset `name`.
///
/// Spacing and shadow patches also set the matching `preset` tag; a shadow
/// preset is applied to every visual effects element.
pub fn preset_values(kind: PresetKind, name: &str) -> Option<Value> {
    let record = find_preset(kind, name)?;

    let patch = match kind {
        PresetKind::Palette => record.values.clone(),
        PresetKind::Spacing => {
            let mut spacing = record.values.as_object().cloned().unwrap_or_default();
            spacing.insert("preset".to_string(), json!(record.name));
            json!({ "spacing": spacing })
        }
        PresetKind::Shadow => {
            let mut effects = Map::new();
            for element in ["admin_bar", "admin_menu", "buttons", "form_fields"] {
                effects.insert(element.to_string(), record.values.clone());
            }
            effects.insert("preset".to_string(), json!(record.name));
            json!({ "visual_effects": effects })
        }
    };

    Some(patch)
}
