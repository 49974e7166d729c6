//! Typed settings document
//!
//! Every visual leaf is optional: `None` means "unset, leave the host styles
//! alone" and is distinct from an explicit zero. The JSON projection of a
//! document always carries every key (unset leaves serialize as `null`).

use crate::color::HexColor;
use crate::merge::merge_with_defaults;
use adminstyle_common::Unit;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Preset name meaning "no table entry matches"
pub const CUSTOM: &str = "custom";

fn custom_preset() -> String {
    CUSTOM.to_string()
}

/// The full theme configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDocument {
    pub admin_bar: AdminBarSettings,
    pub admin_menu: AdminMenuSettings,
    pub performance: PerformanceSettings,
    pub typography: TypographySettings,
    pub visual_effects: VisualEffectsSettings,
    pub spacing: SpacingSettings,
}

impl SettingsDocument {
    /// JSON projection with every key present
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Build a document from a (possibly partial) JSON tree, restoring any
    /// keys missing from the default skeleton first
    pub fn from_value(value: &Value) -> Result<SettingsDocument, serde_json::Error> {
        serde_json::from_value(merge_with_defaults(value))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminBarSettings {
    pub bg_color: Option<HexColor>,
    pub text_color: Option<HexColor>,
    pub hover_color: Option<HexColor>,
    pub height: Option<i64>,
    pub hide_logo: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminMenuSettings {
    pub bg_color: Option<HexColor>,
    pub text_color: Option<HexColor>,
    pub hover_bg_color: Option<HexColor>,
    pub hover_text_color: Option<HexColor>,
    pub active_bg_color: Option<HexColor>,
    pub submenu_bg_color: Option<HexColor>,
    pub width: Option<i64>,
}

/// Runtime toggles; never emitted as CSS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceSettings {
    pub enable_cache: bool,
    pub minify_css: bool,
    /// Seconds a generated stylesheet stays fresh
    pub cache_ttl: i64,
}

impl Default for PerformanceSettings {
    fn default() -> Self {
        Self {
            enable_cache: true,
            minify_css: true,
            cache_ttl: 3600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographySettings {
    pub admin_bar: TypographyElement,
    pub admin_menu: TypographyElement,
    pub content: TypographyElement,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TypographyElement {
    pub font_family: Option<FontFamily>,
    pub font_size: Option<i64>,
    pub font_weight: Option<FontWeight>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontFamily {
    System,
    Inter,
    Roboto,
    OpenSans,
    Lato,
    Georgia,
    Monospace,
}

impl FontFamily {
    pub const NAMES: &'static [&'static str] = &[
        "system",
        "inter",
        "roboto",
        "open-sans",
        "lato",
        "georgia",
        "monospace",
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontWeight {
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "bold")]
    Bold,
    #[serde(rename = "300")]
    W300,
    #[serde(rename = "400")]
    W400,
    #[serde(rename = "500")]
    W500,
    #[serde(rename = "600")]
    W600,
    #[serde(rename = "700")]
    W700,
}

impl FontWeight {
    pub const NAMES: &'static [&'static str] =
        &["normal", "bold", "300", "400", "500", "600", "700"];

    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
            FontWeight::W300 => "300",
            FontWeight::W400 => "400",
            FontWeight::W500 => "500",
            FontWeight::W600 => "600",
            FontWeight::W700 => "700",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualEffectsSettings {
    pub admin_bar: EffectSettings,
    pub admin_menu: EffectSettings,
    pub buttons: EffectSettings,
    pub form_fields: EffectSettings,
    pub preset: String,
    pub flags: EffectFlags,
}

impl Default for VisualEffectsSettings {
    fn default() -> Self {
        Self {
            admin_bar: EffectSettings::default(),
            admin_menu: EffectSettings::default(),
            buttons: EffectSettings::default(),
            form_fields: EffectSettings::default(),
            preset: custom_preset(),
            flags: EffectFlags::default(),
        }
    }
}

impl VisualEffectsSettings {
    /// Elements in emission order
    pub fn elements(&self) -> [(&'static str, &EffectSettings); 4] {
        [
            ("admin_bar", &self.admin_bar),
            ("admin_menu", &self.admin_menu),
            ("buttons", &self.buttons),
            ("form_fields", &self.form_fields),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectSettings {
    pub border_radius: Option<i64>,
    pub shadow_intensity: Option<ShadowIntensity>,
    pub shadow_direction: Option<ShadowDirection>,
    pub shadow_blur: Option<i64>,
    pub shadow_color: Option<HexColor>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectFlags {
    pub glassmorphism: bool,
    pub disable_animations: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowIntensity {
    None,
    Subtle,
    Medium,
    Strong,
}

impl ShadowIntensity {
    pub const NAMES: &'static [&'static str] = &["none", "subtle", "medium", "strong"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowDirection {
    Top,
    Right,
    Bottom,
    Left,
    Center,
}

impl ShadowDirection {
    pub const NAMES: &'static [&'static str] = &["top", "right", "bottom", "left", "center"];
}

/// A spacing subsection: numeric lengths sharing one `unit` tag
pub trait SpacingSection {
    fn unit(&self) -> Unit;

    fn set_unit(&mut self, unit: Unit);

    /// Named lengths in declaration order
    fn lengths(&self) -> Vec<(&'static str, Option<f64>)>;

    fn lengths_mut(&mut self) -> Vec<&mut Option<f64>>;
}

/// Four-sided spacing (padding or margin)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxSpacing {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
    pub unit: Unit,
}

impl SpacingSection for BoxSpacing {
    fn unit(&self) -> Unit {
        self.unit
    }

    fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    fn lengths(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ]
    }

    fn lengths_mut(&mut self) -> Vec<&mut Option<f64>> {
        vec![&mut self.top, &mut self.right, &mut self.bottom, &mut self.left]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmenuSpacing {
    pub indent: Option<f64>,
    /// Vertical padding applied to both top and bottom of each item
    pub item_padding: Option<f64>,
    /// Horizontal offset of the flyout relative to its parent item
    pub offset: Option<f64>,
    pub unit: Unit,
}

impl SpacingSection for SubmenuSpacing {
    fn unit(&self) -> Unit {
        self.unit
    }

    fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    fn lengths(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("indent", self.indent),
            ("item_padding", self.item_padding),
            ("offset", self.offset),
        ]
    }

    fn lengths_mut(&mut self) -> Vec<&mut Option<f64>> {
        vec![&mut self.indent, &mut self.item_padding, &mut self.offset]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MobileOverrides {
    pub enabled: bool,
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
    pub unit: Unit,
}

impl SpacingSection for MobileOverrides {
    fn unit(&self) -> Unit {
        self.unit
    }

    fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    fn lengths(&self) -> Vec<(&'static str, Option<f64>)> {
        vec![
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ]
    }

    fn lengths_mut(&mut self) -> Vec<&mut Option<f64>> {
        vec![&mut self.top, &mut self.right, &mut self.bottom, &mut self.left]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpacingSettings {
    pub menu_padding: BoxSpacing,
    pub menu_margin: BoxSpacing,
    pub admin_bar_padding: BoxSpacing,
    pub submenu_spacing: SubmenuSpacing,
    pub content_margin: BoxSpacing,
    pub mobile_overrides: MobileOverrides,
    pub preset: String,
}

impl Default for SpacingSettings {
    fn default() -> Self {
        Self {
            menu_padding: BoxSpacing::default(),
            menu_margin: BoxSpacing::default(),
            admin_bar_padding: BoxSpacing::default(),
            submenu_spacing: SubmenuSpacing::default(),
            content_margin: BoxSpacing::default(),
            mobile_overrides: MobileOverrides::default(),
            preset: custom_preset(),
        }
    }
}

impl SpacingSettings {
    /// Subsection names in their fixed processing order
    pub const SECTIONS: [&'static str; 6] = [
        "menu_padding",
        "menu_margin",
        "admin_bar_padding",
        "submenu_spacing",
        "content_margin",
        "mobile_overrides",
    ];

    pub fn sections(&self) -> [(&'static str, &dyn SpacingSection); 6] {
        [
            ("menu_padding", &self.menu_padding),
            ("menu_margin", &self.menu_margin),
            ("admin_bar_padding", &self.admin_bar_padding),
            ("submenu_spacing", &self.submenu_spacing),
            ("content_margin", &self.content_margin),
            ("mobile_overrides", &self.mobile_overrides),
        ]
    }

    pub fn sections_mut(&mut self) -> [(&'static str, &mut dyn SpacingSection); 6] {
        [
            ("menu_padding", &mut self.menu_padding),
            ("menu_margin", &mut self.menu_margin),
            ("admin_bar_padding", &mut self.admin_bar_padding),
            ("submenu_spacing", &mut self.submenu_spacing),
            ("content_margin", &mut self.content_margin),
            ("mobile_overrides", &mut self.mobile_overrides),
        ]
    }
}
