//! Declarative field schema
//!
//! One table drives validation (kind, bounds, nullability) and stylesheet
//! emission (selector, properties, value format). Adding a field means adding
//! one entry here.

use crate::document::{FontFamily, FontWeight, ShadowDirection, ShadowIntensity};
use crate::presets::{SHADOW_PRESET_NAMES, SPACING_PRESET_NAMES};
use adminstyle_common::{Unit, REM_PRECISION};
use std::sync::OnceLock;

/// Selectors shared between the schema and derived rules
pub mod selectors {
    pub const ADMIN_BAR: &str = "#wpadminbar";
    pub const ADMIN_BAR_ITEMS: &str = "#wpadminbar .ab-item, #wpadminbar a.ab-item";
    pub const ADMIN_BAR_HOVER: &str = "#wpadminbar .ab-top-menu > li:hover > .ab-item";
    pub const ADMIN_BAR_LOGO: &str = "#wp-admin-bar-wp-logo";
    pub const ADMIN_BAR_QUICKLINKS: &str = "#wpadminbar .quicklinks .ab-item";
    pub const ADMIN_BAR_SUB_PANEL: &str = "#wpadminbar .ab-sub-wrapper";
    pub const ADMIN_MENU: &str = "#adminmenuback, #adminmenuwrap, #adminmenu";
    pub const ADMIN_MENU_FOLDED: &str = ".folded #adminmenuback, .folded #adminmenuwrap, .folded #adminmenu";
    pub const ADMIN_MENU_LINKS: &str = "#adminmenu a";
    pub const ADMIN_MENU_HOVER: &str = "#adminmenu li.menu-top:hover, #adminmenu li > a.menu-top:focus";
    pub const ADMIN_MENU_ACTIVE: &str =
        "#adminmenu li.current a.menu-top, #adminmenu li.wp-has-current-submenu a.wp-has-current-submenu";
    pub const ADMIN_MENU_ITEM: &str = "#adminmenu a.menu-top";
    pub const ADMIN_MENU_ITEM_ROW: &str = "#adminmenu li.menu-top";
    pub const SUBMENU: &str = "#adminmenu .wp-submenu";
    pub const SUBMENU_LINKS: &str = "#adminmenu .wp-submenu a";
    pub const CONTENT_WRAPPER: &str = "#wpcontent";
    pub const CONTENT_OFFSET: &str = "#wpcontent, #wpfooter";
    pub const CONTENT_OFFSET_FOLDED: &str = ".folded #wpcontent, .folded #wpfooter";
    pub const CONTENT_BODY: &str = "#wpbody-content";
    pub const TYPOGRAPHY_ADMIN_BAR: &str = "#wpadminbar .ab-item, #wpadminbar .ab-label";
    pub const TYPOGRAPHY_ADMIN_MENU: &str = "#adminmenu .wp-menu-name, #adminmenu .wp-submenu a";
    pub const EFFECT_ADMIN_BAR: &str = "#wpadminbar";
    pub const EFFECT_ADMIN_MENU: &str = "#adminmenuwrap";
    pub const EFFECT_BUTTONS: &str =
        ".wp-core-ui .button, .wp-core-ui .button-primary, .wp-core-ui .button-secondary";
    pub const EFFECT_FORM_FIELDS: &str = ".wp-core-ui input[type=text], .wp-core-ui input[type=email], .wp-core-ui input[type=password], .wp-core-ui select, .wp-core-ui textarea";
    pub const GLASS_PANELS: &str = "#wpadminbar, #adminmenuwrap";
    pub const ANIMATED_CHROME: &str = "#wpadminbar *, #adminmenu *";
    pub const MOBILE_MEDIA: &str = "screen and (max-width: 782px)";
}

use selectors::*;

/// The declared kind of a leaf
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Color,
    Int { min: i64, max: i64 },
    Float { min: f64, max: f64, precision: u32 },
    Enum(&'static [&'static str]),
    Bool,
    /// The `unit` tag of a spacing subsection
    Unit,
    /// A length whose bounds depend on the sibling `unit` tag
    Spacing { px: (i64, i64), rem: (f64, f64) },
}

impl FieldKind {
    /// The concrete kind once the subsection unit is known: whole pixels
    /// for px, three-decimal floats for rem. Other kinds are unchanged.
    pub fn resolve(&self, unit: Unit) -> FieldKind {
        match (self, unit) {
            (FieldKind::Spacing { px, .. }, Unit::Px) => FieldKind::Int { min: px.0, max: px.1 },
            (FieldKind::Spacing { rem, .. }, Unit::Rem) => FieldKind::Float {
                min: rem.0,
                max: rem.1,
                precision: REM_PRECISION,
            },
            (other, _) => other.clone(),
        }
    }

    /// Inclusive numeric range, for numeric kinds
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match self {
            FieldKind::Int { min, max } => Some((*min as f64, *max as f64)),
            FieldKind::Float { min, max, .. } => Some((*min, *max)),
            _ => None,
        }
    }
}

/// How a leaf value is rendered into a declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CssFormat {
    /// Value as-is (colors, keywords, unitless numbers)
    Raw,
    /// Number with a `px` suffix
    Px,
    /// Number with the sibling `unit` tag as suffix
    Length,
    /// Font family keyword expanded to a font stack
    FontStack,
    /// Boolean; emits the given value when true
    Flag(&'static str),
}

/// Where a leaf lands in the stylesheet
#[derive(Debug, Clone, PartialEq)]
pub struct CssBinding {
    pub selector: &'static str,
    /// More than one property means the value fans out
    pub properties: &'static [&'static str],
    pub format: CssFormat,
    pub media: Option<&'static str>,
    /// Sibling boolean that must be true for the binding to apply
    pub when: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Dotted path from the document root, e.g. `admin_bar.height`
    pub path: String,
    pub kind: FieldKind,
    /// Whether `null`/blank clears the leaf
    pub nullable: bool,
    /// Whether an explicit zero is emitted instead of treated as blank
    pub zero_meaningful: bool,
    pub css: Option<CssBinding>,
}

impl FieldSpec {
    fn new(path: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            path: path.into(),
            kind,
            nullable: false,
            zero_meaningful: false,
            css: None,
        }
    }

    fn optional(mut self) -> Self {
        self.nullable = true;
        self
    }

    fn zero_meaningful(mut self) -> Self {
        self.zero_meaningful = true;
        self
    }

    fn css(mut self, selector: &'static str, properties: &'static [&'static str], format: CssFormat) -> Self {
        self.css = Some(CssBinding {
            selector,
            properties,
            format,
            media: None,
            when: None,
        });
        self
    }

    fn media(mut self, query: &'static str, when: &'static str) -> Self {
        if let Some(css) = self.css.as_mut() {
            css.media = Some(query);
            css.when = Some(when);
        }
        self
    }

    pub fn segments(&self) -> Vec<&str> {
        self.path.split('.').collect()
    }

    /// Path of the containing object (`spacing.menu_padding` for `spacing.menu_padding.top`)
    pub fn parent(&self) -> &str {
        self.path.rsplit_once('.').map(|(parent, _)| parent).unwrap_or("")
    }

    /// Leaf name
    pub fn name(&self) -> &str {
        self.path.rsplit_once('.').map(|(_, name)| name).unwrap_or(&self.path)
    }
}

/// The complete field table
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, path: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.path == path)
    }

    /// Fields whose direct parent is `parent`, in table order
    pub fn children_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a FieldSpec> + 'a {
        self.fields.iter().filter(move |field| field.parent() == parent)
    }

    /// Whether `path` names a leaf or a container of leaves
    pub fn is_known(&self, path: &str) -> bool {
        self.fields.iter().any(|field| {
            field.path == path
                || (field.path.starts_with(path) && field.path.as_bytes().get(path.len()) == Some(&b'.'))
        })
    }

    /// Whether `path` is a container (object) rather than a leaf
    pub fn is_container(&self, path: &str) -> bool {
        self.is_known(path) && self.get(path).is_none()
    }
}

const PADDING_SIDES: [(&str, &[&str]); 4] = [
    ("top", &["padding-top"]),
    ("right", &["padding-right"]),
    ("bottom", &["padding-bottom"]),
    ("left", &["padding-left"]),
];

const MARGIN_SIDES: [(&str, &[&str]); 4] = [
    ("top", &["margin-top"]),
    ("right", &["margin-right"]),
    ("bottom", &["margin-bottom"]),
    ("left", &["margin-left"]),
];

fn box_section(
    fields: &mut Vec<FieldSpec>,
    section: &str,
    sides: &[(&str, &'static [&'static str]); 4],
    px: (i64, i64),
    rem: (f64, f64),
    selector: &'static str,
) {
    for &(side, properties) in sides {
        fields.push(
            FieldSpec::new(format!("spacing.{}.{}", section, side), FieldKind::Spacing { px, rem })
                .optional()
                .zero_meaningful()
                .css(selector, properties, CssFormat::Length),
        );
    }
    fields.push(FieldSpec::new(format!("spacing.{}.unit", section), FieldKind::Unit));
}

fn typography_element(fields: &mut Vec<FieldSpec>, element: &str, selector: &'static str) {
    let path = |name: &str| format!("typography.{}.{}", element, name);
    fields.push(
        FieldSpec::new(path("font_family"), FieldKind::Enum(FontFamily::NAMES))
            .optional()
            .css(selector, &["font-family"], CssFormat::FontStack),
    );
    fields.push(
        FieldSpec::new(path("font_size"), FieldKind::Int { min: 8, max: 48 })
            .optional()
            .css(selector, &["font-size"], CssFormat::Px),
    );
    fields.push(
        FieldSpec::new(path("font_weight"), FieldKind::Enum(FontWeight::NAMES))
            .optional()
            .css(selector, &["font-weight"], CssFormat::Raw),
    );
    fields.push(
        FieldSpec::new(path("line_height"), FieldKind::Float { min: 1.0, max: 3.0, precision: 1 })
            .optional()
            .css(selector, &["line-height"], CssFormat::Raw),
    );
    fields.push(
        FieldSpec::new(path("letter_spacing"), FieldKind::Float { min: -2.0, max: 5.0, precision: 1 })
            .optional()
            .zero_meaningful()
            .css(selector, &["letter-spacing"], CssFormat::Px),
    );
}

fn effect_element(fields: &mut Vec<FieldSpec>, element: &str, selector: &'static str) {
    let path = |name: &str| format!("visual_effects.{}.{}", element, name);
    fields.push(
        FieldSpec::new(path("border_radius"), FieldKind::Int { min: 0, max: 50 })
            .optional()
            .zero_meaningful()
            .css(selector, &["border-radius"], CssFormat::Px),
    );
    // Shadow fields are combined into one box-shadow by the generator
    fields.push(FieldSpec::new(path("shadow_intensity"), FieldKind::Enum(ShadowIntensity::NAMES)).optional());
    fields.push(FieldSpec::new(path("shadow_direction"), FieldKind::Enum(ShadowDirection::NAMES)).optional());
    fields.push(
        FieldSpec::new(path("shadow_blur"), FieldKind::Int { min: 0, max: 50 })
            .optional()
            .zero_meaningful(),
    );
    fields.push(FieldSpec::new(path("shadow_color"), FieldKind::Color).optional());
}

fn build() -> Schema {
    let mut fields = Vec::new();

    // Admin bar
    fields.push(FieldSpec::new("admin_bar.bg_color", FieldKind::Color).optional().css(ADMIN_BAR, &["background-color"], CssFormat::Raw));
    fields.push(FieldSpec::new("admin_bar.text_color", FieldKind::Color).optional().css(ADMIN_BAR_ITEMS, &["color"], CssFormat::Raw));
    fields.push(FieldSpec::new("admin_bar.hover_color", FieldKind::Color).optional().css(ADMIN_BAR_HOVER, &["color"], CssFormat::Raw));
    fields.push(
        FieldSpec::new("admin_bar.height", FieldKind::Int { min: 0, max: 500 })
            .optional()
            .css(ADMIN_BAR, &["height"], CssFormat::Px),
    );
    fields.push(FieldSpec::new("admin_bar.hide_logo", FieldKind::Bool).css(ADMIN_BAR_LOGO, &["display"], CssFormat::Flag("none")));

    // Admin menu
    fields.push(FieldSpec::new("admin_menu.bg_color", FieldKind::Color).optional().css(ADMIN_MENU, &["background-color"], CssFormat::Raw));
    fields.push(FieldSpec::new("admin_menu.text_color", FieldKind::Color).optional().css(ADMIN_MENU_LINKS, &["color"], CssFormat::Raw));
    fields.push(FieldSpec::new("admin_menu.hover_bg_color", FieldKind::Color).optional().css(ADMIN_MENU_HOVER, &["background-color"], CssFormat::Raw));
    fields.push(FieldSpec::new("admin_menu.hover_text_color", FieldKind::Color).optional().css(ADMIN_MENU_HOVER, &["color"], CssFormat::Raw));
    fields.push(FieldSpec::new("admin_menu.active_bg_color", FieldKind::Color).optional().css(ADMIN_MENU_ACTIVE, &["background-color"], CssFormat::Raw));
    fields.push(FieldSpec::new("admin_menu.submenu_bg_color", FieldKind::Color).optional().css(SUBMENU, &["background-color"], CssFormat::Raw));
    fields.push(
        FieldSpec::new("admin_menu.width", FieldKind::Int { min: 100, max: 400 })
            .optional()
            .css(ADMIN_MENU, &["width"], CssFormat::Px),
    );

    // Performance
    fields.push(FieldSpec::new("performance.enable_cache", FieldKind::Bool));
    fields.push(FieldSpec::new("performance.minify_css", FieldKind::Bool));
    fields.push(FieldSpec::new("performance.cache_ttl", FieldKind::Int { min: 60, max: 86_400 }));

    // Typography
    typography_element(&mut fields, "admin_bar", TYPOGRAPHY_ADMIN_BAR);
    typography_element(&mut fields, "admin_menu", TYPOGRAPHY_ADMIN_MENU);
    typography_element(&mut fields, "content", CONTENT_BODY);

    // Visual effects
    effect_element(&mut fields, "admin_bar", EFFECT_ADMIN_BAR);
    effect_element(&mut fields, "admin_menu", EFFECT_ADMIN_MENU);
    effect_element(&mut fields, "buttons", EFFECT_BUTTONS);
    effect_element(&mut fields, "form_fields", EFFECT_FORM_FIELDS);
    fields.push(FieldSpec::new("visual_effects.preset", FieldKind::Enum(SHADOW_PRESET_NAMES)));
    fields.push(
        FieldSpec::new("visual_effects.flags.glassmorphism", FieldKind::Bool)
            .css(GLASS_PANELS, &["backdrop-filter", "-webkit-backdrop-filter"], CssFormat::Flag("blur(10px)")),
    );
    fields.push(
        FieldSpec::new("visual_effects.flags.disable_animations", FieldKind::Bool)
            .css(ANIMATED_CHROME, &["transition", "animation"], CssFormat::Flag("none")),
    );

    // Spacing
    box_section(&mut fields, "menu_padding", &PADDING_SIDES, (0, 50), (0.0, 5.0), ADMIN_MENU_ITEM);
    box_section(&mut fields, "menu_margin", &MARGIN_SIDES, (-20, 50), (-1.25, 3.125), ADMIN_MENU_ITEM_ROW);
    box_section(&mut fields, "admin_bar_padding", &PADDING_SIDES, (0, 30), (0.0, 1.875), ADMIN_BAR_QUICKLINKS);

    fields.push(
        FieldSpec::new("spacing.submenu_spacing.indent", FieldKind::Spacing { px: (0, 50), rem: (0.0, 3.125) })
            .optional()
            .zero_meaningful()
            .css(SUBMENU_LINKS, &["padding-left"], CssFormat::Length),
    );
    fields.push(
        FieldSpec::new("spacing.submenu_spacing.item_padding", FieldKind::Spacing { px: (0, 20), rem: (0.0, 1.25) })
            .optional()
            .zero_meaningful()
            .css(SUBMENU_LINKS, &["padding-top", "padding-bottom"], CssFormat::Length),
    );
    fields.push(
        FieldSpec::new("spacing.submenu_spacing.offset", FieldKind::Spacing { px: (-50, 50), rem: (-3.125, 3.125) })
            .optional()
            .zero_meaningful()
            .css(SUBMENU, &["margin-left"], CssFormat::Length),
    );
    fields.push(FieldSpec::new("spacing.submenu_spacing.unit", FieldKind::Unit));

    box_section(&mut fields, "content_margin", &MARGIN_SIDES, (-50, 100), (-3.125, 6.25), CONTENT_BODY);

    fields.push(FieldSpec::new("spacing.mobile_overrides.enabled", FieldKind::Bool));
    for (side, properties) in PADDING_SIDES {
        fields.push(
            FieldSpec::new(
                format!("spacing.mobile_overrides.{}", side),
                FieldKind::Spacing { px: (0, 40), rem: (0.0, 2.5) },
            )
            .optional()
            .zero_meaningful()
            .css(ADMIN_MENU_ITEM, properties, CssFormat::Length)
            .media(MOBILE_MEDIA, "enabled"),
        );
    }
    fields.push(FieldSpec::new("spacing.mobile_overrides.unit", FieldKind::Unit));

    fields.push(FieldSpec::new("spacing.preset", FieldKind::Enum(SPACING_PRESET_NAMES)));

    Schema { fields }
}

/// The process-wide schema table
pub fn schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(build)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SettingsDocument;
    use serde_json::Value;

    fn leaf_paths(value: &Value, prefix: &str, out: &mut Vec<String>) {
        if let Value::Object(map) = value {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                leaf_paths(child, &path, out);
            }
        } else {
            out.push(prefix.to_string());
        }
    }

    #[test]
    fn test_schema_covers_every_document_leaf() {
        let mut paths = Vec::new();
        leaf_paths(&SettingsDocument::default().to_value(), "", &mut paths);

        for path in &paths {
            assert!(schema().get(path).is_some(), "no schema entry for {}", path);
        }
        assert_eq!(paths.len(), schema().fields().len());
    }

    #[test]
    fn test_known_paths() {
        let schema = schema();
        assert!(schema.is_known("spacing"));
        assert!(schema.is_known("spacing.menu_padding"));
        assert!(schema.is_container("spacing.menu_padding"));
        assert!(!schema.is_container("spacing.menu_padding.top"));
        assert!(!schema.is_known("spacing.menu"));
        assert!(!schema.is_known("admin_bar.colour"));
    }

    #[test]
    fn test_spacing_fields_have_unit_sibling() {
        let schema = schema();
        for field in schema.fields() {
            if matches!(field.kind, FieldKind::Spacing { .. }) {
                let unit_path = format!("{}.unit", field.parent());
                assert_eq!(schema.get(&unit_path).map(|f| &f.kind), Some(&FieldKind::Unit));
            }
        }
    }

    #[test]
    fn test_path_helpers() {
        let field = schema().get("spacing.menu_padding.top").unwrap();
        assert_eq!(field.parent(), "spacing.menu_padding");
        assert_eq!(field.name(), "top");
        assert_eq!(field.segments(), vec!["spacing", "menu_padding", "top"]);
    }

    #[test]
    fn test_spacing_kind_resolves_per_unit() {
        let kind = &schema().get("spacing.menu_padding.top").unwrap().kind;

        assert_eq!(kind.resolve(Unit::Px), FieldKind::Int { min: 0, max: 50 });
        assert_eq!(kind.resolve(Unit::Px).bounds(), Some((0.0, 50.0)));
        assert_eq!(kind.resolve(Unit::Rem).bounds(), Some((0.0, 5.0)));
        assert_eq!(kind.bounds(), None);
        assert_eq!(FieldKind::Bool.resolve(Unit::Rem), FieldKind::Bool);
    }
}
