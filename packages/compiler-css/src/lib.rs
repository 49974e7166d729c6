pub mod generator;
pub mod minifier;
pub mod shadow;
pub mod stylesheet;

pub use generator::{font_stack, generate, Generator};
pub use minifier::{calculate_compression_ratio, minify};
pub use shadow::box_shadow;
pub use stylesheet::{CssResult, CssRule, GenerationError, Stylesheet};

use adminstyle_settings::SettingsDocument;

/// Compile a settings document to stylesheet text
pub fn compile_to_css(document: &SettingsDocument, minified: bool) -> CssResult<String> {
    let css = generate(document)?.to_css();
    Ok(if minified { minify(&css) } else { css })
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminstyle_settings::{HexColor, Validator};
    use serde_json::json;

    #[test]
    fn test_compile_validated_update() {
        let document = Validator::new()
            .apply(
                &SettingsDocument::default(),
                &json!({ "admin_bar": { "height": 40, "bg_color": "#112233" } }),
            )
            .expect("valid update");

        let css = compile_to_css(&document, false).expect("Failed to compile CSS");

        println!("Generated CSS:\n{}", css);

        assert!(css.contains("#wpadminbar {\n  background-color: #112233;\n  height: 40px;\n}"));
        assert!(css.contains("#wpcontent {\n  padding-top: 40px;\n}"));
    }

    #[test]
    fn test_compile_minified() {
        let mut document = SettingsDocument::default();
        document.admin_menu.bg_color = HexColor::parse("#1D2327");
        document.admin_menu.width = Some(200);

        let css = compile_to_css(&document, true).expect("Failed to compile CSS");

        assert!(css.starts_with("#adminmenuback,#adminmenuwrap,#adminmenu{background-color:#1d2327;width:200px}"));
        assert!(!css.contains('\n'));
        assert_eq!(minify(&css), css);
    }

    #[test]
    fn test_empty_document_compiles_to_nothing() {
        assert_eq!(compile_to_css(&SettingsDocument::default(), true).unwrap(), "");
    }
}
