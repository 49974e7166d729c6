use adminstyle_compiler_css::{compile_to_css, generate, minify};
use adminstyle_settings::{SettingsDocument, Validator};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

fn full_document() -> SettingsDocument {
    let candidate = json!({
        "admin_bar": { "bg_color": "#1d2327", "text_color": "#f0f0f1", "height": 40, "hide_logo": true },
        "admin_menu": { "bg_color": "#2c3338", "hover_bg_color": "#2271b1", "width": 200 },
        "typography": {
            "admin_menu": { "font_family": "inter", "font_size": 14, "line_height": 1.4 },
            "content": { "font_family": "georgia", "letter_spacing": 0.5 }
        },
        "visual_effects": {
            "buttons": { "border_radius": 6, "shadow_intensity": "medium" },
            "form_fields": { "border_radius": 4, "shadow_intensity": "subtle", "shadow_direction": "top" },
            "flags": { "glassmorphism": true }
        },
        "spacing": {
            "menu_padding": { "top": 10, "right": 12, "bottom": 10, "left": 12 },
            "submenu_spacing": { "indent": 0.75, "item_padding": 0.25, "unit": "rem" },
            "mobile_overrides": { "enabled": true, "top": 12, "bottom": 12 }
        }
    });

    Validator::new()
        .apply(&SettingsDocument::default(), &candidate)
        .unwrap()
}

fn generate_empty_document(c: &mut Criterion) {
    let document = SettingsDocument::default();

    c.bench_function("generate_empty_document", |b| {
        b.iter(|| generate(black_box(&document)))
    });
}

fn generate_full_document(c: &mut Criterion) {
    let document = full_document();

    c.bench_function("generate_full_document", |b| {
        b.iter(|| generate(black_box(&document)))
    });
}

fn compile_and_minify(c: &mut Criterion) {
    let document = full_document();
    let css = generate(&document).unwrap().to_css();

    c.bench_function("minify_full_stylesheet", |b| b.iter(|| minify(black_box(&css))));

    c.bench_function("compile_minified", |b| {
        b.iter(|| compile_to_css(black_box(&document), true))
    });
}

criterion_group!(benches, generate_empty_document, generate_full_document, compile_and_minify);
criterion_main!(benches);
