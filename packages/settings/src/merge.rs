//! Distinct recursive merge of settings trees

use crate::document::SettingsDocument;
use serde_json::Value;

/// Merge `overlay` over `base`.
///
/// Nested objects merge key by key; scalars and arrays from `overlay`
/// replace whatever `base` holds (arrays are never concatenated).
pub fn merge_distinct(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            let mut merged = base_map.clone();
            for (key, value) in overlay_map {
                let next = match merged.get(key) {
                    Some(existing) => merge_distinct(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        _ => overlay.clone(),
    }
}

/// Reconcile a document against the default skeleton.
///
/// Every key of the skeleton is present in the result. Where the skeleton
/// expects an object but `document` holds something else, the skeleton wins,
/// so the shape of the tree is always preserved.
pub fn merge_with_defaults(document: &Value) -> Value {
    reconcile(&SettingsDocument::default().to_value(), document)
}

fn reconcile(skeleton: &Value, document: &Value) -> Value {
    match (skeleton, document) {
        (Value::Object(skeleton_map), Value::Object(document_map)) => {
            let mut merged = document_map.clone();
            for (key, default) in skeleton_map {
                let next = match document_map.get(key) {
                    Some(value) => reconcile(default, value),
                    None => default.clone(),
                };
                merged.insert(key.clone(), next);
            }
            Value::Object(merged)
        }
        (Value::Object(_), _) => skeleton.clone(),
        (_, value) => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn assert_has_skeleton_keys(skeleton: &Value, value: &Value, path: &str) {
        if let Value::Object(map) = skeleton {
            let object = value
                .as_object()
                .unwrap_or_else(|| panic!("{} should be an object", path));
            for (key, child) in map {
                let child_path = format!("{}.{}", path, key);
                let actual = object
                    .get(key)
                    .unwrap_or_else(|| panic!("missing key {}", child_path));
                assert_has_skeleton_keys(child, actual, &child_path);
            }
        }
    }

    #[test]
    fn test_scalars_overwrite_and_objects_merge() {
        let base = json!({ "a": { "x": 1, "y": 2 }, "b": 3 });
        let overlay = json!({ "a": { "y": 5 }, "b": 4 });

        assert_eq!(
            merge_distinct(&base, &overlay),
            json!({ "a": { "x": 1, "y": 5 }, "b": 4 })
        );
    }

    #[test]
    fn test_arrays_are_replaced_not_concatenated() {
        let base = json!({ "list": [1, 2, 3] });
        let overlay = json!({ "list": [4] });

        assert_eq!(merge_distinct(&base, &overlay), json!({ "list": [4] }));
    }

    #[test]
    fn test_merge_with_defaults_restores_missing_keys() {
        let skeleton = SettingsDocument::default().to_value();
        let documents = [
            json!({}),
            json!(null),
            json!("garbage"),
            json!({ "admin_bar": { "height": 40 } }),
            json!({ "spacing": 7, "typography": { "content": [] } }),
            json!({ "extra": true, "visual_effects": { "flags": null } }),
        ];

        for document in &documents {
            let merged = merge_with_defaults(document);
            assert_has_skeleton_keys(&skeleton, &merged, "$");
        }
    }

    #[test]
    fn test_merge_with_defaults_keeps_document_values() {
        let merged = merge_with_defaults(&json!({
            "admin_bar": { "bg_color": "#112233" },
            "spacing": { "menu_padding": { "unit": "rem", "top": 0.5 } }
        }));

        assert_eq!(merged["admin_bar"]["bg_color"], json!("#112233"));
        assert_eq!(merged["admin_bar"]["height"], Value::Null);
        assert_eq!(merged["spacing"]["menu_padding"]["unit"], json!("rem"));
        assert_eq!(merged["spacing"]["menu_padding"]["top"], json!(0.5));
        assert_eq!(merged["spacing"]["menu_padding"]["left"], Value::Null);
    }
}
