use crate::diagnostic::Diagnostic;
use crate::rules::{px, LintRule};
use adminstyle_common::format_number;
use adminstyle_settings::{BoxSpacing, SpacingSettings};

/// Negative vertical margins let neighbouring items overlap
pub struct NegativeMarginRule;

fn check_section(
    rule: &str,
    path: &str,
    label: &str,
    margin: &BoxSpacing,
    base_size: f64,
) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (side, value) in [("top", margin.top), ("bottom", margin.bottom)] {
        let Some(value) = px(value, margin.unit, base_size) else {
            continue;
        };

        if value < 0.0 {
            diagnostics.push(
                Diagnostic::warning(
                    rule,
                    format!(
                        "Negative {} margin of {}px on {} may cause elements to overlap",
                        side,
                        format_number(value),
                        label
                    ),
                    format!("{}.{}", path, side),
                )
                .with_suggestion(format!("Use a {} margin of 0 or more", side)),
            );
        }
    }

    diagnostics
}

impl LintRule for NegativeMarginRule {
    fn name(&self) -> &'static str {
        "negative-margin"
    }

    fn description(&self) -> &'static str {
        "Disallow negative vertical margins on menu items and page content"
    }

    fn check_spacing(&self, spacing: &SpacingSettings, base_size: f64) -> Vec<Diagnostic> {
        let mut diagnostics = check_section(
            self.name(),
            "spacing.menu_margin",
            "admin menu items",
            &spacing.menu_margin,
            base_size,
        );
        diagnostics.extend(check_section(
            self.name(),
            "spacing.content_margin",
            "the page content",
            &spacing.content_margin,
            base_size,
        ));
        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminstyle_common::Unit;

    #[test]
    fn test_detects_negative_vertical_margin() {
        let mut spacing = SpacingSettings::default();
        spacing.menu_margin.top = Some(-4.0);
        spacing.content_margin.unit = Unit::Rem;
        spacing.content_margin.bottom = Some(-0.5);

        let diagnostics = NegativeMarginRule.check_spacing(&spacing, 16.0);

        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[0].rule, "negative-margin");
        assert_eq!(diagnostics[0].path, "spacing.menu_margin.top");
        assert!(diagnostics[1].message.contains("-8px"));
    }

    #[test]
    fn test_allows_negative_horizontal_margin() {
        let mut spacing = SpacingSettings::default();
        spacing.menu_margin.left = Some(-10.0);
        spacing.content_margin.right = Some(-20.0);
        spacing.menu_margin.top = Some(0.0);

        assert!(NegativeMarginRule.check_spacing(&spacing, 16.0).is_empty());
    }
}
