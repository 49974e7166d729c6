use crate::diagnostic::Diagnostic;
use crate::rules::{px, LintRule};
use adminstyle_common::format_number;
use adminstyle_settings::SpacingSettings;

const MIN_HORIZONTAL_PADDING: f64 = 8.0;

/// Menu labels squeezed against the menu edges
pub struct ReadabilityRule;

impl LintRule for ReadabilityRule {
    fn name(&self) -> &'static str {
        "menu-readability"
    }

    fn description(&self) -> &'static str {
        "Menu items need at least 8px of horizontal padding"
    }

    fn check_spacing(&self, spacing: &SpacingSettings, base_size: f64) -> Vec<Diagnostic> {
        let menu = &spacing.menu_padding;
        let mut diagnostics = Vec::new();

        for (side, value) in [("left", menu.left), ("right", menu.right)] {
            let Some(value) = px(value, menu.unit, base_size) else {
                continue;
            };

            if value < MIN_HORIZONTAL_PADDING {
                diagnostics.push(Diagnostic::warning(
                    self.name(),
                    format!(
                        "Menu {} padding of {}px is below {}px and may hurt readability",
                        side,
                        format_number(value),
                        format_number(MIN_HORIZONTAL_PADDING)
                    ),
                    format!("spacing.menu_padding.{}", side),
                ));
            }
        }

        diagnostics
    }
}
