use crate::diagnostic::Diagnostic;
use crate::rules::{px, LintRule};
use adminstyle_common::format_number;
use adminstyle_settings::SpacingSettings;

/// Largest submenu offset, in px, in either direction
const MAX_OFFSET: f64 = 20.0;

/// Submenu flyouts drifting too far from their parent item
pub struct SubmenuOffsetRule;

impl LintRule for SubmenuOffsetRule {
    fn name(&self) -> &'static str {
        "submenu-offset"
    }

    fn description(&self) -> &'static str {
        "Keep submenu flyouts within 20px of their parent item"
    }

    fn check_spacing(&self, spacing: &SpacingSettings, base_size: f64) -> Vec<Diagnostic> {
        let submenu = &spacing.submenu_spacing;
        let Some(offset) = px(submenu.offset, submenu.unit, base_size) else {
            return Vec::new();
        };

        let message = if offset < -MAX_OFFSET {
            format!(
                "Submenu offset of {}px may push flyouts off-screen or over the menu",
                format_number(offset)
            )
        } else if offset > MAX_OFFSET {
            format!(
                "Submenu offset of {}px may visually disconnect flyouts from their parent item",
                format_number(offset)
            )
        } else {
            return Vec::new();
        };

        vec![
            Diagnostic::warning(self.name(), message, "spacing.submenu_spacing.offset")
                .with_suggestion(format!(
                    "Keep the offset between -{0}px and {0}px",
                    format_number(MAX_OFFSET)
                )),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_offset(offset: f64) -> SpacingSettings {
        let mut spacing = SpacingSettings::default();
        spacing.submenu_spacing.offset = Some(offset);
        spacing
    }

    #[test]
    fn test_wording_depends_on_sign() {
        let negative = SubmenuOffsetRule.check_spacing(&with_offset(-30.0), 16.0);
        assert_eq!(negative.len(), 1);
        assert!(negative[0].message.contains("off-screen"));

        let positive = SubmenuOffsetRule.check_spacing(&with_offset(21.0), 16.0);
        assert_eq!(positive.len(), 1);
        assert!(positive[0].message.contains("disconnect"));
    }

    #[test]
    fn test_limit_is_inclusive() {
        assert!(SubmenuOffsetRule.check_spacing(&with_offset(20.0), 16.0).is_empty());
        assert!(SubmenuOffsetRule.check_spacing(&with_offset(-20.0), 16.0).is_empty());
        assert!(SubmenuOffsetRule
            .check_spacing(&SpacingSettings::default(), 16.0)
            .is_empty());
    }
}
