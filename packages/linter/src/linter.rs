use crate::diagnostic::Diagnostic;
use crate::rules::RuleRegistry;
use adminstyle_common::DEFAULT_BASE_SIZE;
use adminstyle_settings::SpacingSettings;
use tracing::debug;

/// Options for configuring the linter
#[derive(Debug)]
pub struct LintOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,

    /// Root font size used to normalize rem lengths
    pub base_size: f64,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            registry: None,
            base_size: DEFAULT_BASE_SIZE,
        }
    }
}

/// Run every registered rule over the spacing settings.
///
/// Advisory only: findings never block an update.
pub fn lint_spacing(spacing: &SpacingSettings, options: LintOptions) -> Vec<Diagnostic> {
    let registry = options.registry.unwrap_or_default();
    let mut diagnostics = Vec::new();

    for rule in registry.rules() {
        let found = rule.check_spacing(spacing, options.base_size);
        if !found.is_empty() {
            debug!(rule = rule.name(), count = found.len(), "Spacing advisory");
        }
        diagnostics.extend(found);
    }

    diagnostics
}

/// Structured findings with the built-in rules
pub fn advise(spacing: &SpacingSettings) -> Vec<Diagnostic> {
    lint_spacing(spacing, LintOptions::default())
}

/// Human-readable warnings with the built-in rules
pub fn warnings(spacing: &SpacingSettings) -> Vec<String> {
    advise(spacing)
        .into_iter()
        .map(|diagnostic| diagnostic.message)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::LintRule;

    #[test]
    fn test_small_menu_padding_mentions_touch_target() {
        let mut spacing = SpacingSettings::default();
        spacing.menu_padding.top = Some(5.0);
        spacing.menu_padding.right = Some(5.0);
        spacing.menu_padding.bottom = Some(5.0);
        spacing.menu_padding.left = Some(5.0);

        let warnings = warnings(&spacing);

        assert!(!warnings.is_empty());
        assert!(warnings.iter().any(|warning| warning.contains("44")));
        // Narrow horizontal padding is reported separately for each side
        assert_eq!(warnings.len(), 3);
    }

    #[test]
    fn test_default_spacing_is_clean() {
        assert!(warnings(&SpacingSettings::default()).is_empty());
    }

    #[test]
    fn test_findings_from_all_rules_are_combined() {
        let mut spacing = SpacingSettings::default();
        spacing.admin_bar_padding.top = Some(2.0);
        spacing.menu_margin.bottom = Some(-2.0);
        spacing.submenu_spacing.offset = Some(-40.0);

        let rules: Vec<_> = advise(&spacing).into_iter().map(|d| d.rule).collect();
        assert_eq!(rules, vec!["touch-target", "negative-margin", "submenu-offset"]);
    }

    #[test]
    fn test_custom_registry() {
        struct AlwaysRule;

        impl LintRule for AlwaysRule {
            fn name(&self) -> &'static str {
                "always"
            }

            fn description(&self) -> &'static str {
                "Reports every document"
            }

            fn check_spacing(&self, _spacing: &SpacingSettings, _base_size: f64) -> Vec<Diagnostic> {
                vec![Diagnostic::info(self.name(), "checked", "spacing")]
            }
        }

        let mut registry = RuleRegistry::empty();
        registry.add_rule(Box::new(AlwaysRule));

        let diagnostics = lint_spacing(
            &SpacingSettings::default(),
            LintOptions {
                registry: Some(registry),
                ..LintOptions::default()
            },
        );

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].to_string(), "checked");
    }
}
