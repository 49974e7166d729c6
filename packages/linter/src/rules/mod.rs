mod negative_margin;
mod readability;
mod submenu_offset;
mod touch_target;

pub use negative_margin::NegativeMarginRule;
pub use readability::ReadabilityRule;
pub use submenu_offset::SubmenuOffsetRule;
pub use touch_target::{TouchTargetRule, MIN_TOUCH_TARGET};

use crate::diagnostic::Diagnostic;
use adminstyle_common::{to_px, Unit};
use adminstyle_settings::SpacingSettings;

/// Trait for implementing lint rules
pub trait LintRule: Send + Sync {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check the spacing settings. Lengths are normalized to px against `base_size`.
    fn check_spacing(&self, _spacing: &SpacingSettings, _base_size: f64) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// A set length in px
pub(crate) fn px(value: Option<f64>, unit: Unit, base_size: f64) -> Option<f64> {
    value.map(|value| to_px(value, unit, base_size))
}

/// Registry of all available lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(TouchTargetRule),
                Box::new(NegativeMarginRule),
                Box::new(SubmenuOffsetRule),
                Box::new(ReadabilityRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
