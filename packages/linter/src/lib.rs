mod diagnostic;
mod linter;
mod rules;

pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use linter::{advise, lint_spacing, warnings, LintOptions};
pub use rules::{
    LintRule, NegativeMarginRule, ReadabilityRule, RuleRegistry, SubmenuOffsetRule, TouchTargetRule,
    MIN_TOUCH_TARGET,
};
