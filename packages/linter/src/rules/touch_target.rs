use crate::diagnostic::Diagnostic;
use crate::rules::{px, LintRule};
use adminstyle_common::format_number;
use adminstyle_settings::SpacingSettings;

/// Smallest comfortable interactive height, in px
pub const MIN_TOUCH_TARGET: f64 = 44.0;

/// Estimated heights of interactive items: assumed content height plus the
/// configured vertical padding
pub struct TouchTargetRule;

struct Target {
    path: &'static str,
    label: &'static str,
    base: f64,
    top: Option<f64>,
    bottom: Option<f64>,
}

impl TouchTargetRule {
    fn targets(spacing: &SpacingSettings, base_size: f64) -> Vec<Target> {
        let menu = &spacing.menu_padding;
        let bar = &spacing.admin_bar_padding;
        let submenu = &spacing.submenu_spacing;
        let mobile = &spacing.mobile_overrides;

        // Submenu item padding applies to both top and bottom
        let item_padding = px(submenu.item_padding, submenu.unit, base_size);

        let mut targets = vec![
            Target {
                path: "spacing.menu_padding",
                label: "Admin menu items",
                base: 24.0,
                top: px(menu.top, menu.unit, base_size),
                bottom: px(menu.bottom, menu.unit, base_size),
            },
            Target {
                path: "spacing.admin_bar_padding",
                label: "Admin bar items",
                base: 24.0,
                top: px(bar.top, bar.unit, base_size),
                bottom: px(bar.bottom, bar.unit, base_size),
            },
            Target {
                path: "spacing.submenu_spacing",
                label: "Submenu items",
                base: 20.0,
                top: item_padding,
                bottom: item_padding,
            },
        ];

        if mobile.enabled {
            targets.push(Target {
                path: "spacing.mobile_overrides",
                label: "Mobile menu items",
                base: 24.0,
                top: px(mobile.top, mobile.unit, base_size),
                bottom: px(mobile.bottom, mobile.unit, base_size),
            });
        }

        targets
    }
}

impl LintRule for TouchTargetRule {
    fn name(&self) -> &'static str {
        "touch-target"
    }

    fn description(&self) -> &'static str {
        "Interactive items should be at least 44px tall"
    }

    fn check_spacing(&self, spacing: &SpacingSettings, base_size: f64) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for target in Self::targets(spacing, base_size) {
            if target.top.is_none() && target.bottom.is_none() {
                continue;
            }

            let height = target.base + target.top.unwrap_or(0.0) + target.bottom.unwrap_or(0.0);
            if height < MIN_TOUCH_TARGET {
                diagnostics.push(
                    Diagnostic::warning(
                        self.name(),
                        format!(
                            "{} are about {}px tall, below the {}px minimum touch target",
                            target.label,
                            format_number(height),
                            format_number(MIN_TOUCH_TARGET)
                        ),
                        target.path,
                    )
                    .with_suggestion(format!(
                        "Increase the vertical padding by at least {}px in total",
                        format_number(MIN_TOUCH_TARGET - height)
                    )),
                );
            }
        }

        diagnostics
    }
}
