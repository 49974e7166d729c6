//! box-shadow synthesis from the four independent effect fields

use adminstyle_settings::{EffectSettings, ShadowDirection, ShadowIntensity};

/// Shadow color used when none is configured
pub const DEFAULT_SHADOW_COLOR: &str = "rgba(0, 0, 0, 0.2)";

/// Intensity → (offset magnitude, spread, default blur), all px
fn intensity_table(intensity: ShadowIntensity) -> Option<(i64, i64, i64)> {
    match intensity {
        ShadowIntensity::None => None,
        ShadowIntensity::Subtle => Some((2, 0, 4)),
        ShadowIntensity::Medium => Some((4, 1, 8)),
        ShadowIntensity::Strong => Some((8, 2, 16)),
    }
}

/// Direction → signed unit vector (x, y); y grows downwards
fn direction_vector(direction: ShadowDirection) -> (i64, i64) {
    match direction {
        ShadowDirection::Top => (0, -1),
        ShadowDirection::Right => (1, 0),
        ShadowDirection::Bottom => (0, 1),
        ShadowDirection::Left => (-1, 0),
        ShadowDirection::Center => (0, 0),
    }
}

fn px(value: i64) -> String {
    if value == 0 {
        "0".to_string()
    } else {
        format!("{}px", value)
    }
}

/// The `box-shadow` value for an element, or `None` when the intensity is
/// unset or `none`
pub fn box_shadow(effect: &EffectSettings) -> Option<String> {
    let (magnitude, spread, default_blur) = intensity_table(effect.shadow_intensity?)?;
    let (dx, dy) = direction_vector(effect.shadow_direction.unwrap_or(ShadowDirection::Bottom));
    let blur = effect.shadow_blur.unwrap_or(default_blur);
    let color = effect
        .shadow_color
        .as_ref()
        .map(|color| color.as_str())
        .unwrap_or(DEFAULT_SHADOW_COLOR);

    Some(format!(
        "{} {} {} {} {}",
        px(magnitude * dx),
        px(magnitude * dy),
        px(blur),
        px(spread),
        color
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use adminstyle_settings::HexColor;

    fn effect(intensity: Option<ShadowIntensity>, direction: Option<ShadowDirection>) -> EffectSettings {
        EffectSettings {
            shadow_intensity: intensity,
            shadow_direction: direction,
            ..EffectSettings::default()
        }
    }

    #[test]
    fn test_none_and_unset_suppress_shadow() {
        assert_eq!(box_shadow(&effect(None, Some(ShadowDirection::Top))), None);
        assert_eq!(box_shadow(&effect(Some(ShadowIntensity::None), None)), None);
    }

    #[test]
    fn test_direction_scales_magnitude() {
        assert_eq!(
            box_shadow(&effect(Some(ShadowIntensity::Medium), Some(ShadowDirection::Top))).unwrap(),
            "0 -4px 8px 1px rgba(0, 0, 0, 0.2)"
        );
        assert_eq!(
            box_shadow(&effect(Some(ShadowIntensity::Strong), Some(ShadowDirection::Left))).unwrap(),
            "-8px 0 16px 2px rgba(0, 0, 0, 0.2)"
        );
        assert_eq!(
            box_shadow(&effect(Some(ShadowIntensity::Subtle), Some(ShadowDirection::Center))).unwrap(),
            "0 0 4px 0 rgba(0, 0, 0, 0.2)"
        );
    }

    #[test]
    fn test_defaults_to_bottom() {
        assert_eq!(
            box_shadow(&effect(Some(ShadowIntensity::Subtle), None)).unwrap(),
            "0 2px 4px 0 rgba(0, 0, 0, 0.2)"
        );
    }

    #[test]
    fn test_blur_and_color_pass_through() {
        let effect = EffectSettings {
            shadow_intensity: Some(ShadowIntensity::Medium),
            shadow_direction: Some(ShadowDirection::Right),
            shadow_blur: Some(0),
            shadow_color: HexColor::parse("#00000033"),
            ..EffectSettings::default()
        };

        assert_eq!(box_shadow(&effect).unwrap(), "4px 0 0 1px #00000033");
    }
}
