//! Whole-subsection unit conversion

use crate::document::{SpacingSection, SpacingSettings};
use crate::schema::schema;
use adminstyle_common::{convert, Unit};
use tracing::{debug, instrument};

/// Rewrite one spacing subsection (`name` as in `SpacingSettings::SECTIONS`)
/// into `target`, clamping each converted length to the target unit's bounds.
/// Does nothing when the subsection is already in `target`.
pub fn convert_subsection(name: &str, section: &mut dyn SpacingSection, target: Unit, base_size: f64) {
    let from = section.unit();
    if from == target {
        return;
    }

    let names: Vec<&'static str> = section.lengths().into_iter().map(|(length, _)| length).collect();
    for (length, value) in names.into_iter().zip(section.lengths_mut()) {
        let Some(value) = value.as_mut() else {
            continue;
        };

        let converted = convert(*value, from, target, base_size);
        let bounds = schema()
            .get(&format!("spacing.{}.{}", name, length))
            .and_then(|field| field.kind.resolve(target).bounds());

        *value = match bounds {
            Some((min, max)) if converted < min || converted > max => {
                debug!(section = name, length, converted, min, max, "Clamped converted length");
                converted.clamp(min, max)
            }
            _ => converted,
        };
    }

    section.set_unit(target);
    debug!(section = name, %from, %target, "Converted spacing subsection");
}

/// Rewrite every spacing subsection into `target`.
///
/// Subsections already tagged with `target` are left untouched, so calling
/// this twice with the same target changes nothing the second time. Unset
/// lengths stay unset. Converted lengths are clamped to the target unit's
/// bounds so the result always validates.
#[instrument(skip(spacing))]
pub fn convert_section(spacing: &SpacingSettings, target: Unit, base_size: f64) -> SpacingSettings {
    let mut converted = spacing.clone();

    for (name, section) in converted.sections_mut() {
        convert_subsection(name, section, target, base_size);
    }

    converted
}
