use crate::config::Config;
use adminstyle_settings::{presets as preset_table, PresetKind};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct PresetsArgs {
    /// Preset family to apply (palette, spacing, shadow)
    #[arg(requires = "name")]
    pub kind: Option<String>,

    /// Preset to apply
    pub name: Option<String>,
}

pub fn presets(args: PresetsArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let service = config.service(cwd);

    if let (Some(kind), Some(name)) = (&args.kind, &args.name) {
        let kind = PresetKind::parse(kind)
            .ok_or_else(|| anyhow!("Unknown preset kind: {}. Use: palette, spacing or shadow", kind))?;
        service.apply_preset(kind, name)?;
        println!("{} Applied {} preset {}", "✅".green(), kind.as_str(), name.bright_white());
        return Ok(());
    }

    let report = service.detect_presets()?;

    for kind in PresetKind::ALL {
        let active: Vec<&str> = match kind {
            PresetKind::Palette => vec![report.palette.as_str()],
            PresetKind::Spacing => vec![report.spacing.as_str()],
            PresetKind::Shadow => report.shadows.iter().map(|(_, preset)| preset.as_str()).collect(),
        };

        println!("{}", kind.as_str().bright_blue().bold());
        for record in preset_table(kind) {
            let marker = if active.contains(&record.name) {
                "●".green()
            } else {
                "○".dimmed()
            };
            println!("  {} {:<12} {}", marker, record.name, record.label.dimmed());
        }
    }

    println!();
    println!("Shadows in use:");
    for (element, preset) in &report.shadows {
        println!("  {:<12} {}", element, preset);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_apply_preset_by_name() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();

        let args = PresetsArgs {
            kind: Some("spacing".to_string()),
            name: Some("compact".to_string()),
        };
        presets(args, &cwd).unwrap();

        let report = Config::default().service(&cwd).detect_presets().unwrap();
        assert_eq!(report.spacing, "compact");
    }

    #[test]
    fn test_unknown_kind_and_name() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();

        let args = PresetsArgs {
            kind: Some("fonts".to_string()),
            name: Some("big".to_string()),
        };
        assert!(presets(args, &cwd).is_err());

        let args = PresetsArgs {
            kind: Some("shadow".to_string()),
            name: Some("glow".to_string()),
        };
        assert!(presets(args, &cwd).is_err());
    }

    #[test]
    fn test_listing_without_settings() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();

        presets(PresetsArgs { kind: None, name: None }, &cwd).unwrap();
    }
}
