use crate::config::Config;
use adminstyle_common::Unit;
use adminstyle_settings::{ValidationErrors, Validator};
use adminstyle_workspace::ServiceError;
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// JSON file with a full or partial settings document
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// JSON file with a full or partial settings document
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Target unit for every spacing section (px, rem)
    pub unit: String,
}

fn read_candidate(path: &Path) -> Result<Value> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}

pub(crate) fn print_field_errors(errors: &ValidationErrors) {
    for (path, message) in errors.to_messages() {
        eprintln!("  {} {} - {}", "✗".red(), path.bright_white(), message.red());
    }
}

fn rejected(errors: &ValidationErrors) -> anyhow::Error {
    print_field_errors(errors);
    anyhow!("{} field(s) rejected, nothing was saved", errors.len())
}

/// Check a candidate without touching the stored settings
pub fn validate(args: ValidateArgs, _cwd: &str) -> Result<()> {
    let candidate = read_candidate(&args.file)?;

    let validated = Validator::new().validate(&candidate).map_err(|errors| rejected(&errors))?;

    if validated.is_empty() {
        println!("{} No known settings in {}", "⚠️".yellow(), args.file.display());
    } else {
        println!("{} {} is valid", "✅".green(), args.file.display());
    }
    Ok(())
}

pub fn update(args: UpdateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let service = config.service(cwd);
    let candidate = read_candidate(&args.file)?;

    match service.update(&candidate) {
        Ok(_) => {}
        Err(ServiceError::Validation(errors)) => return Err(rejected(&errors)),
        Err(other) => return Err(other.into()),
    }

    println!("{} Settings updated", "✅".green());
    for warning in service.spacing_warnings()? {
        println!("  {} {}", "⚠️".yellow(), warning.yellow());
    }
    Ok(())
}

pub fn reset(cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    config.service(cwd).reset()?;

    println!("{} Settings reset to defaults", "✅".green());
    Ok(())
}

pub fn convert(args: ConvertArgs, cwd: &str) -> Result<()> {
    let unit = Unit::parse(&args.unit)
        .ok_or_else(|| anyhow!("Unknown unit: {}. Use: px or rem", args.unit))?;

    let config = Config::load(cwd)?;
    config.service(cwd).convert_spacing_units(unit)?;

    println!(
        "{} Spacing converted to {} (base font size {}px)",
        "✅".green(),
        unit,
        config.base_font_size
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_update_then_reset() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();
        let file = write(&dir, "patch.json", r#"{"admin_menu": {"width": 180}}"#);

        update(UpdateArgs { file }, &cwd).unwrap();
        let service = Config::default().service(&cwd);
        assert_eq!(service.settings().unwrap().admin_menu.width, Some(180));

        reset(&cwd).unwrap();
        assert_eq!(service.settings().unwrap().admin_menu.width, None);
    }

    #[test]
    fn test_rejected_update_saves_nothing() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();
        let file = write(&dir, "patch.json", r#"{"admin_bar": {"height": 600}}"#);

        assert!(update(UpdateArgs { file }, &cwd).is_err());
        assert!(!Config::default().get_settings_path(&cwd).exists());
    }

    #[test]
    fn test_validate_reports_bad_json() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();
        let file = write(&dir, "broken.json", "{");

        assert!(validate(ValidateArgs { file }, &cwd).is_err());
    }

    #[test]
    fn test_convert_rejects_unknown_unit() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();

        assert!(convert(ConvertArgs { unit: "em".to_string() }, &cwd).is_err());
        convert(ConvertArgs { unit: "rem".to_string() }, &cwd).unwrap();
    }
}
