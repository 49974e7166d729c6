use crate::commands::settings::print_field_errors;
use crate::config::Config;
use adminstyle_workspace::ServiceError;
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output file (prints to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Envelope produced by `adminstyle export`
    pub file: PathBuf,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let payload = config.service(cwd).export_json(Utc::now())?;

    match args.output {
        Some(output) => {
            let output_file = PathBuf::from(cwd).join(output);
            fs::write(&output_file, payload)?;
            println!("{} Exported settings to {}", "✅".green(), output_file.display());
        }
        None => println!("{}", payload),
    }
    Ok(())
}

pub fn import(args: ImportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let payload = fs::read_to_string(&args.file)
        .with_context(|| format!("Cannot read {}", args.file.display()))?;

    match config.service(cwd).import(&payload) {
        Ok(_) => {
            println!("{} Imported settings from {}", "✅".green(), args.file.display());
            Ok(())
        }
        Err(ServiceError::Import(error)) => {
            if let Some(fields) = error.field_errors() {
                print_field_errors(fields);
            }
            Err(error).context("Import rejected, stored settings unchanged")
        }
        Err(other) => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_export_then_import_elsewhere() {
        let source = TempDir::new().unwrap();
        let source_cwd = source.path().display().to_string();
        Config::default()
            .service(&source_cwd)
            .update(&json!({ "admin_menu": { "width": 180 } }))
            .unwrap();

        export(ExportArgs { output: Some(PathBuf::from("backup.json")) }, &source_cwd).unwrap();

        let target = TempDir::new().unwrap();
        let target_cwd = target.path().display().to_string();
        import(ImportArgs { file: source.path().join("backup.json") }, &target_cwd).unwrap();

        let imported = Config::default().service(&target_cwd).settings().unwrap();
        assert_eq!(imported.admin_menu.width, Some(180));
    }

    #[test]
    fn test_foreign_envelope_is_rejected() {
        let dir = TempDir::new().unwrap();
        let cwd = dir.path().display().to_string();
        let file = dir.path().join("foreign.json");
        fs::write(&file, r#"{"plugin_marker": "OTHER", "settings": {}}"#).unwrap();

        assert!(import(ImportArgs { file }, &cwd).is_err());
        assert!(!Config::default().get_settings_path(&cwd).exists());
    }
}
