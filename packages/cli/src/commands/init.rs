use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Settings document path
    #[arg(short, long, default_value = "adminstyle.settings.json")]
    pub settings_path: String,

    /// Root font size for px↔rem conversion
    #[arg(short, long, default_value_t = 16.0)]
    pub base_font_size: f64,

    /// Force overwrite existing config and settings
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing adminstyle...".bright_blue().bold());

    let config = Config {
        settings_path: args.settings_path.clone(),
        base_font_size: args.base_font_size,
        ..Config::default()
    };

    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    let settings_path = config.get_settings_path(cwd);
    if !settings_path.exists() || args.force {
        config.service(cwd).reset()?;
        println!("  {} Created {} with defaults", "✓".green(), args.settings_path);
    }

    println!();
    println!("{}", "✅ adminstyle initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Write a partial settings file, e.g. {{\"admin_bar\": {{\"height\": 40}}}}");
    println!("  2. Run: adminstyle update <file>");
    println!("  3. Run: adminstyle compile -o admin.css");

    Ok(())
}
