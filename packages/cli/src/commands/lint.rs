use crate::config::Config;
use adminstyle_linter::DiagnosticLevel;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Args, Debug)]
pub struct LintArgs {
    /// Show suggestions alongside each finding
    #[arg(short, long)]
    pub suggestions: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Print advisory findings for the stored spacing. Never fails on findings.
pub fn lint(args: LintArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let diagnostics = config.service(cwd).spacing_advice()?;

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
        return Ok(());
    }

    println!("🔍 {} spacing advisor", "Running".green().bold());
    println!();

    for diagnostic in &diagnostics {
        let level = match diagnostic.level {
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };
        println!(
            "  {}[{}] {} {}",
            level,
            diagnostic.rule.dimmed(),
            diagnostic.path.bright_white(),
            diagnostic.message
        );

        if args.suggestions {
            if let Some(ref suggestion) = diagnostic.suggestion {
                println!("    {} {}", "help:".cyan(), suggestion);
            }
        }
    }

    let warnings = diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Warning)
        .count();

    println!();
    println!("✨ {} Linting complete!", "Done".green().bold());
    println!("   Total diagnostics: {}", diagnostics.len());
    if warnings > 0 {
        println!("   {} {}", "Warnings:".yellow(), warnings);
    }

    Ok(())
}
