mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    compile, convert, export, import, init, lint, presets, reset, update, validate, CompileArgs,
    ConvertArgs, ExportArgs, ImportArgs, InitArgs, LintArgs, PresetsArgs, UpdateArgs, ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// adminstyle - admin theme settings and stylesheet generation
#[derive(Parser, Debug)]
#[command(name = "adminstyle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a config file and a default settings document
    Init(InitArgs),

    /// Check a settings file without saving it
    Validate(ValidateArgs),

    /// Validate a settings file and merge it into the stored settings
    Update(UpdateArgs),

    /// Generate the stylesheet
    Compile(CompileArgs),

    /// Write the stored settings as a portable envelope
    Export(ExportArgs),

    /// Replace the stored settings with an exported envelope
    Import(ImportArgs),

    /// List presets and which ones are active, or apply one
    Presets(PresetsArgs),

    /// Report spacing accessibility advisories
    Lint(LintArgs),

    /// Convert every spacing section to another unit
    Convert(ConvertArgs),

    /// Restore the default settings
    Reset,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Validate(args) => validate(args, &cwd),
        Command::Update(args) => update(args, &cwd),
        Command::Compile(args) => compile(args, &cwd),
        Command::Export(args) => export(args, &cwd),
        Command::Import(args) => import(args, &cwd),
        Command::Presets(args) => presets(args, &cwd),
        Command::Lint(args) => lint(args, &cwd),
        Command::Convert(args) => convert(args, &cwd),
        Command::Reset => reset(&cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
