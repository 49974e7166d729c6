use crate::config::Config;
use adminstyle_compiler_css::{calculate_compression_ratio, compile_to_css};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CompileArgs {
    /// Minify regardless of the stored performance settings
    #[arg(long)]
    pub minify: bool,

    /// Output file (prints to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Serve through the stylesheet cache, as a live request would
    #[arg(long)]
    pub cached: bool,
}

pub fn compile(args: CompileArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let service = config.service(cwd);
    let document = service.settings()?;

    let css = if args.cached {
        service.stylesheet().unwrap_or_default()
    } else if args.minify {
        compile_to_css(&document, true)?
    } else {
        service.compile_document(&document)?
    };

    let Some(output) = args.output else {
        println!("{}", css);
        return Ok(());
    };

    let output_file = PathBuf::from(cwd).join(output);
    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_file, &css)?;

    println!(
        "{} Wrote {} ({} bytes)",
        "✅".green(),
        output_file.display(),
        css.len()
    );
    if args.minify || document.performance.minify_css {
        let original = compile_to_css(&document, false)?;
        println!(
            "   {}",
            format!(
                "minified {:.1}% smaller",
                calculate_compression_ratio(original.len(), css.len())
            )
            .dimmed()
        );
    }

    Ok(())
}
