//! Doxygen XML Reference Generator CLI

use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process;

use doxyref::{generate_references, DocsConfig, DocsError};

#[derive(Parser)]
#[command(name = "doxyref")]
#[command(about = "Generate RST reference tables from Doxygen XML")]
#[command(version)]
struct Cli {
    /// Doxygen XML directory containing index.xml
    xml_dir: Option<PathBuf>,

    /// Directory that relative paths are resolved against
    #[arg(short, long)]
    base: Option<PathBuf>,

    /// JSON configuration file (paths inside are relative to its directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output path of the linked function index
    #[arg(long)]
    function_index: Option<PathBuf>,

    /// Output path of the function reference document
    #[arg(long)]
    function_reference: Option<PathBuf>,

    /// Output path of the variable index
    #[arg(long)]
    variable_index: Option<PathBuf>,

    /// Also dump every extracted record as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Skip functions whose name matches this regex
    #[arg(long)]
    exclude: Option<String>,

    /// Quiet mode (suppress output)
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn build_config(cli: &Cli) -> Result<DocsConfig, DocsError> {
    let base = cli.base.clone().unwrap_or_else(|| PathBuf::from("."));

    let mut config = match &cli.config {
        Some(path) => {
            let dir = path.parent().unwrap_or(Path::new(""));
            DocsConfig::load(path)?.resolve(&base.join(dir))
        }
        None => DocsConfig::default().resolve(&base),
    };

    if let Some(dir) = &cli.xml_dir {
        config.xml_dir = base.join(dir);
    }
    if let Some(path) = &cli.function_index {
        config.function_index = base.join(path);
    }
    if let Some(path) = &cli.function_reference {
        config.function_reference = base.join(path);
    }
    if let Some(path) = &cli.variable_index {
        config.variable_index = base.join(path);
    }
    if let Some(path) = &cli.json {
        config.json_output = Some(base.join(path));
    }
    if let Some(pattern) = &cli.exclude {
        config.exclude = Some(pattern.clone());
    }

    Ok(config)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = build_config(&cli).and_then(|config| {
        if !cli.quiet {
            println!(
                "{} Generating references from {}",
                "→".blue().bold(),
                config.xml_dir.display()
            );
        }
        generate_references(&config).map(|refs| (config, refs))
    });

    match result {
        Ok((config, refs)) => {
            if !cli.quiet {
                println!("{} References generated successfully!\n", "✓".green().bold());
                println!("  {} Functions:  {}", "•".dimmed(), refs.functions.len());
                println!("  {} Constants:  {}", "•".dimmed(), refs.constants.len());
                println!();
                for path in [
                    &config.function_index,
                    &config.function_reference,
                    &config.variable_index,
                ] {
                    println!("  Output: {}", path.display().to_string().cyan());
                }
                if let Some(path) = &config.json_output {
                    println!("  Output: {}", path.display().to_string().cyan());
                }
            }
        }
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            process::exit(1);
        }
    }
}
