//! Lessbuild CLI - LESS stylesheet build step for static site pipelines
//!
//! Usage: lessbuild <COMMAND>
//!
//! Commands:
//!   build   Compile LESS sources and register the outputs
//!   check   Validate configuration and compiler availability

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};

use lessbuild::artifacts::StaticFiles;
use lessbuild::build::{compile_stylesheets, derive_tasks};
use lessbuild::compiler::{Compiler, LesscCompiler};
use lessbuild::config::{ConfigWarning, SiteConfig};
use lessbuild::error::LessbuildError;

/// Lessbuild - LESS stylesheet build step for static site pipelines
#[derive(Parser, Debug)]
#[command(name = "lessbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile LESS sources and register the outputs
    Build {
        /// Site source root
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Path to the site configuration (defaults to <source>/lessbuild.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Dry run - show what would be compiled
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate configuration and compiler availability
    Check {
        /// Site source root
        #[arg(short, long, default_value = ".")]
        source: PathBuf,

        /// Path to the site configuration (defaults to <source>/lessbuild.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            source,
            config,
            dry_run,
        } => cmd_build(&source, config, dry_run, cli.json, cli.verbose),
        Commands::Check { source, config } => cmd_check(&source, config, cli.json, cli.verbose),
    }
}

/// Load the site configuration, surface warnings, apply overrides.
///
/// The `--source` flag wins over the config file's `source` key, and
/// `LESSBUILD_*` environment variables win over the file.
fn load_site_config(source: &Path, config: Option<PathBuf>, json: bool) -> Result<SiteConfig> {
    let path = config.unwrap_or_else(|| source.join("lessbuild.toml"));
    let (config, warnings) = SiteConfig::load_with_warnings(&path)?;

    if !json {
        print_config_warnings(&path, &warnings);
    }

    let mut config = config.with_env_overrides();
    config.source = source.to_path_buf();
    Ok(config)
}

fn print_config_warnings(path: &Path, warnings: &[ConfigWarning]) {
    for w in warnings {
        if let Some(line) = w.line {
            eprintln!("⚠ Unknown config key '{}' in {}:{}", w.key, path.display(), line);
        } else {
            eprintln!("⚠ Unknown config key '{}' in {}", w.key, path.display());
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?", suggestion);
        }
    }
}

fn cmd_build(
    source: &Path,
    config: Option<PathBuf>,
    dry_run: bool,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let config = load_site_config(source, config, json)?;

    if dry_run {
        let tasks = derive_tasks(&config);
        let skipped = config.less_files.len() - tasks.len();

        if json {
            let planned: Vec<String> = tasks
                .iter()
                .map(|t| t.output_path.display().to_string())
                .collect();
            println!(
                "{}",
                serde_json::json!({ "planned": planned, "skipped": skipped })
            );
        } else {
            for task in &tasks {
                println!(
                    "would compile {} -> {}",
                    task.source_file.display(),
                    task.output_path.display()
                );
            }
            println!("{} stylesheet(s) to compile, {} skipped", tasks.len(), skipped);
        }
        return Ok(());
    }

    let mut registry = StaticFiles::new();
    let report = compile_stylesheets(&config, &mut registry, &mut |task| {
        if verbose > 0 && !json {
            println!(
                "Compiling LESS: {} -> {}",
                task.source_file.display(),
                task.output_path.display()
            );
        }
    })?;

    if json {
        let compiled: Vec<String> = report
            .compiled
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        println!(
            "{}",
            serde_json::json!({ "compiled": compiled, "skipped": report.skipped.len() })
        );
    } else {
        println!(
            "{} compiled, {} skipped",
            report.compiled.len(),
            report.skipped.len()
        );
    }

    Ok(())
}

fn cmd_check(source: &Path, config: Option<PathBuf>, json: bool, verbose: u8) -> Result<()> {
    let config = load_site_config(source, config, json)?;

    let program = config.lessc.clone().ok_or(LessbuildError::MissingCompiler)?;
    let compiler = LesscCompiler::new(&program);
    let available = compiler.is_available();
    let tasks = derive_tasks(&config);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "lessc": program.display().to_string(),
                "available": available,
                "stylesheets": tasks.len(),
            })
        );
    } else {
        println!(
            "lessc: {}{}",
            program.display(),
            if available { "" } else { " (not runnable)" }
        );
        if verbose > 0 {
            for task in &tasks {
                println!(
                    "  {} -> {}",
                    task.source_file.display(),
                    task.output_path.display()
                );
            }
        }
        println!("{} stylesheet(s) configured", tasks.len());
    }

    if !available {
        anyhow::bail!("compiler '{}' is not runnable", program.display());
    }

    Ok(())
}
