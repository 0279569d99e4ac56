//! Springboard CLI Binary
//!
//! Generates typed navigation helpers from activity route manifests.
//!
//! # Usage
//!
//! ```bash
//! # Write the generated class under a source root
//! springboard generate routes.json -o app/src/main/java
//!
//! # Print the generated class for two manifests
//! springboard generate core.toml feature.json --package com.example.nav
//!
//! # Validate manifests and list the methods that would be generated
//! springboard check routes.json
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use sb_cli::{
    cli::CliConfig,
    commands::{self, check::CheckArgs, generate::GenerateArgs},
    diagnostics::setup_error_reporting,
    Result,
};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "springboard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Springboard: typed navigation methods generated from activity route descriptors",
    long_about = r#"
Springboard turns activity route descriptors into one generated class with a
strongly typed navigation method per activity, template, and optional-parameter subset.

EXAMPLES:
    springboard generate routes.json -o src/main/java   # Write under a source root
    springboard generate routes.toml --emit json         # Dump the method IR
    springboard check routes.json                        # Validate and summarize
    "#
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Set log level (overrides --verbose/--quiet)
    #[arg(long, global = true, value_enum)]
    log: Option<LogLevel>,

    /// Set log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the navigation class from manifests
    Generate(GenerateArgs),

    /// Validate manifests and report the methods that would be generated
    Check(CheckArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_error_reporting()?;
    setup_logging(cli.verbose, cli.quiet, cli.log, cli.log_format)?;

    if let Some(dir) = &cli.directory {
        std::env::set_current_dir(dir)?;
    }

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Generate(args) => commands::generate_command(args, &config),
        Commands::Check(args) => commands::check_command(args, &config),
    });

    match result {
        Ok(()) => {
            if cli.verbose > 0 {
                info!("Command completed successfully");
            }
            Ok(())
        }
        Err(e) => {
            use tracing::error;
            if !sb_cli::diagnostics::render_cli_error(&e) {
                error!("{}", e);
            }
            if cli.verbose > 0 {
                error!(?e, "detailed error context");
            }
            std::process::exit(1);
        }
    }
}

fn setup_logging(
    verbose: u8,
    quiet: bool,
    log_level: Option<LogLevel>,
    log_format: LogFormat,
) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if let Some(level) = log_level {
        EnvFilter::new(match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // stdout carries generated source, so logs go to stderr
    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_level(true);

    match log_format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(formatter)
                .with(filter)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(formatter.json())
                .with(filter)
                .init();
        }
    }

    Ok(())
}
