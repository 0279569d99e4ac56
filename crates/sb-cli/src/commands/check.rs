//! Check command: validate and synthesize without writing anything.

use crate::{cli::CliConfig, commands::GeneratorArgs, manifest::load_activities, Result};
use clap::Args;
use console::style;
use itertools::Itertools;
use sb_synth::{Generator, GenerationReport};
use std::fmt::Write as _;
use std::path::PathBuf;

/// Arguments for the check command
#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    /// Manifest file(s) describing the activities (.json or .toml)
    #[arg(required = true)]
    pub manifests: Vec<PathBuf>,

    #[command(flatten)]
    pub generator: GeneratorArgs,
}

/// Execute the check command
pub fn check_command(args: CheckArgs, config: &CliConfig) -> Result<()> {
    let generator_config = args.generator.apply(config.generator.clone());
    let activities = load_activities(&args.manifests)?;
    let generation = Generator::new(generator_config).generate(&activities)?;

    print!("{}", render_report(&generation.report));
    println!(
        "{} {} activities, {} methods",
        style("✓").green(),
        generation.report.activities.len(),
        generation.report.method_count()
    );
    Ok(())
}

/// One line per activity, one indented line per template group, then the duplicates.
pub fn render_report(report: &GenerationReport) -> String {
    let mut out = String::new();
    for activity in &report.activities {
        let _ = writeln!(
            out,
            "{} ({} methods)",
            activity.activity,
            activity.method_count()
        );
        for group in &activity.groups {
            let tag = if group.tag.is_empty() {
                "-".to_string()
            } else {
                group.tag.clone()
            };
            let _ = writeln!(
                out,
                "    {:<32} tag {:<12} params [{}] optional {} variants {}",
                group.method,
                tag,
                group.params.iter().join(", "),
                group.optional,
                group.variants
            );
        }
    }
    if !report.duplicates.is_empty() {
        let _ = writeln!(out, "duplicate signatures:");
        for duplicate in &report.duplicates {
            let _ = writeln!(
                out,
                "    {}: {}({}) methods #{} and #{}",
                duplicate.activity,
                duplicate.method,
                duplicate.signature,
                duplicate.first,
                duplicate.repeat
            );
        }
    }
    out
}
