//! Generate command: manifests in, rendered navigation class out.

use crate::{
    cli::{CliConfig, EmitKind},
    commands::GeneratorArgs,
    manifest::load_activities,
    Result,
};
use clap::Args;
use sb_core::ir::CompilationUnit;
use sb_core::{JsonSerializer, UnitSerializer};
use sb_java::JavaRenderer;
use sb_synth::Generator;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments for the generate command
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Manifest file(s) describing the activities (.json or .toml)
    #[arg(required = true)]
    pub manifests: Vec<PathBuf>,

    /// Output file, or source root the unit is placed under by package
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub emit: Option<EmitKind>,

    #[command(flatten)]
    pub generator: GeneratorArgs,
}

pub fn generate_command(args: GenerateArgs, config: &CliConfig) -> Result<()> {
    let generator_config = args.generator.apply(config.generator.clone());
    let emit = args.emit.unwrap_or(config.output.emit);
    let serializer: Box<dyn UnitSerializer> = match emit {
        EmitKind::Java => Box::new(JavaRenderer::from_config(&generator_config)),
        EmitKind::Json => Box::new(JsonSerializer),
    };

    let activities = load_activities(&args.manifests)?;
    let generation = Generator::new(generator_config).generate(&activities)?;
    let source = serializer.serialize_unit(&generation.unit)?;

    let target = args.output.or_else(|| config.output.directory.clone());
    match target {
        Some(target) => {
            let path = output_path(&target, &generation.unit, serializer.as_ref());
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, source)?;
            info!(
                "Wrote {} methods to {}",
                generation.report.method_count(),
                path.display()
            );
        }
        None => print!("{source}"),
    }
    Ok(())
}

/// A target with a file extension is the output file itself; anything else is a source
/// root under which the unit lands at `<package path>/<file name>`.
pub fn output_path(target: &Path, unit: &CompilationUnit, serializer: &dyn UnitSerializer) -> PathBuf {
    if target.extension().is_some() && !target.is_dir() {
        return target.to_path_buf();
    }
    let mut path = target.to_path_buf();
    for segment in unit.package().split('.').filter(|segment| !segment.is_empty()) {
        path.push(segment);
    }
    path.push(serializer.file_name(unit));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sb_core::GeneratorConfig;

    fn unit(package: &str) -> CompilationUnit {
        let config = GeneratorConfig {
            package: package.to_string(),
            ..GeneratorConfig::default()
        };
        Generator::new(config).generate(&[]).unwrap().unit
    }

    #[test]
    fn directory_targets_follow_the_package() {
        let path = output_path(Path::new("out"), &unit("com.example.nav"), &JavaRenderer::new());
        assert_eq!(path, PathBuf::from("out/com/example/nav/Springboard.java"));

        let path = output_path(Path::new("out"), &unit(""), &JsonSerializer);
        assert_eq!(path, PathBuf::from("out/Springboard.json"));
    }

    #[test]
    fn file_targets_are_used_verbatim() {
        let path = output_path(
            Path::new("gen/Routes.java"),
            &unit("com.example.nav"),
            &JavaRenderer::new(),
        );
        assert_eq!(path, PathBuf::from("gen/Routes.java"));
    }
}
