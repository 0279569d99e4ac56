//! Command implementations for the springboard CLI

pub mod check;
pub mod generate;

pub use check::check_command;
pub use generate::generate_command;

use clap::Args;
use sb_core::{DuplicatePolicy, GeneratorConfig};

/// Flags shared by commands that run the generator
#[derive(Debug, Clone, Default, Args)]
pub struct GeneratorArgs {
    /// Package of the generated class
    #[arg(long)]
    pub package: Option<String>,

    /// Simple name of the generated class
    #[arg(long = "class")]
    pub class_name: Option<String>,

    /// Prefix of every generated method name
    #[arg(long)]
    pub prefix: Option<String>,

    /// Fail when two generated methods share a signature
    #[arg(long)]
    pub deny_duplicates: bool,
}

impl GeneratorArgs {
    /// Apply the flags on top of a loaded configuration.
    pub fn apply(&self, mut config: GeneratorConfig) -> GeneratorConfig {
        if let Some(package) = &self.package {
            config.package = package.clone();
        }
        if let Some(class_name) = &self.class_name {
            config.class_name = class_name.clone();
        }
        if let Some(prefix) = &self.prefix {
            config.method_prefix = prefix.clone();
        }
        if self.deny_duplicates {
            config.duplicates = DuplicatePolicy::Deny;
        }
        config
    }
}
