//! Springboard CLI library
//!
//! Loads activity manifests, runs the generator over them, and writes the rendered
//! navigation class. The `springboard` binary is a thin clap front end over this crate.

pub mod cli;
pub mod commands;
pub mod diagnostics;
pub mod manifest;

// CLI-specific error handling
pub mod error {
    use thiserror::Error;

    use crate::diagnostics::ManifestError;

    #[derive(Error, Debug)]
    pub enum CliError {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("Configuration error: {0}")]
        Config(String),

        #[error(transparent)]
        Manifest(#[from] Box<ManifestError>),

        #[error("Generation error: {0}")]
        Generation(#[from] sb_core::Error),
    }

    pub type Result<T> = std::result::Result<T, CliError>;
}

pub use error::{CliError, Result};
