//! Manifest loading. A manifest is a JSON or TOML document with an `activities` list;
//! the format is picked by file extension, JSON being the default.

use std::path::{Path, PathBuf};

use sb_core::{ActivityDescriptor, Manifest};
use tracing::debug;

use crate::diagnostics::{line_column_offset, ManifestError};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Toml,
}

impl ManifestFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => ManifestFormat::Toml,
            _ => ManifestFormat::Json,
        }
    }
}

pub fn parse_manifest(path: &Path, content: String) -> Result<Manifest> {
    let display = path.display().to_string();
    match ManifestFormat::from_path(path) {
        ManifestFormat::Json => match serde_json::from_str::<Manifest>(&content) {
            Ok(manifest) => Ok(manifest),
            Err(e) => {
                let offset = line_column_offset(&content, e.line(), e.column());
                let error = ManifestError::new(display, content, e.to_string())
                    .with_span(offset..offset);
                Err(Box::new(error).into())
            }
        },
        ManifestFormat::Toml => match toml::from_str::<Manifest>(&content) {
            Ok(manifest) => Ok(manifest),
            Err(e) => {
                let span = e.span();
                let mut error = ManifestError::new(display, content, e.message().to_string());
                if let Some(span) = span {
                    error = error.with_span(span);
                }
                Err(Box::new(error).into())
            }
        },
    }
}

pub fn load_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)?;
    parse_manifest(path, content)
}

/// Load every manifest and concatenate their activities in argument order.
pub fn load_activities(paths: &[PathBuf]) -> Result<Vec<ActivityDescriptor>> {
    let mut activities = Vec::new();
    for path in paths {
        let manifest = load_manifest(path)?;
        debug!(
            "loaded {} activities from {}",
            manifest.activities.len(),
            path.display()
        );
        activities.extend(manifest.activities);
    }
    Ok(activities)
}
