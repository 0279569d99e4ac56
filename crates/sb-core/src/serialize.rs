use crate::ir::CompilationUnit;
use crate::Result;

/// Turns a synthesized unit into source text. Implemented once per output language.
pub trait UnitSerializer: Send + Sync {
    fn serialize_unit(&self, unit: &CompilationUnit) -> Result<String>;

    /// File name the unit is written to, relative to the package directory.
    fn file_name(&self, unit: &CompilationUnit) -> String;
}

/// Serializes the IR itself as JSON, for inspection and for external renderers.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl UnitSerializer for JsonSerializer {
    fn serialize_unit(&self, unit: &CompilationUnit) -> Result<String> {
        Ok(serde_json::to_string_pretty(unit)?)
    }

    fn file_name(&self, unit: &CompilationUnit) -> String {
        format!("{}.json", unit.class.name.simple_name())
    }
}
