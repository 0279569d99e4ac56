//! Java source rendering for springboard units.

pub mod imports;
pub mod renderer;

pub use imports::ImportTable;
pub use renderer::JavaRenderer;
