//! Core model of the springboard generator: navigation descriptors, semantic types,
//! the method IR produced from them, configuration, and the shared error type.

#[macro_use]
pub mod macros;

pub mod config;
pub mod descriptor;
pub mod error;
pub mod ir;
pub mod pretty;
pub mod serialize;
pub mod ty;

// Re-export commonly used items for convenience
pub use tracing;

pub use config::{DuplicatePolicy, GeneratorConfig, RuntimeApi};
pub use descriptor::{ActivityDescriptor, Annotation, Manifest, ParamDescriptor};
pub use serialize::{JsonSerializer, UnitSerializer};
pub use ty::{ClassName, PrimitiveType, Ty};

pub type Error = crate::error::Error;
pub type Result<T> = crate::error::Result<T>;
