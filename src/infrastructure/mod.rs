//! Infrastructure layer: template sources, I/O implementations and DI container
//!
//! This layer implements I/O boundary traits and wires up services.

pub mod di;
pub mod error;
pub mod templates;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use templates::{BuiltinTemplates, DirectoryTemplates};
pub use traits::{FileSystem, RealFileSystem, TemplateProvider};
