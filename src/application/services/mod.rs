//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (TemplateProvider, FileSystem)
//! but are themselves concrete structs, not traits.

mod bracket;

pub use bracket::BracketService;
