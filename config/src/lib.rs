// Filebot Configuration System
// Layered configuration management

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
