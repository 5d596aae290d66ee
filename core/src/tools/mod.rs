//! Tool layer: sandboxed filesystem primitives, the registry, and the
//! built-in handlers behind the `[TOOL:...]` directive surface.

pub mod context;
pub mod handlers;
pub mod registry;
pub mod sandbox;
pub mod spec;

use std::path::Path;

use crate::error::Result;
use registry::ToolRegistry;

/// Build the fully wired built-in registry for one project root.
///
/// Validation runs here so a spec/handler mismatch fails at startup
/// instead of surfacing as a spurious unknown-tool result mid-run.
pub fn build_registry(root: &Path) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new(spec::build_specs());
    handlers::register_builtin_handlers(&mut registry, root);
    registry.validate()?;
    Ok(registry)
}
