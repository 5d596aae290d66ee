use std::collections::HashMap;
use std::sync::Arc;

use crate::directive::ParsedDirective;
use crate::error::ToolError;
use crate::tools::context::{ToolInvocation, ToolOutput};
use crate::tools::spec::{render_catalog, ToolSpec};

/// A single executable tool. Handlers are synchronous: every built-in
/// tool is filesystem-bound and runs inside `spawn_blocking` at the
/// call site when needed.
pub trait ToolHandler: Send + Sync {
    fn handle(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError>;
}

/// Name-keyed tool table plus the ordered catalog used for prompt
/// rendering. Lookup misses surface as `UnknownTool`, which renders
/// inline like any other tool failure rather than aborting the run.
pub struct ToolRegistry {
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
    specs: Vec<ToolSpec>,
}

impl ToolRegistry {
    pub fn new(specs: Vec<ToolSpec>) -> Self {
        Self {
            handlers: HashMap::new(),
            specs,
        }
    }

    pub fn register(&mut self, name: &str, handler: Arc<dyn ToolHandler>) {
        self.handlers.insert(name.to_string(), handler);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn specs(&self) -> &[ToolSpec] {
        &self.specs
    }

    pub fn catalog(&self) -> String {
        render_catalog(&self.specs)
    }

    /// Execute one parsed directive against the registered handler.
    pub fn dispatch(&self, directive: &ParsedDirective) -> Result<ToolOutput, ToolError> {
        let handler = self
            .handlers
            .get(&directive.name)
            .ok_or_else(|| ToolError::UnknownTool(directive.name.clone()))?;
        let invocation = ToolInvocation::from(directive);
        handler.handle(&invocation)
    }

    /// Every spec must have a handler and vice versa; a mismatch is a
    /// wiring bug caught at construction time.
    pub fn validate(&self) -> Result<(), ToolError> {
        for spec in &self.specs {
            if !self.handlers.contains_key(spec.name) {
                return Err(ToolError::UnknownTool(spec.name.to_string()));
            }
        }
        for name in self.handlers.keys() {
            if !self.specs.iter().any(|s| s.name == name) {
                return Err(ToolError::UnknownTool(name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directive::extract_directives;

    struct Echo;

    impl ToolHandler for Echo {
        fn handle(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::confirmation(invocation.args.join(",")))
        }
    }

    fn directive(text: &str) -> ParsedDirective {
        extract_directives(text).remove(0)
    }

    #[test]
    fn dispatch_routes_to_registered_handler() {
        let mut registry = ToolRegistry::new(Vec::new());
        registry.register("echo", Arc::new(Echo));
        let out = registry
            .dispatch(&directive("[TOOL:echo|a|b]"))
            .expect("dispatch succeeds");
        assert_eq!(out.render(), "\n✅ a,b");
    }

    #[test]
    fn dispatch_unknown_tool_is_recoverable() {
        let registry = ToolRegistry::new(Vec::new());
        let err = registry
            .dispatch(&directive("[TOOL:nonexistent|x]"))
            .expect_err("unknown tool");
        assert!(matches!(err, ToolError::UnknownTool(ref n) if n == "nonexistent"));
        assert_eq!(err.to_string(), "알 수 없는 도구: nonexistent");
    }

    #[test]
    fn validate_flags_spec_without_handler() {
        let registry = ToolRegistry::new(crate::tools::spec::build_specs());
        assert!(registry.validate().is_err());
    }
}
