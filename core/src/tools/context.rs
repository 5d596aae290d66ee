use crate::directive::ParsedDirective;
use crate::error::{Result, ToolError};

/// Invocation payload passed to a tool handler.
///
/// Arguments are positional strings exactly as split out of the directive
/// token; handlers interpret them.
#[derive(Debug, Clone)]
pub struct ToolInvocation {
    pub name: String,
    pub args: Vec<String>,
}

impl From<&ParsedDirective> for ToolInvocation {
    fn from(directive: &ParsedDirective) -> Self {
        Self {
            name: directive.name.clone(),
            args: directive.args.clone(),
        }
    }
}

impl ToolInvocation {
    /// Required positional argument; empty counts as missing.
    pub fn arg(&self, index: usize) -> Result<&str> {
        match self.args.get(index).map(String::as_str) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ToolError::InvalidArguments(format!(
                "{} 도구에 {}번째 인자가 필요합니다",
                self.name,
                index + 1
            ))),
        }
    }

    /// Everything from `index` on, re-joined on `|`.
    ///
    /// The directive wire format splits on every `|`, so an argument that
    /// legitimately contains pipes (file content) arrives shredded; the
    /// final parameter of a tool reassembles it.
    pub fn rest_joined(&self, index: usize) -> Result<String> {
        if self.args.len() <= index {
            return Err(ToolError::InvalidArguments(format!(
                "{} 도구에 {}번째 인자가 필요합니다",
                self.name,
                index + 1
            )));
        }
        Ok(self.args[index..].join("|"))
    }
}

/// Standard output from a tool, tagged with how the execution loop should
/// render it into the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub content: String,
    /// `None` renders as a `✅` confirmation; `Some(label)` as a labeled
    /// payload block.
    pub label: Option<String>,
}

impl ToolOutput {
    pub fn confirmation(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            label: None,
        }
    }

    pub fn labeled(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            label: Some(label.into()),
        }
    }

    /// The block spliced over the directive's span in the reply.
    pub fn render(&self) -> String {
        match &self.label {
            Some(label) => format!("\n{label}:\n{}", self.content),
            None => format!("\n✅ {}", self.content),
        }
    }
}
