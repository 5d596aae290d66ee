use std::path::PathBuf;

use crate::error::ToolError;
use crate::tools::context::{ToolInvocation, ToolOutput};
use crate::tools::registry::ToolHandler;
use crate::tools::sandbox;

pub struct WriteFileHandler {
    root: PathBuf,
}

impl WriteFileHandler {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl ToolHandler for WriteFileHandler {
    fn handle(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        let path = invocation.arg(0)?.to_string();
        // The content is the final parameter, so pipes inside it are
        // reassembled rather than treated as separators.
        let content = invocation.rest_joined(1)?;
        let message = sandbox::write(&path, &content, &self.root)?;
        Ok(ToolOutput::confirmation(message))
    }
}
