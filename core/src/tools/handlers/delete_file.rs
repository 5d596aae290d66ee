use std::path::PathBuf;

use crate::error::ToolError;
use crate::tools::context::{ToolInvocation, ToolOutput};
use crate::tools::registry::ToolHandler;
use crate::tools::sandbox;

pub struct DeleteFileHandler {
    root: PathBuf,
}

impl DeleteFileHandler {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl ToolHandler for DeleteFileHandler {
    fn handle(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        let path = invocation.arg(0)?;
        let message = sandbox::delete(path, &self.root)?;
        Ok(ToolOutput::confirmation(message))
    }
}
