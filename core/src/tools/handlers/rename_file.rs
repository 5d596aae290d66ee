use std::path::PathBuf;

use crate::error::ToolError;
use crate::tools::context::{ToolInvocation, ToolOutput};
use crate::tools::registry::ToolHandler;
use crate::tools::sandbox;

pub struct RenameFileHandler {
    root: PathBuf,
}

impl RenameFileHandler {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl ToolHandler for RenameFileHandler {
    fn handle(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        let old_path = invocation.arg(0)?;
        let new_path = invocation.arg(1)?;
        let message = sandbox::rename(old_path, new_path, &self.root)?;
        Ok(ToolOutput::confirmation(message))
    }
}
