use std::path::PathBuf;

use crate::error::ToolError;
use crate::tools::context::{ToolInvocation, ToolOutput};
use crate::tools::registry::ToolHandler;
use crate::tools::sandbox;

pub struct ReadFileHandler {
    root: PathBuf,
}

impl ReadFileHandler {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl ToolHandler for ReadFileHandler {
    fn handle(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        let path = invocation.arg(0)?;
        let content = sandbox::read(path, &self.root)?;
        Ok(ToolOutput::labeled("파일 내용", content))
    }
}
