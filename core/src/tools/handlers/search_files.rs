use std::path::PathBuf;

use crate::error::ToolError;
use crate::project;
use crate::tools::context::{ToolInvocation, ToolOutput};
use crate::tools::registry::ToolHandler;
use crate::tools::sandbox;

/// Upper bound on listed matches; anything past this would flood the
/// spliced reply on large trees.
const RESULT_CAP: usize = 20;

/// Shared rendering for every file-list tool.
pub(crate) fn render_file_list(mut files: Vec<String>) -> ToolOutput {
    files.truncate(RESULT_CAP);
    render_list(&files)
}

fn render_list(files: &[String]) -> ToolOutput {
    if files.is_empty() {
        return ToolOutput::labeled("검색 결과", "일치하는 파일이 없습니다.");
    }
    let listing: Vec<String> = files.iter().map(|f| format!("- {f}")).collect();
    ToolOutput::labeled(
        format!("검색 결과 ({}개)", files.len()),
        listing.join("\n"),
    )
}

/// Expands a caller-supplied glob pattern.
pub struct SearchFilesHandler {
    root: PathBuf,
}

impl SearchFilesHandler {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl ToolHandler for SearchFilesHandler {
    fn handle(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        let pattern = invocation.arg(0)?;
        let files = sandbox::list(pattern, &self.root)?;
        Ok(render_file_list(files))
    }
}

/// Substring match on file names anywhere in the tree.
pub struct FindByNameHandler {
    root: PathBuf,
}

impl FindByNameHandler {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl ToolHandler for FindByNameHandler {
    fn handle(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        let name = invocation.arg(0)?;
        let files = sandbox::list(&format!("**/*{name}*"), &self.root)?;
        Ok(render_file_list(files))
    }
}

/// Zero-argument shortcut for the most common search.
pub struct FindTypescriptHandler {
    root: PathBuf,
}

impl FindTypescriptHandler {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl ToolHandler for FindTypescriptHandler {
    fn handle(&self, _invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        let files = project::find_by_type("typescript", &self.root)?;
        Ok(render_file_list(files))
    }
}
