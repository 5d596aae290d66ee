use std::path::PathBuf;

use crate::error::ToolError;
use crate::tools::context::{ToolInvocation, ToolOutput};
use crate::tools::registry::ToolHandler;
use crate::tools::sandbox;

pub struct AnalyzeFileHandler {
    root: PathBuf,
}

impl AnalyzeFileHandler {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "예" } else { "아니오" }
}

impl ToolHandler for AnalyzeFileHandler {
    fn handle(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        let path = invocation.arg(0)?;
        let report = sandbox::analyze(path, &self.root)?;
        let body = format!(
            "파일: {}\n전체 라인: {}\n코드 라인: {}\nTypeScript: {}\nReact: {}\nTailwind: {}\n복잡도 지표: {}",
            report.file_path,
            report.total_lines,
            report.code_lines,
            yes_no(report.has_type_script),
            yes_no(report.has_react),
            yes_no(report.has_tailwind),
            report.complexity,
        );
        Ok(ToolOutput::labeled("파일 분석", body))
    }
}
