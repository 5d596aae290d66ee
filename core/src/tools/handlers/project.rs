use std::path::PathBuf;

use crate::error::ToolError;
use crate::project;
use crate::tools::context::{ToolInvocation, ToolOutput};
use crate::tools::registry::ToolHandler;

fn bulleted(items: &[String]) -> String {
    if items.is_empty() {
        return "- (없음)".to_string();
    }
    items
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

pub struct AnalyzeProjectHandler {
    root: PathBuf,
}

impl AnalyzeProjectHandler {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl ToolHandler for AnalyzeProjectHandler {
    fn handle(&self, _invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        let report = project::analyze_structure(&self.root)?;
        let body = format!(
            "프로젝트: {}\npackage.json: {}\nGit 저장소: {}\n스크립트 수: {}\n프레임워크: {}\n소스 파일 ({}개 샘플):\n{}",
            report.package_name.as_deref().unwrap_or("(이름 없음)"),
            if report.has_package_json { "있음" } else { "없음" },
            if report.has_git { "있음" } else { "없음" },
            report.script_count,
            if report.frameworks.is_empty() {
                "없음".to_string()
            } else {
                report.frameworks.join(", ")
            },
            report.src_files.len(),
            bulleted(&report.src_files),
        );
        Ok(ToolOutput::labeled("프로젝트 구조", body))
    }
}

pub struct AnalyzeDepsHandler {
    root: PathBuf,
}

impl AnalyzeDepsHandler {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl ToolHandler for AnalyzeDepsHandler {
    fn handle(&self, _invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        let report = project::analyze_dependencies(&self.root)?;
        let body = format!(
            "의존성 ({}개):\n{}\n개발 의존성 ({}개):\n{}\nNode 버전: {}",
            report.dependency_count,
            bulleted(&report.dependencies),
            report.dev_dependency_count,
            bulleted(&report.dev_dependencies),
            report.node_version,
        );
        Ok(ToolOutput::labeled("의존성 분석", body))
    }
}

pub struct SummarizeCodeHandler {
    root: PathBuf,
}

impl SummarizeCodeHandler {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl ToolHandler for SummarizeCodeHandler {
    fn handle(&self, invocation: &ToolInvocation) -> Result<ToolOutput, ToolError> {
        let pattern = invocation.arg(0)?;
        let summary = project::summarize_code(pattern, &self.root)?;
        let files: Vec<String> = summary
            .files
            .iter()
            .map(|f| {
                format!(
                    "- {} ({} 라인, export {}, import {})",
                    f.path, f.lines, f.exports, f.imports
                )
            })
            .collect();
        let body = format!(
            "파일 수: {}\n전체 라인: {}\n{}",
            summary.file_count,
            summary.total_lines,
            if files.is_empty() {
                "일치하는 파일이 없습니다.".to_string()
            } else {
                files.join("\n")
            },
        );
        Ok(ToolOutput::labeled("코드 요약", body))
    }
}
