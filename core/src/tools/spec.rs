use serde::Serialize;

/// Catalog section a tool is listed under in the system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    Query,
    Search,
    Mutate,
    Project,
}

impl ToolCategory {
    fn heading(self) -> &'static str {
        match self {
            Self::Query => "파일 조회",
            Self::Search => "파일 검색",
            Self::Mutate => "파일 수정",
            Self::Project => "프로젝트 분석",
        }
    }
}

/// One positional parameter of a tool.
#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
}

/// Description of one tool: the registry key, the human description, and
/// the ordered parameter shape rendered into the directive catalog.
#[derive(Debug, Clone, Serialize)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub category: ToolCategory,
    pub params: Vec<ParamSpec>,
}

impl ToolSpec {
    /// The exact token syntax the model must emit for this tool.
    ///
    /// Zero-parameter tools still render the trailing `|` because the
    /// parser requires a pipe after the name.
    pub fn usage(&self) -> String {
        let placeholders: Vec<&str> = self.params.iter().map(|p| p.name).collect();
        format!("[TOOL:{}|{}]", self.name, placeholders.join("|"))
    }

    fn catalog_line(&self) -> String {
        format!("   - {} - {}", self.usage(), self.description)
    }
}

fn param(name: &'static str, description: &'static str) -> ParamSpec {
    ParamSpec { name, description }
}

/// Full built-in tool catalog in presentation order.
pub fn build_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "read_file",
            description: "파일 내용 읽기",
            category: ToolCategory::Query,
            params: vec![param("경로/파일명", "읽을 파일 경로")],
        },
        ToolSpec {
            name: "analyze_file",
            description: "파일 분석 (라인 수, 함수 수 등)",
            category: ToolCategory::Query,
            params: vec![param("경로/파일명", "분석할 파일 경로")],
        },
        ToolSpec {
            name: "find_by_name",
            description: "파일 이름으로 검색",
            category: ToolCategory::Search,
            params: vec![param("파일이름", "찾을 파일 이름 (정확한 이름 또는 일부)")],
        },
        ToolSpec {
            name: "search_files",
            description: "glob 패턴으로 검색",
            category: ToolCategory::Search,
            params: vec![param("src/**/*.tsx", "glob 패턴")],
        },
        ToolSpec {
            name: "find_typescript",
            description: "모든 TypeScript 파일 찾기",
            category: ToolCategory::Search,
            params: vec![],
        },
        ToolSpec {
            name: "write_file",
            description: "파일 쓰기/수정",
            category: ToolCategory::Mutate,
            params: vec![
                param("경로/파일명", "쓸 파일 경로"),
                param("새 내용", "파일 내용"),
            ],
        },
        ToolSpec {
            name: "rename_file",
            description: "파일 이름 변경",
            category: ToolCategory::Mutate,
            params: vec![
                param("기존 경로", "현재 파일 경로"),
                param("새 경로", "바꿀 파일 경로"),
            ],
        },
        ToolSpec {
            name: "delete_file",
            description: "파일 삭제",
            category: ToolCategory::Mutate,
            params: vec![param("경로/파일명", "삭제할 파일 경로")],
        },
        ToolSpec {
            name: "analyze_project",
            description: "프로젝트 구조 분석",
            category: ToolCategory::Project,
            params: vec![],
        },
        ToolSpec {
            name: "analyze_deps",
            description: "의존성 분석",
            category: ToolCategory::Project,
            params: vec![],
        },
        ToolSpec {
            name: "summarize_code",
            description: "패턴에 맞는 파일들 요약",
            category: ToolCategory::Project,
            params: vec![param("src/**/*.ts", "glob 패턴")],
        },
    ]
}

/// Render the numbered, sectioned tool catalog embedded in the system
/// prompt. Grouped by category in catalog order.
pub fn render_catalog(specs: &[ToolSpec]) -> String {
    let categories = [
        ToolCategory::Query,
        ToolCategory::Search,
        ToolCategory::Mutate,
        ToolCategory::Project,
    ];

    let mut sections = Vec::new();
    for (idx, category) in categories.iter().enumerate() {
        let lines: Vec<String> = specs
            .iter()
            .filter(|s| s.category == *category)
            .map(ToolSpec::catalog_line)
            .collect();
        if lines.is_empty() {
            continue;
        }
        sections.push(format!(
            "{}. {}:\n{}",
            idx + 1,
            category.heading(),
            lines.join("\n")
        ));
    }
    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let specs = build_specs();
        let mut names: Vec<_> = specs.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), specs.len());
    }

    #[test]
    fn usage_keeps_trailing_pipe_for_zero_param_tools() {
        let specs = build_specs();
        let find_ts = specs
            .iter()
            .find(|s| s.name == "find_typescript")
            .expect("spec exists");
        assert_eq!(find_ts.usage(), "[TOOL:find_typescript|]");
    }

    #[test]
    fn usage_tokens_parse_back_as_directives() {
        for spec in build_specs() {
            let parsed = crate::directive::extract_directives(&spec.usage());
            assert_eq!(parsed.len(), 1, "usage of {} must parse", spec.name);
            assert_eq!(parsed[0].name, spec.name);
        }
    }

    #[test]
    fn catalog_has_all_sections() {
        let catalog = render_catalog(&build_specs());
        for heading in ["1. 파일 조회:", "2. 파일 검색:", "3. 파일 수정:", "4. 프로젝트 분석:"] {
            assert!(catalog.contains(heading), "missing {heading}");
        }
    }
}
