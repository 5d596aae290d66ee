//! Project introspection service
//!
//! Read-only queries over a project root, built on the sandbox read/list
//! primitives. Nothing here mutates the tree.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ToolError};
use crate::tools::sandbox;

/// The manifest file consumed by every query below.
pub const MANIFEST_FILE: &str = "package.json";

/// Dependency names recognized as framework markers, with display labels.
const FRAMEWORK_MARKERS: &[(&str, &str)] = &[
    ("react", "React"),
    ("next", "Next.js"),
    ("electron", "Electron"),
    ("vue", "Vue"),
    ("angular", "Angular"),
    ("express", "Express"),
];

/// Source-glob priority order for structure sampling.
const SRC_PATTERNS: &[&str] = &["src/**/*.{ts,tsx,js,jsx}", "app/**/*.{ts,tsx,js,jsx}"];

/// Parsed view of package.json. Unknown fields are ignored.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Manifest {
    pub name: Option<String>,
    #[serde(default)]
    pub scripts: BTreeMap<String, String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: BTreeMap<String, String>,
    pub engines: Option<Engines>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Engines {
    pub node: Option<String>,
}

fn read_manifest(root: &Path) -> Option<Manifest> {
    let text = sandbox::read(MANIFEST_FILE, root).ok()?;
    serde_json::from_str(&text).ok()
}

/// Overall shape of a project.
#[derive(Debug, Clone, Serialize)]
pub struct StructureReport {
    pub project_root: String,
    pub has_package_json: bool,
    pub has_git: bool,
    pub package_name: Option<String>,
    pub script_count: usize,
    pub frameworks: Vec<String>,
    pub src_files: Vec<String>,
}

/// Summarize the project: manifest facts, framework markers, version
/// control marker, and up to 20 sampled source paths.
pub fn analyze_structure(root: &Path) -> Result<StructureReport> {
    let manifest = read_manifest(root);

    let frameworks = manifest
        .as_ref()
        .map(|m| {
            FRAMEWORK_MARKERS
                .iter()
                .filter(|(dep, _)| m.dependencies.contains_key(*dep))
                .map(|(_, label)| label.to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut src_files = Vec::new();
    for pattern in SRC_PATTERNS {
        let files = sandbox::list(pattern, root)?;
        if !files.is_empty() {
            src_files = files.into_iter().take(20).collect();
            break;
        }
    }

    Ok(StructureReport {
        project_root: root.display().to_string(),
        has_package_json: root.join(MANIFEST_FILE).exists(),
        has_git: root.join(".git").exists(),
        package_name: manifest.as_ref().and_then(|m| m.name.clone()),
        script_count: manifest.as_ref().map(|m| m.scripts.len()).unwrap_or(0),
        frameworks,
        src_files,
    })
}

/// Canned glob vocabulary for [find_by_type].
fn pattern_for_kind(kind: &str) -> String {
    match kind.to_lowercase().as_str() {
        "typescript" => "src/**/*.{ts,tsx}".to_string(),
        "javascript" => "src/**/*.{js,jsx}".to_string(),
        "config" => "*.{json,yml,yaml,toml}".to_string(),
        "styles" => "src/**/*.{css,scss,sass}".to_string(),
        "tests" => "src/**/*.{test,spec}.{ts,tsx,js,jsx}".to_string(),
        "components" => "src/**/*{component,Component}.{ts,tsx,js,jsx}".to_string(),
        other => other.to_string(),
    }
}

/// Find files of a named kind; an unrecognized kind is tried as a literal
/// glob pattern. At most 30 matches.
pub fn find_by_type(kind: &str, root: &Path) -> Result<Vec<String>> {
    let files = sandbox::list(&pattern_for_kind(kind), root)?;
    Ok(files.into_iter().take(30).collect())
}

/// Declared dependency view of the manifest.
#[derive(Debug, Clone, Serialize)]
pub struct DependencyReport {
    pub dependencies: Vec<String>,
    pub dev_dependencies: Vec<String>,
    pub dependency_count: usize,
    pub dev_dependency_count: usize,
    pub node_version: String,
}

/// List declared and dev dependencies. Fails with `ManifestMissing` when
/// there is no package.json.
pub fn analyze_dependencies(root: &Path) -> Result<DependencyReport> {
    if !root.join(MANIFEST_FILE).exists() {
        return Err(ToolError::ManifestMissing);
    }
    let manifest = read_manifest(root).unwrap_or_default();

    let dependencies: Vec<String> = manifest.dependencies.keys().cloned().collect();
    let dev_dependencies: Vec<String> = manifest.dev_dependencies.keys().cloned().collect();

    Ok(DependencyReport {
        dependency_count: dependencies.len(),
        dev_dependency_count: dev_dependencies.len(),
        dependencies,
        dev_dependencies,
        node_version: manifest
            .engines
            .and_then(|e| e.node)
            .unwrap_or_else(|| "not specified".to_string()),
    })
}

static EXPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"export\s+(const|function|class|interface|type)").expect("export pattern is valid")
});

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"(?m)^import\s+.*from").expect("import pattern is valid")
});

#[derive(Debug, Clone, Serialize)]
pub struct FileSummary {
    pub path: String,
    pub lines: usize,
    pub exports: usize,
    pub imports: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeSummary {
    pub file_count: usize,
    pub total_lines: usize,
    pub files: Vec<FileSummary>,
}

/// Per-file and aggregate statistics for up to 10 files matching a glob
/// pattern. Files that fail to read are skipped, not errors.
pub fn summarize_code(pattern: &str, root: &Path) -> Result<CodeSummary> {
    let matched = sandbox::list(pattern, root)?;
    let file_count = matched.len();

    let mut total_lines = 0;
    let mut files = Vec::new();
    for path in matched.into_iter().take(10) {
        let Ok(content) = sandbox::read(&path, root) else {
            continue;
        };
        let lines = content.split('\n').count();
        total_lines += lines;
        files.push(FileSummary {
            path,
            lines,
            exports: EXPORT_RE.find_iter(&content).count(),
            imports: IMPORT_RE.find_iter(&content).count(),
        });
    }

    Ok(CodeSummary {
        file_count,
        total_lines,
        files,
    })
}
