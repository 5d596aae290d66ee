//! Sandboxed filesystem access
//!
//! Primitive read/write/list/rename/delete operations, each confined to a
//! single project root. Containment is decided on the lexically-normalized
//! resolved path, never by raw string prefix, so traversal sequences and
//! platform separator differences cannot escape the sandbox.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Result, ToolError};

/// File base names exempt from write/delete at any directory depth.
pub const PROTECTED_FILES: &[&str] = &["package.json", ".env", ".git", "node_modules"];

/// Directories excluded from every listing.
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "dist", "out"];

/// Resolve a project-relative path against the root and enforce containment.
///
/// Performs no I/O: the target may not exist yet (writes create it).
pub fn resolve(root: &Path, path: &str) -> Result<PathBuf> {
    let normalized = normalize(&root.join(path));
    let relative = pathdiff::diff_paths(&normalized, root).ok_or(ToolError::PathEscape)?;
    if relative.components().next() == Some(Component::ParentDir) {
        return Err(ToolError::PathEscape);
    }
    Ok(normalized)
}

/// Lexical normalization: fold `.` away and resolve `..` against the
/// preceding component without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(Component::ParentDir);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Read a file inside the root as text.
pub fn read(path: &str, root: &Path) -> Result<String> {
    let absolute = resolve(root, path)?;
    if !absolute.exists() {
        return Err(ToolError::NotFound(path.to_string()));
    }
    fs::read_to_string(&absolute).map_err(|e| ToolError::Execution(format!("파일 읽기 실패: {e}")))
}

/// Create or overwrite a file inside the root.
///
/// The denylist is checked by base name only, so a protected file is
/// blocked regardless of which subdirectory it is referenced from.
pub fn write(path: &str, content: &str, root: &Path) -> Result<String> {
    let absolute = resolve(root, path)?;
    let file_name = absolute
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    if PROTECTED_FILES.contains(&file_name.as_str()) {
        return Err(ToolError::Protected(file_name));
    }

    if let Some(parent) = absolute.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| ToolError::Execution(format!("파일 쓰기 실패: {e}")))?;
    }
    fs::write(&absolute, content).map_err(|e| ToolError::Execution(format!("파일 쓰기 실패: {e}")))?;
    Ok(format!("파일이 성공적으로 저장되었습니다: {path}"))
}

/// Expand a glob pattern relative to the root.
///
/// Excluded directories and dot-prefixed entries never appear; order is
/// whatever the matcher produces. Brace groups (`*.{ts,tsx}`) are expanded
/// before matching since the underlying matcher does not support them.
pub fn list(pattern: &str, root: &Path) -> Result<Vec<String>> {
    let mut results = Vec::new();
    for expanded in expand_braces(pattern) {
        let full = root.join(&expanded);
        let entries = glob::glob(&full.to_string_lossy())
            .map_err(|e| ToolError::ListFailed(e.to_string()))?;
        for entry in entries.flatten() {
            let Ok(relative) = entry.strip_prefix(root) else {
                continue;
            };
            if is_excluded(relative) {
                continue;
            }
            let rendered = relative.to_string_lossy().to_string();
            if !results.contains(&rendered) {
                results.push(rendered);
            }
        }
    }
    Ok(results)
}

fn is_excluded(relative: &Path) -> bool {
    relative.components().any(|c| {
        let name = c.as_os_str().to_string_lossy();
        EXCLUDED_DIRS.contains(&name.as_ref()) || name.starts_with('.')
    })
}

/// Expand the first `{a,b,...}` group; recurses for nested groups.
fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(close) = pattern[open..].find('}').map(|i| open + i) else {
        return vec![pattern.to_string()];
    };

    let (head, rest) = (&pattern[..open], &pattern[close + 1..]);
    pattern[open + 1..close]
        .split(',')
        .flat_map(|alt| expand_braces(&format!("{head}{alt}{rest}")))
        .collect()
}

/// Move a file to a new path, both inside the root.
pub fn rename(old_path: &str, new_path: &str, root: &Path) -> Result<String> {
    let absolute_old = resolve(root, old_path)?;
    let absolute_new = resolve(root, new_path)?;
    if !absolute_old.exists() {
        return Err(ToolError::NotFound(old_path.to_string()));
    }
    fs::rename(&absolute_old, &absolute_new)
        .map_err(|e| ToolError::Execution(format!("파일 이름 변경 실패: {e}")))?;
    Ok(format!(
        "파일이 성공적으로 이름 변경되었습니다: {old_path} -> {new_path}"
    ))
}

/// Remove a file inside the root.
pub fn delete(path: &str, root: &Path) -> Result<String> {
    let absolute = resolve(root, path)?;
    if !absolute.exists() {
        return Err(ToolError::NotFound(path.to_string()));
    }
    fs::remove_file(&absolute).map_err(|e| ToolError::Execution(format!("파일 삭제 실패: {e}")))?;
    Ok(format!("파일이 성공적으로 삭제되었습니다: {path}"))
}

static COMPLEXITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"function|const|class|interface").expect("complexity pattern is valid")
});

/// Quick statistics for one source file.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file_path: String,
    pub total_lines: usize,
    pub code_lines: usize,
    pub has_type_script: bool,
    pub has_react: bool,
    pub has_tailwind: bool,
    pub complexity: usize,
}

/// Read and analyze a file; failures propagate from [read].
pub fn analyze(path: &str, root: &Path) -> Result<FileReport> {
    let content = read(path, root)?;
    let code_lines = content
        .split('\n')
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with("//") && !trimmed.starts_with("/*")
        })
        .count();

    Ok(FileReport {
        file_path: path.to_string(),
        total_lines: content.split('\n').count(),
        code_lines,
        has_type_script: path.ends_with(".ts") || path.ends_with(".tsx"),
        has_react: content.contains("React") || content.contains("jsx"),
        has_tailwind: content.contains("tailwind") || content.contains("className="),
        complexity: COMPLEXITY_RE.find_iter(&content).count(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixture() -> tempfile::TempDir {
        tempfile::tempdir().expect("tempdir")
    }

    #[test]
    fn read_rejects_parent_traversal_without_io() {
        let dir = fixture();
        let err = read("../../etc/passwd", dir.path()).expect_err("escape");
        assert!(matches!(err, ToolError::PathEscape));
    }

    #[test]
    fn read_rejects_absolute_path_outside_root() {
        let dir = fixture();
        let err = read("/etc/passwd", dir.path()).expect_err("escape");
        assert!(matches!(err, ToolError::PathEscape));
    }

    #[test]
    fn read_missing_file_is_not_found() {
        let dir = fixture();
        let err = read("missing.txt", dir.path()).expect_err("missing");
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[test]
    fn write_then_read_round_trip() {
        let dir = fixture();
        fs::write(dir.path().join("a.txt"), "hi").expect("seed");
        let confirmation = write("a.txt", "bye", dir.path()).expect("write");
        assert!(confirmation.contains("a.txt"));
        assert_eq!(read("a.txt", dir.path()).expect("read"), "bye");
    }

    #[test]
    fn write_blocks_protected_names_at_any_depth() {
        let dir = fixture();
        for path in ["package.json", "deep/nested/package.json", "sub/.env"] {
            let err = write(path, "{}", dir.path()).expect_err("protected");
            assert!(matches!(err, ToolError::Protected(_)), "path: {path}");
        }
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = fixture();
        write("src/new/module.ts", "export {}", dir.path()).expect("write");
        assert!(dir.path().join("src/new/module.ts").exists());
    }

    #[test]
    fn traversal_inside_root_is_allowed() {
        let dir = fixture();
        fs::create_dir(dir.path().join("sub")).expect("mkdir");
        write("sub/../kept.txt", "ok", dir.path()).expect("write");
        assert!(dir.path().join("kept.txt").exists());
    }

    #[test]
    fn list_skips_excluded_dirs_and_dotfiles() {
        let dir = fixture();
        fs::create_dir_all(dir.path().join("src")).expect("mkdir");
        fs::create_dir_all(dir.path().join("node_modules/pkg")).expect("mkdir");
        fs::write(dir.path().join("src/a.ts"), "").expect("seed");
        fs::write(dir.path().join("src/.hidden.ts"), "").expect("seed");
        fs::write(dir.path().join("node_modules/pkg/b.ts"), "").expect("seed");

        let files = list("**/*.ts", dir.path()).expect("list");
        assert_eq!(files, vec!["src/a.ts".to_string()]);
    }

    #[test]
    fn list_expands_brace_groups() {
        let dir = fixture();
        fs::create_dir_all(dir.path().join("src")).expect("mkdir");
        fs::write(dir.path().join("src/a.ts"), "").expect("seed");
        fs::write(dir.path().join("src/b.tsx"), "").expect("seed");
        fs::write(dir.path().join("src/c.css"), "").expect("seed");

        let mut files = list("src/**/*.{ts,tsx}", dir.path()).expect("list");
        files.sort();
        assert_eq!(files, vec!["src/a.ts".to_string(), "src/b.tsx".to_string()]);
    }

    #[test]
    fn list_invalid_pattern_fails() {
        let dir = fixture();
        let err = list("src/[unclosed", dir.path()).expect_err("invalid");
        assert!(matches!(err, ToolError::ListFailed(_)));
    }

    #[test]
    fn rename_moves_file() {
        let dir = fixture();
        fs::write(dir.path().join("old.txt"), "x").expect("seed");
        rename("old.txt", "new.txt", dir.path()).expect("rename");
        assert!(!dir.path().join("old.txt").exists());
        assert!(dir.path().join("new.txt").exists());
    }

    #[test]
    fn rename_missing_source_is_not_found() {
        let dir = fixture();
        let err = rename("missing.txt", "new.txt", dir.path()).expect_err("missing");
        assert!(matches!(err, ToolError::NotFound(_)));
    }

    #[test]
    fn delete_removes_file() {
        let dir = fixture();
        fs::write(dir.path().join("junk.txt"), "x").expect("seed");
        delete("junk.txt", dir.path()).expect("delete");
        assert!(!dir.path().join("junk.txt").exists());
    }

    #[test]
    fn analyze_counts_code_lines_and_markers() {
        let dir = fixture();
        let source = "// header\nimport React from 'react';\n\nconst App = () => {\n  return <div className=\"p-2\" />;\n};\n";
        fs::write(dir.path().join("App.tsx"), source).expect("seed");

        let report = analyze("App.tsx", dir.path()).expect("analyze");
        assert_eq!(report.total_lines, 7);
        assert_eq!(report.code_lines, 4);
        assert!(report.has_type_script);
        assert!(report.has_react);
        assert!(report.has_tailwind);
        // `const` plus the `class` inside `className`
        assert_eq!(report.complexity, 2);
    }
}
