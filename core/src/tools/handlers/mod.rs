//! Built-in tool handlers.

mod analyze_file;
mod delete_file;
mod project;
mod read_file;
mod rename_file;
mod search_files;
mod write_file;

use std::path::Path;
use std::sync::Arc;

use crate::tools::registry::ToolRegistry;

pub use analyze_file::AnalyzeFileHandler;
pub use delete_file::DeleteFileHandler;
pub use project::{AnalyzeDepsHandler, AnalyzeProjectHandler, SummarizeCodeHandler};
pub use read_file::ReadFileHandler;
pub use rename_file::RenameFileHandler;
pub use search_files::{FindByNameHandler, FindTypescriptHandler, SearchFilesHandler};
pub use write_file::WriteFileHandler;

/// Register every built-in handler against a project root.
pub fn register_builtin_handlers(registry: &mut ToolRegistry, root: &Path) {
    let root = root.to_path_buf();
    registry.register("read_file", Arc::new(ReadFileHandler::new(root.clone())));
    registry.register(
        "analyze_file",
        Arc::new(AnalyzeFileHandler::new(root.clone())),
    );
    registry.register(
        "find_by_name",
        Arc::new(FindByNameHandler::new(root.clone())),
    );
    registry.register(
        "search_files",
        Arc::new(SearchFilesHandler::new(root.clone())),
    );
    registry.register(
        "find_typescript",
        Arc::new(FindTypescriptHandler::new(root.clone())),
    );
    registry.register("write_file", Arc::new(WriteFileHandler::new(root.clone())));
    registry.register(
        "rename_file",
        Arc::new(RenameFileHandler::new(root.clone())),
    );
    registry.register(
        "delete_file",
        Arc::new(DeleteFileHandler::new(root.clone())),
    );
    registry.register(
        "analyze_project",
        Arc::new(AnalyzeProjectHandler::new(root.clone())),
    );
    registry.register(
        "analyze_deps",
        Arc::new(AnalyzeDepsHandler::new(root.clone())),
    );
    registry.register("summarize_code", Arc::new(SummarizeCodeHandler::new(root)));
}
