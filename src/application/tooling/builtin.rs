//! File tools rooted at the configured working directory.

use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::interface::{ToolHandler, ToolInvokeError, ToolSpec};

/// Look up a built-in tool by name. Returns its spec and handler, or
/// `None` when the name matches no built-in.
pub fn builtin_tool(workdir: &Path, name: &str) -> Option<(ToolSpec, Arc<dyn ToolHandler>)> {
    match name.to_lowercase().as_str() {
        "list_files" => Some((
            ToolSpec::new(
                "list_files",
                "Returns a list of files in the working directory.",
                json!({"type": "object", "properties": {}, "required": []}),
            ),
            Arc::new(ListFilesTool {
                root: workdir.to_path_buf(),
            }),
        )),
        "read_file" => Some((
            ToolSpec::new(
                "read_file",
                "Reads the content of a specified file in the working directory.",
                json!({
                    "type": "object",
                    "properties": {
                        "file_name": {
                            "type": "string",
                            "description": "The name of the file to read, e.g. 'data.txt'"
                        }
                    },
                    "required": ["file_name"]
                }),
            ),
            Arc::new(ReadFileTool {
                root: workdir.to_path_buf(),
            }),
        )),
        _ => None,
    }
}

struct ListFilesTool {
    root: PathBuf,
}

#[async_trait]
impl ToolHandler for ListFilesTool {
    async fn invoke(&self, _args: Map<String, Value>) -> Result<Value, ToolInvokeError> {
        let entries = fs::read_dir(&self.root).map_err(|source| ToolInvokeError::Io {
            path: self.root.clone(),
            source,
        })?;

        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();

        Ok(json!(names))
    }
}

struct ReadFileTool {
    root: PathBuf,
}

#[async_trait]
impl ToolHandler for ReadFileTool {
    async fn invoke(&self, args: Map<String, Value>) -> Result<Value, ToolInvokeError> {
        let file_name = args
            .get("file_name")
            .and_then(Value::as_str)
            .ok_or(ToolInvokeError::InvalidArgument {
                name: "file_name".to_string(),
                expected: "string",
            })?;

        // Plain names only; the tool must not escape the working directory.
        if file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
            return Err(ToolInvokeError::Failed(format!(
                "'{file_name}' is not a plain file name"
            )));
        }

        let path = self.root.join(file_name);
        let content = fs::read_to_string(&path)
            .map_err(|source| ToolInvokeError::Io { path, source })?;

        Ok(json!(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn list_files_returns_sorted_file_names() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("b.txt"), "two").expect("write");
        fs::write(dir.path().join("a.txt"), "one").expect("write");
        fs::create_dir(dir.path().join("nested")).expect("mkdir");

        let (_, handler) = builtin_tool(dir.path(), "list_files").expect("builtin");
        let result = handler.invoke(Map::new()).await.expect("invoke");
        assert_eq!(result, json!(["a.txt", "b.txt"]));
    }

    #[tokio::test]
    async fn read_file_returns_content() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("notes.txt"), "hello").expect("write");

        let (_, handler) = builtin_tool(dir.path(), "read_file").expect("builtin");
        let mut args = Map::new();
        args.insert("file_name".to_string(), json!("notes.txt"));
        let result = handler.invoke(args).await.expect("invoke");
        assert_eq!(result, json!("hello"));
    }

    #[tokio::test]
    async fn read_file_rejects_path_traversal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (_, handler) = builtin_tool(dir.path(), "read_file").expect("builtin");
        let mut args = Map::new();
        args.insert("file_name".to_string(), json!("../secrets.txt"));
        let result = handler.invoke(args).await;
        assert!(matches!(result, Err(ToolInvokeError::Failed(_))));
    }

    #[tokio::test]
    async fn read_file_missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (_, handler) = builtin_tool(dir.path(), "read_file").expect("builtin");
        let mut args = Map::new();
        args.insert("file_name".to_string(), json!("absent.txt"));
        let result = handler.invoke(args).await;
        assert!(matches!(result, Err(ToolInvokeError::Io { .. })));
    }
}
