//! Normalized view of a host tool invocation.

use serde_json::Value;

use crate::config::GuardConfig;

/// Argument keys that may carry the target path of an edit, in lookup order.
const PATH_KEYS: [&str; 3] = ["file_path", "filePath", "path"];

/// What a host tool invocation means to the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolAction {
    /// A single-file edit or write. `path` is `None` when no path could be
    /// resolved from the arguments.
    FileWrite { tool: String, path: Option<String> },
    /// A shell command.
    Shell { tool: String, command: String },
    /// Anything else; ignored by enforcement and tracking.
    Other { tool: String },
}

impl ToolAction {
    /// Classify a host invocation of `tool` with JSON `args`.
    pub fn from_invocation(tool: &str, args: &Value, config: &GuardConfig) -> Self {
        let tool_name = tool.to_string();
        if config.is_edit_tool(tool) {
            let path = PATH_KEYS
                .iter()
                .find_map(|k| args.get(*k).and_then(Value::as_str))
                .filter(|p| !p.trim().is_empty())
                .map(|p| config.relative_path(p));
            ToolAction::FileWrite {
                tool: tool_name,
                path,
            }
        } else if config.is_shell_tool(tool) {
            let command = args
                .get("command")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            ToolAction::Shell {
                tool: tool_name,
                command,
            }
        } else {
            ToolAction::Other { tool: tool_name }
        }
    }

    pub fn tool(&self) -> &str {
        match self {
            ToolAction::FileWrite { tool, .. }
            | ToolAction::Shell { tool, .. }
            | ToolAction::Other { tool } => tool,
        }
    }

    /// Target path of a file write, if resolvable.
    pub fn file_path(&self) -> Option<&str> {
        match self {
            ToolAction::FileWrite { path, .. } => path.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn edit_tools_resolve_path_from_any_key() {
        let config = GuardConfig::default();
        for args in [
            json!({"file_path": "src/a.ts"}),
            json!({"filePath": "src/a.ts"}),
            json!({"path": "src/a.ts"}),
        ] {
            let action = ToolAction::from_invocation("edit", &args, &config);
            assert_eq!(action.file_path(), Some("src/a.ts"));
        }
    }

    #[test]
    fn first_path_key_wins() {
        let config = GuardConfig::default();
        let args = json!({"path": "b.ts", "file_path": "a.ts"});
        let action = ToolAction::from_invocation("write", &args, &config);
        assert_eq!(action.file_path(), Some("a.ts"));
    }

    #[test]
    fn unresolvable_path_is_none() {
        let config = GuardConfig::default();
        for args in [json!({}), json!({"file_path": 42}), json!({"file_path": "  "}), Value::Null] {
            let action = ToolAction::from_invocation("edit", &args, &config);
            assert!(matches!(action, ToolAction::FileWrite { path: None, .. }));
        }
    }

    #[test]
    fn paths_under_the_project_root_become_relative() {
        let config = GuardConfig::default().project_root("/home/dev/test/app");
        let inside = json!({"file_path": "/home/dev/test/app/src/widget.ts"});
        let action = ToolAction::from_invocation("edit", &inside, &config);
        assert_eq!(action.file_path(), Some("src/widget.ts"));

        let outside = json!({"file_path": "/home/dev/test/other/widget.ts"});
        let action = ToolAction::from_invocation("edit", &outside, &config);
        assert_eq!(action.file_path(), Some("/home/dev/test/other/widget.ts"));

        let relative = json!({"file_path": "src/widget.ts"});
        let action = ToolAction::from_invocation("edit", &relative, &config);
        assert_eq!(action.file_path(), Some("src/widget.ts"));
    }

    #[test]
    fn shell_tools_capture_command() {
        let config = GuardConfig::default();
        let action = ToolAction::from_invocation("bash", &json!({"command": "cargo test"}), &config);
        assert_eq!(
            action,
            ToolAction::Shell {
                tool: "bash".into(),
                command: "cargo test".into()
            }
        );
        let empty = ToolAction::from_invocation("bash", &json!({}), &config);
        assert!(matches!(empty, ToolAction::Shell { ref command, .. } if command.is_empty()));
    }

    #[test]
    fn other_tools_are_passed_through() {
        let config = GuardConfig::default();
        let action = ToolAction::from_invocation("read", &json!({"file_path": "a.ts"}), &config);
        assert_eq!(action, ToolAction::Other { tool: "read".into() });
        assert_eq!(action.tool(), "read");
        assert!(action.file_path().is_none());
    }
}
