//! Guard configuration with sensible defaults.
//!
//! [`GuardConfig`] is loadable from JSON (by default `.sdlc/guard.json` in
//! the project root). Every field is optional in the file; missing fields
//! take their defaults.
//!
//! # Example JSON
//!
//! ```json
//! {
//!   "review_file_threshold": 8,
//!   "default_review_base": "develop",
//!   "edit_tools": ["edit", "write", "multiedit"],
//!   "extra_test_patterns": ["\\.feature$"],
//!   "strict_review_gate": true
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::classify::{Classifier, FileClass};
use crate::signals::CommandSignals;

/// Config path relative to the project root.
pub const DEFAULT_CONFIG_PATH: &str = ".sdlc/guard.json";

/// Configuration for the enforcement engine.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct GuardConfig {
    /// Distinct modified files (with no commit since review) that trigger
    /// the code-review reminder on idle. Default: `5`.
    pub review_file_threshold: usize,
    /// Base ref named by `sdlc_code_review` when none is given. Default: `"main"`.
    pub default_review_base: String,
    /// Host tool names that write a single file.
    pub edit_tools: Vec<String>,
    /// Host tool names that run shell commands.
    pub shell_tools: Vec<String>,
    /// Extra test-file patterns appended to the built-in table.
    pub extra_test_patterns: Vec<String>,
    /// Extra type-definition patterns appended to the built-in table.
    pub extra_type_definition_patterns: Vec<String>,
    /// Extra test-runner command patterns appended to the built-in table.
    pub extra_test_runner_patterns: Vec<String>,
    /// Keep the domain review gate closed after a rejected review.
    /// Default: `false` (a rejected review clears the gate).
    pub strict_review_gate: bool,
    /// Absolute project root. Edit paths under it are made relative before
    /// classification, so directories above the project never count.
    /// Set by the host adapter, not read from the file.
    #[serde(skip)]
    pub project_root: Option<PathBuf>,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            review_file_threshold: 5,
            default_review_base: "main".to_string(),
            edit_tools: ["edit", "write", "edit_file", "write_file"]
                .map(String::from)
                .to_vec(),
            shell_tools: ["bash", "shell"].map(String::from).to_vec(),
            extra_test_patterns: Vec::new(),
            extra_type_definition_patterns: Vec::new(),
            extra_test_runner_patterns: Vec::new(),
            strict_review_gate: false,
            project_root: None,
        }
    }
}

impl GuardConfig {
    /// Load config from a JSON file. Returns defaults if the file doesn't
    /// exist or can't be parsed.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Failed to parse guard config {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Load `.sdlc/guard.json` under `project_root`.
    pub fn load_from_project(project_root: impl AsRef<Path>) -> Self {
        Self::load(project_root.as_ref().join(DEFAULT_CONFIG_PATH))
    }

    pub fn review_file_threshold(mut self, threshold: usize) -> Self {
        self.review_file_threshold = threshold;
        self
    }

    pub fn default_review_base(mut self, base: impl Into<String>) -> Self {
        self.default_review_base = base.into();
        self
    }

    pub fn edit_tool(mut self, name: impl Into<String>) -> Self {
        self.edit_tools.push(name.into());
        self
    }

    pub fn shell_tool(mut self, name: impl Into<String>) -> Self {
        self.shell_tools.push(name.into());
        self
    }

    pub fn extra_test_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extra_test_patterns.push(pattern.into());
        self
    }

    pub fn extra_type_definition_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extra_type_definition_patterns.push(pattern.into());
        self
    }

    pub fn extra_test_runner_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.extra_test_runner_patterns.push(pattern.into());
        self
    }

    pub fn strict_review_gate(mut self, strict: bool) -> Self {
        self.strict_review_gate = strict;
        self
    }

    pub fn project_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.project_root = Some(root.into());
        self
    }

    /// `path` relative to the project root when it lies under it; otherwise
    /// unchanged.
    pub fn relative_path(&self, path: &str) -> String {
        let Some(root) = &self.project_root else {
            return path.to_string();
        };
        match Path::new(path).strip_prefix(root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().into_owned(),
            _ => path.to_string(),
        }
    }

    /// Whether `tool` is a configured single-file edit tool.
    pub fn is_edit_tool(&self, tool: &str) -> bool {
        self.edit_tools.iter().any(|t| t == tool)
    }

    /// Whether `tool` is a configured shell tool.
    pub fn is_shell_tool(&self, tool: &str) -> bool {
        self.shell_tools.iter().any(|t| t == tool)
    }

    /// Built-in classifier extended with this config's extra patterns.
    pub fn build_classifier(&self) -> Result<Classifier, String> {
        Classifier::builtin()
            .with_patterns(FileClass::Test, &self.extra_test_patterns)?
            .with_patterns(FileClass::TypeDefinition, &self.extra_type_definition_patterns)
    }

    /// Built-in command signatures extended with this config's extra runners.
    pub fn build_signals(&self) -> Result<CommandSignals, String> {
        CommandSignals::builtin().with_test_runners(&self.extra_test_runner_patterns)
    }
}
