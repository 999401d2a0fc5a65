//! Path-based file classification.
//!
//! Every path falls into exactly one [`FileClass`]. Classification is driven
//! by an ordered, declarative rule table: test rules are consulted first,
//! then type-definition rules, and anything left over is production code.
//! Adding a naming convention means adding a row to the table (or passing
//! extra patterns through [`GuardConfig`](crate::config::GuardConfig)).

use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// The category a file path belongs to for phase-boundary purposes.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FileClass {
    Test,
    TypeDefinition,
    Production,
}

impl FileClass {
    pub fn as_str(self) -> &'static str {
        match self {
            FileClass::Test => "test",
            FileClass::TypeDefinition => "type-definition",
            FileClass::Production => "production",
        }
    }

    /// Classes with explicit rules, in the order they are tried.
    const PRIORITY: [FileClass; 2] = [FileClass::Test, FileClass::TypeDefinition];
}

impl fmt::Display for FileClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Rule table ─────────────────────────────────────────────────────

/// Built-in test markers: suffix conventions per ecosystem plus directories
/// reserved for tests and specs.
const TEST_PATTERNS: &[&str] = &[
    r"[_.]test\.[jt]sx?$",
    r"[_.]spec\.[jt]sx?$",
    r"_test\.go$",
    r"_test\.rs$",
    r"(^|/)test_[^/]+\.py$",
    r"_test\.py$",
    r"[_.]test\.exs?$",
    r"_spec\.rb$",
    r"Tests?\.(java|kt|cs)$",
    r"(^|/)tests?/",
    r"(^|/)spec/",
    r"(^|/)__tests__/",
];

/// Built-in type/domain definition markers.
const TYPE_DEFINITION_PATTERNS: &[&str] = &[
    r"(^|/)types\.[jt]sx?$",
    r"(^|/)types/",
    r"(^|/)domain/",
    r"(^|/)models/",
    r"\.d\.ts$",
    r"(^|/)interfaces/",
];

/// One row of the classification table.
#[derive(Debug, Clone)]
pub struct ClassRule {
    pub class: FileClass,
    pattern: Regex,
}

impl ClassRule {
    /// Compile a rule. Returns an error string for an invalid pattern.
    pub fn new(class: FileClass, pattern: &str) -> Result<Self, String> {
        let pattern = Regex::new(pattern)
            .map_err(|e| format!("invalid {class} pattern '{pattern}': {e}"))?;
        Ok(Self { class, pattern })
    }

    fn matches(&self, normalized_path: &str) -> bool {
        self.pattern.is_match(normalized_path)
    }
}

/// Ordered rule table mapping paths to [`FileClass`].
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<ClassRule>,
}

static BUILTIN: LazyLock<Classifier> = LazyLock::new(Classifier::builtin);

impl Classifier {
    /// The built-in table.
    pub fn builtin() -> Self {
        let table = TEST_PATTERNS
            .iter()
            .map(|p| (FileClass::Test, *p))
            .chain(TYPE_DEFINITION_PATTERNS.iter().map(|p| (FileClass::TypeDefinition, *p)));
        let rules = table
            .map(|(class, p)| ClassRule::new(class, p).expect("built-in pattern compiles"))
            .collect();
        Self { rules }
    }

    /// Append extra patterns for `class` to the table.
    pub fn with_patterns<S: AsRef<str>>(
        mut self,
        class: FileClass,
        patterns: &[S],
    ) -> Result<Self, String> {
        if class == FileClass::Production {
            return Err("production is the fallback class and takes no patterns".into());
        }
        for p in patterns {
            self.rules.push(ClassRule::new(class, p.as_ref())?);
        }
        Ok(self)
    }

    pub fn rules(&self) -> &[ClassRule] {
        &self.rules
    }

    /// Classify a path. Total: every string yields exactly one class.
    pub fn classify(&self, path: &str) -> FileClass {
        let normalized = path.replace('\\', "/");
        for class in FileClass::PRIORITY {
            if self
                .rules
                .iter()
                .any(|r| r.class == class && r.matches(&normalized))
            {
                return class;
            }
        }
        FileClass::Production
    }
}

impl Default for Classifier {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

/// Classify a path with the built-in table.
pub fn classify_path(path: &str) -> FileClass {
    BUILTIN.classify(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffixes_across_ecosystems() {
        for path in [
            "src/widget.test.ts",
            "src/widget.spec.tsx",
            "web/app_test.js",
            "pkg/server/handler_test.go",
            "src/parser_test.rs",
            "app/test_models.py",
            "app/models_test.py",
            "lib/widget_test.exs",
            "spec/widget_spec.rb",
            "src/main/java/WidgetTest.java",
        ] {
            assert_eq!(classify_path(path), FileClass::Test, "{path}");
        }
    }

    #[test]
    fn test_directories() {
        assert_eq!(classify_path("tests/integration.rs"), FileClass::Test);
        assert_eq!(classify_path("crate/tests/integration.rs"), FileClass::Test);
        assert_eq!(classify_path("pkg/test/helpers.ts"), FileClass::Test);
        assert_eq!(classify_path("src/__tests__/widget.ts"), FileClass::Test);
        assert_eq!(classify_path("spec/support/setup.rb"), FileClass::Test);
    }

    #[test]
    fn type_definitions() {
        assert_eq!(classify_path("src/types.ts"), FileClass::TypeDefinition);
        assert_eq!(classify_path("src/types/order.ts"), FileClass::TypeDefinition);
        assert_eq!(classify_path("src/domain/money.rs"), FileClass::TypeDefinition);
        assert_eq!(classify_path("app/models/user.py"), FileClass::TypeDefinition);
        assert_eq!(classify_path("src/global.d.ts"), FileClass::TypeDefinition);
        assert_eq!(classify_path("src/interfaces/repo.ts"), FileClass::TypeDefinition);
    }

    #[test]
    fn production_is_the_fallback() {
        assert_eq!(classify_path("src/widget.ts"), FileClass::Production);
        assert_eq!(classify_path("src/main.rs"), FileClass::Production);
        assert_eq!(classify_path(""), FileClass::Production);
        assert_eq!(classify_path("README.md"), FileClass::Production);
    }

    #[test]
    fn test_rules_win_over_type_rules() {
        assert_eq!(classify_path("src/domain/money.test.ts"), FileClass::Test);
        assert_eq!(classify_path("tests/models/user.py"), FileClass::Test);
    }

    #[test]
    fn near_misses_stay_production() {
        // Directory markers need a path-segment boundary.
        assert_eq!(classify_path("src/contest/entry.ts"), FileClass::Production);
        assert_eq!(classify_path("src/subdomain/entry.ts"), FileClass::Production);
        assert_eq!(classify_path("app/contest_entry.py"), FileClass::Production);
        assert_eq!(classify_path("src/testing.ts"), FileClass::Production);
    }

    #[test]
    fn windows_separators_are_normalized() {
        assert_eq!(classify_path(r"src\__tests__\widget.ts"), FileClass::Test);
        assert_eq!(classify_path(r"src\domain\money.rs"), FileClass::TypeDefinition);
    }

    #[test]
    fn classification_is_deterministic() {
        let c = Classifier::default();
        for path in ["a/b.test.ts", "a/types/x.ts", "a/b.ts", "weird path/ü.rs"] {
            assert_eq!(c.classify(path), c.classify(path));
            assert_eq!(c.classify(path), classify_path(path));
        }
    }

    #[test]
    fn extra_patterns_extend_the_table() {
        let c = Classifier::builtin()
            .with_patterns(FileClass::Test, &[r"\.feature$"])
            .unwrap()
            .with_patterns(FileClass::TypeDefinition, &[r"(^|/)schema/"])
            .unwrap();
        assert_eq!(c.classify("features/login.feature"), FileClass::Test);
        assert_eq!(c.classify("src/schema/order.rs"), FileClass::TypeDefinition);
        assert_eq!(c.rules().len(), Classifier::builtin().rules().len() + 2);
    }

    #[test]
    fn extra_patterns_reject_bad_input() {
        let err = Classifier::builtin()
            .with_patterns(FileClass::Test, &["("])
            .unwrap_err();
        assert!(err.contains("invalid test pattern"));
        assert!(
            Classifier::builtin()
                .with_patterns(FileClass::Production, &["x"])
                .is_err()
        );
    }
}
