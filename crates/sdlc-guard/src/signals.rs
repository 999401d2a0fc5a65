//! Shell-command signatures the activity tracker looks for.
//!
//! A command is checked against a fixed table of test-runner invocations
//! (extendable through config) and, separately, a commit invocation.

use regex::Regex;
use std::sync::LazyLock;

/// Runner subcommands that are unambiguous wherever they appear.
const TEST_SUBCOMMANDS: &[&str] = &[
    r"\bcargo\s+(test|nextest)\b",
    r"\b(npm|pnpm|yarn|bun)\s+(run\s+)?test\b",
    r"\bpython3?\s+-m\s+(pytest|unittest)\b",
    r"\bgo\s+test\b",
    r"\bmix\s+test\b",
    r"\bdotnet\s+test\b",
];

/// Where a runner binary counts as the command being run: start of line,
/// after a shell separator, or behind a launcher. Leading `VAR=value`
/// assignments are skipped.
const COMMAND_POSITION: &str = r"(^|[;&|(]\s*|\b(npx|bunx|exec|run|yarn|pnpm)\s+)(\w+=\S*\s+)*";

/// Runner binaries, matched only at [`COMMAND_POSITION`].
///
/// Gradle and Maven need a standalone `test` task or goal; Gradle's
/// `-x <task>` excludes the task that follows it.
const TEST_BINARIES: &[&str] = &[
    r"(vitest|jest|mocha)\b",
    r"pytest\b",
    r"rspec\b",
    r"(\./)?gradlew?(\s+(-x\s+\S+|-x\S+|-[^x\s]\S*|[^\s-]\S*))*?\s+(\S*:)?test(\s|$)",
    r"(\./)?mvnw?(\s+\S+)*?\s+test(\s|$)",
];

/// `git [options] commit`, but not `commit-tree` and friends.
const COMMIT_PATTERN: &str = r"\bgit(\s+-\S+(\s+[^-\s]\S*)?)*\s+commit([^-\w]|$)";

static BUILTIN: LazyLock<CommandSignals> = LazyLock::new(CommandSignals::builtin);

/// Compiled command signature tables.
#[derive(Debug, Clone)]
pub struct CommandSignals {
    test_runners: Vec<Regex>,
    commit: Regex,
}

impl CommandSignals {
    pub fn builtin() -> Self {
        Self {
            test_runners: TEST_SUBCOMMANDS
                .iter()
                .map(|p| p.to_string())
                .chain(TEST_BINARIES.iter().map(|p| format!("{COMMAND_POSITION}{p}")))
                .map(|p| Regex::new(&p).expect("built-in pattern compiles"))
                .collect(),
            commit: Regex::new(COMMIT_PATTERN).expect("built-in pattern compiles"),
        }
    }

    /// Append extra test-runner patterns.
    pub fn with_test_runners<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self, String> {
        for p in patterns {
            let p = p.as_ref();
            let re = Regex::new(p)
                .map_err(|e| format!("invalid test runner pattern '{p}': {e}"))?;
            self.test_runners.push(re);
        }
        Ok(self)
    }

    /// Whether `command` invokes a known test runner.
    pub fn is_test_run(&self, command: &str) -> bool {
        self.test_runners.iter().any(|re| re.is_match(command))
    }

    /// Whether `command` creates a commit.
    pub fn is_commit(&self, command: &str) -> bool {
        self.commit.is_match(command)
    }
}

impl Default for CommandSignals {
    fn default() -> Self {
        BUILTIN.clone()
    }
}
