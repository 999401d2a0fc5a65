//! Tool descriptions with usage guidance.
//!
//! The agent sees one description string per tool. [`ToolSpec`] assembles
//! it from a purpose line, when (not) to use the tool, examples and the
//! output format, and pairs it with the argument schema.

use std::fmt::Write;

use crate::ToolDef;

/// Description and argument schema of one SDLC tool.
///
/// ```ignore
/// ToolSpec::new(names::STATUS, "Show the SDLC session state")
///     .use_when("Before choosing the next phase")
///     .avoid_when("To change the phase; use sdlc_set_phase instead")
///     .parameters_for::<StatusArgs>()
///     .to_tool_def()
/// ```
#[derive(Debug, Clone)]
pub struct ToolSpec {
    name: &'static str,
    purpose: &'static str,
    use_when: String,
    avoid_when: String,
    parameters: serde_json::Value,
    examples: Vec<(&'static str, &'static str)>,
    output_format: &'static str,
}

impl ToolSpec {
    /// Start a spec. Parameters default to an empty object schema.
    pub fn new(name: &'static str, purpose: &'static str) -> Self {
        Self {
            name,
            purpose,
            use_when: String::new(),
            avoid_when: String::new(),
            parameters: serde_json::json!({"type": "object", "properties": {}}),
            examples: Vec::new(),
            output_format: "Plain text",
        }
    }

    pub fn use_when(mut self, text: impl Into<String>) -> Self {
        self.use_when = text.into();
        self
    }

    /// Points the agent at the sibling tool that fits better.
    pub fn avoid_when(mut self, text: impl Into<String>) -> Self {
        self.avoid_when = text.into();
        self
    }

    /// Derive the parameter schema from the argument type the tool
    /// deserializes, so the two cannot drift apart.
    pub fn parameters_for<T: schemars::JsonSchema>(mut self) -> Self {
        self.parameters = crate::json_schema_for::<T>();
        self
    }

    pub fn example(mut self, call: &'static str, result: &'static str) -> Self {
        self.examples.push((call, result));
        self
    }

    pub fn output_format(mut self, format: &'static str) -> Self {
        self.output_format = format;
        self
    }

    /// The description string shown to the agent. Empty guidance lines are
    /// left out.
    pub fn description(&self) -> String {
        let mut desc = format!("{}.", self.purpose);
        if !self.use_when.is_empty() {
            let _ = write!(desc, "\nWhen to use: {}", self.use_when);
        }
        if !self.avoid_when.is_empty() {
            let _ = write!(desc, "\nWhen NOT to use: {}", self.avoid_when);
        }
        if !self.examples.is_empty() {
            desc.push_str("\nExamples:");
            for (call, result) in &self.examples {
                let _ = write!(desc, "\n  - Input: {call} → {result}");
            }
        }
        let _ = write!(desc, "\nOutput format: {}", self.output_format);
        desc
    }

    pub fn to_tool_def(self) -> ToolDef {
        let description = self.description();
        ToolDef::new(self.name, description, self.parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_includes_guidance_and_examples() {
        let spec = ToolSpec::new("sdlc_status", "Show the session state")
            .use_when("Before choosing the next phase")
            .avoid_when("To change the phase; use sdlc_set_phase instead")
            .example("sdlc_status()", "SDLC SESSION STATUS ...");

        let desc = spec.description();
        assert!(desc.starts_with("Show the session state."));
        assert!(desc.contains("\nWhen NOT to use: To change the phase"));
        assert!(desc.contains("Input: sdlc_status() → SDLC SESSION STATUS"));
        assert!(desc.ends_with("Output format: Plain text"));
    }

    #[test]
    fn missing_guidance_is_omitted() {
        let def = ToolSpec::new("bare", "Do one thing")
            .output_format("A checklist")
            .to_tool_def();
        assert_eq!(def.function.name, "bare");
        assert_eq!(
            def.function.description,
            "Do one thing.\nOutput format: A checklist"
        );
        assert_eq!(def.function.parameters["type"], "object");
    }
}
