//! The execution façade: source text in, `{output, error}` out.

use crate::evaluator::Evaluator;
use crate::input::InputSource;
use serde::{Deserialize, Serialize};

/// Output when the snippet has no executable lines.
pub const NO_CODE_PLACEHOLDER: &str = "# no code to execute";

/// Output when the snippet ran but printed nothing.
pub const NO_OUTPUT_PLACEHOLDER: &str = "# code executed without output";

/// Result of one `execute` call, serialized for the hosting page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecOutcome {
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

/// A self-contained interpreter instance.
///
/// Owns all mutable state; nothing is shared between instances. One
/// instance must not be driven from two call sites concurrently — it
/// has no internal locking and is not `Sync`.
pub struct Interpreter {
    evaluator: Evaluator,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            evaluator: Evaluator::new(),
        }
    }

    /// Build with a caller-supplied answer source for `input()`.
    pub fn with_input(input: Box<dyn InputSource>) -> Self {
        Self {
            evaluator: Evaluator::with_input(input),
        }
    }

    /// Restore the freshly-constructed state.
    pub fn reset(&mut self) {
        self.evaluator.reset();
    }

    /// Run a snippet and collect its output or first runtime failure.
    ///
    /// State is reset first, so consecutive calls with the same source
    /// produce identical outcomes.
    pub fn execute(&mut self, source: &str) -> ExecOutcome {
        self.reset();

        let has_code = source.lines().any(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        });
        if !has_code {
            return ExecOutcome {
                output: NO_CODE_PLACEHOLDER.to_string(),
                error: None,
            };
        }

        let program = pysim_parser::parse(source);
        match self.evaluator.run_program(&program) {
            Ok(()) => {
                ExecOutcome {
                    output: if self.evaluator.has_output() {
                        self.evaluator.output_text()
                    } else {
                        NO_OUTPUT_PLACEHOLDER.to_string()
                    },
                    error: None,
                }
            }
            Err(err) => ExecOutcome {
                output: self.evaluator.output_text(),
                error: Some(err.to_string()),
            },
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_placeholder() {
        let mut interp = Interpreter::new();
        let outcome = interp.execute("");
        assert_eq!(outcome.output, NO_CODE_PLACEHOLDER);
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn test_comment_only_source_placeholder() {
        let mut interp = Interpreter::new();
        let outcome = interp.execute("# just a comment\n\n   # another\n");
        assert_eq!(outcome.output, NO_CODE_PLACEHOLDER);
    }

    #[test]
    fn test_silent_code_placeholder() {
        let mut interp = Interpreter::new();
        let outcome = interp.execute("x = 5");
        assert_eq!(outcome.output, NO_OUTPUT_PLACEHOLDER);
        assert_eq!(outcome.error, None);
    }

    #[test]
    fn test_outcome_serialization_skips_absent_error() {
        let outcome = ExecOutcome {
            output: "hola".to_string(),
            error: None,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, "{\"output\":\"hola\"}");

        let outcome = ExecOutcome {
            output: String::new(),
            error: Some("NameError: name 'y' is not defined".to_string()),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"error\""));
    }
}
