use std::fmt::{self, Display, Formatter};

#[derive(Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(FailureReason),
}

impl Verdict {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum FailureReason {
    /// An `.err` fixture exists but the program exited with 0
    ErrorNotDetected,
    /// An `.err` fixture exists and the redacted stderr differs from it
    ErrorOutputMismatch { expected: String, got: String },
    /// No `.err` fixture, yet the program exited with a non-zero code
    ExecutionError { exit_code: i32, stderr: String },
    /// Normalized stdout lines differ from the golden file
    WrongOutput {
        message: &'static str,
        expected: Vec<String>,
        got: Vec<String>,
    },
}

impl Display for FailureReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ErrorNotDetected => write!(f, "Program did not detect error---exit code 0."),
            Self::ErrorOutputMismatch { .. } => {
                write!(f, "Missing error message or extra error output")
            }
            Self::ExecutionError { .. } => write!(f, "Execution error---exit code not 0."),
            Self::WrongOutput { message, .. } => write!(f, "{}", message),
        }
    }
}
