use std::fmt;

/// Errors that can occur when starting the presentation. Navigation itself
/// has no error surface: unknown targets and empty queries are no-ops.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// The database contains no sections to present.
    EmptyCatalog,
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::EmptyCatalog => {
                write!(f, "ERROR: Document contains no sections to present")
            }
        }
    }
}

impl std::error::Error for RuntimeError {}
