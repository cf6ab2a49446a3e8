use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for directory loading operations.
///
/// Load failures are fatal: nothing downstream can run without a directory.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Home directory not found, so no default directory path exists.
    #[error("could not determine home directory")]
    NoHomeDir,

    /// Directory file missing or unreadable.
    #[error("failed to read host directory {}: {source}", path.display())]
    Unreadable {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
}

/// Error type for evaluating a single query expression.
///
/// These are local to the expression being evaluated; other independent
/// queries in the same invocation are unaffected.
#[derive(Error, Debug)]
pub enum EvalError {
    /// Malformed expression: leading/trailing operator, consecutive
    /// operators, or an empty expression.
    #[error("bad expression {expr:?}: {reason}")]
    BadExpression {
        /// The offending expression text.
        expr: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Macro expansion revisited a name already on its own expansion path.
    #[error("macro cycle detected: {cycle}")]
    CyclicMacro {
        /// The expansion path, e.g. `a -> b -> a`.
        cycle: String,
    },

    /// A usage filter pattern is not a valid regular expression.
    #[error("bad filter pattern {pattern:?}: {source}")]
    BadPattern {
        /// The offending pattern text.
        pattern: String,
        /// Underlying regex error.
        source: regex::Error,
    },
}

/// Diagnostic for a structurally invalid directory line.
///
/// Not an error type: the loader skips malformed lines and continues,
/// logging this diagnostic (unknown names in expressions are a separate,
/// silent concern).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedLine {
    /// One-based line number in the source text.
    pub line: usize,
    /// What was wrong with the line.
    pub reason: String,
}

impl fmt::Display for MalformedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}
