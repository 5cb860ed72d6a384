use thiserror::Error;

/// Failure reported by the policy engine itself.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct EngineError(pub String);

impl EngineError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Why a single (part, rule) evaluation produced no messages.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("error constructing query {query:?}: {reason}")]
    InvalidQuery { query: String, reason: String },

    #[error("error evaluating rules: {0}")]
    Engine(#[from] EngineError),

    #[error("rule {rule} produced a non-string message: {found}")]
    NonStringMessage { rule: String, found: String },
}

impl EvalError {
    /// Stable id for the report `kind` field.
    pub fn kind(&self) -> &'static str {
        use ccheck_types::ids;
        match self {
            EvalError::InvalidQuery { .. } => ids::ERROR_INVALID_QUERY,
            EvalError::Engine(_) => ids::ERROR_ENGINE,
            EvalError::NonStringMessage { .. } => ids::ERROR_NON_STRING_MESSAGE,
        }
    }
}

/// Evaluation was cancelled by the caller before it completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("evaluation cancelled")]
pub struct Cancelled;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("failed to compile rule name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// An error scoped to one input file. It never aborts other files.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FileError {
    /// The file could not be read, has no decoder, or failed to decode.
    #[error("{message}")]
    Load {
        kind: &'static str,
        message: String,
        part: Option<usize>,
    },

    /// A rule could not be evaluated against one document part.
    #[error("{rule} (part {part}): {error}")]
    Evaluation {
        rule: String,
        part: usize,
        error: EvalError,
    },
}

impl FileError {
    pub fn kind(&self) -> &'static str {
        match self {
            FileError::Load { kind, .. } => *kind,
            FileError::Evaluation { error, .. } => error.kind(),
        }
    }

    pub fn rule(&self) -> Option<&str> {
        match self {
            FileError::Load { .. } => None,
            FileError::Evaluation { rule, .. } => Some(rule),
        }
    }

    pub fn part(&self) -> Option<usize> {
        match self {
            FileError::Load { part, .. } => *part,
            FileError::Evaluation { part, .. } => Some(*part),
        }
    }
}
