//! Error types
//!
//! Every ledger operation fails with exactly one of three kinds: the service
//! could not be reached, the service answered with data that broke the schema,
//! or the caller cancelled the call.

use std::fmt;

use thiserror::Error;

// ============================================================================
// TOP-LEVEL ERROR
// ============================================================================

/// Failure of a single ledger client operation.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// The request could not be sent or no successful response was received.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A response was received but failed schema validation.
    #[error("invalid response: {0}")]
    Validation(#[from] ValidationError),

    /// The caller cancelled the operation before the exchange completed.
    #[error("request cancelled")]
    Cancelled,
}

impl LedgerError {
    pub fn is_transport(&self) -> bool {
        matches!(self, LedgerError::Transport(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, LedgerError::Cancelled)
    }
}

// ============================================================================
// TRANSPORT ERRORS
// ============================================================================

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid service url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("service responded with status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

// ============================================================================
// VALIDATION ERRORS
// ============================================================================

/// Schema rule broken by a single field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    #[error("required field is missing")]
    Missing,

    #[error("field is not part of the schema")]
    UnexpectedField,

    #[error("expected {expected}, found {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("value is not a number")]
    NotANumber,

    #[error("value must not be negative")]
    Negative,

    #[error("value must be an integer")]
    NotAnInteger,

    #[error("value is out of range")]
    OutOfRange,

    #[error("expected length {expected}, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("body is not valid JSON: {0}")]
    MalformedJson(String),
}

/// A rule violation located at a JSON path such as `deposits[1].deposit_cnt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub rule: Rule,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.rule)
    }
}

/// All schema violations found in one response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    pub(crate) fn malformed_json(source: &serde_json::Error) -> Self {
        Self::new(vec![ValidationIssue {
            path: "$".to_string(),
            rule: Rule::MalformedJson(source.to_string()),
        }])
    }

    /// Returns the rule broken at `path`, if any.
    pub fn rule_at(&self, path: &str) -> Option<&Rule> {
        self.issues
            .iter()
            .find(|issue| issue.path == path)
            .map(|issue| &issue.rule)
    }
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    let rendered: Vec<String> = issues.iter().map(ToString::to_string).collect();
    format!("{} schema violation(s): {}", issues.len(), rendered.join("; "))
}
