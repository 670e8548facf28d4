//! Structured errors for the render pipeline
//!
//! Errors never crash the host. Every failure is caught at the boundary
//! where it originates and converted into a value the dashboard can
//! display while staying interactive for every other unit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

/// Failure category, machine-readable so the host can branch on it
/// without parsing free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderErrorKind {
    /// Unit name unknown to the registry
    NotFound,
    /// Unit construction or load hook failed
    LoadFailure,
    /// Producer raised, or no contract could be satisfied
    CallFailure,
    /// Unit returned something that is neither figure shape
    UnrecognizedOutput,
}

impl RenderErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderErrorKind::NotFound => "not_found",
            RenderErrorKind::LoadFailure => "load_failure",
            RenderErrorKind::CallFailure => "call_failure",
            RenderErrorKind::UnrecognizedOutput => "unrecognized_output",
        }
    }
}

/// Structured render failure handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("[{}] unit '{unit}': {diagnostic}", .kind.as_str())]
pub struct RenderError {
    pub kind: RenderErrorKind,
    /// Name of the unit the failure is contained in
    pub unit: String,
    /// Human-readable detail, e.g. captured panic or error text
    pub diagnostic: String,
}

impl RenderError {
    pub fn new(
        kind: RenderErrorKind,
        unit: impl Into<String>,
        diagnostic: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            unit: unit.into(),
            diagnostic: diagnostic.into(),
        }
    }

    pub fn not_found(unit: impl Into<String>) -> Self {
        let unit = unit.into();
        let diagnostic = format!("no unit registered under '{unit}'");
        Self::new(RenderErrorKind::NotFound, unit, diagnostic)
    }

    pub fn load_failure(unit: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::new(RenderErrorKind::LoadFailure, unit, diagnostic)
    }

    pub fn call_failure(unit: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::new(RenderErrorKind::CallFailure, unit, diagnostic)
    }

    pub fn unrecognized_output(unit: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self::new(RenderErrorKind::UnrecognizedOutput, unit, diagnostic)
    }
}

/// Error raised inside a unit or a dataset accessor.
///
/// Units report failure with these; the resolver wraps them into a
/// `RenderError` carrying the unit name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("column '{0}' has no usable values")]
    EmptyColumn(String),

    #[error("column '{name}' has {got} cells, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("no rows left after dropping incomplete records")]
    NoRows,

    #[error("invalid records: {0}")]
    InvalidRecords(String),

    #[error("shared dataset unavailable: {0}")]
    DataUnavailable(String),

    #[error("{0}")]
    Failed(String),
}

impl UnitError {
    pub fn failed(detail: impl Into<String>) -> Self {
        UnitError::Failed(detail.into())
    }
}
