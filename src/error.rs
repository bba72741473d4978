//! Error types for moea-islands
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Error type for decision variable operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VariableError {
    /// A value fell outside the domain of the variable
    #[error("Value out of range: {value} not in [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    /// A codon was not in `[0, max_value)`
    #[error("Invalid codon {codon}: must be less than {max_value}")]
    InvalidCodon { codon: usize, max_value: usize },

    /// Invalid variable structure
    #[error("Invalid variable structure: {0}")]
    InvalidStructure(String),
}

/// Error type for operator failures
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OperatorError {
    /// Invalid operator configuration
    #[error("Invalid operator configuration: {0}")]
    InvalidConfiguration(String),

    /// Operator received the wrong number of parents
    #[error("Wrong number of parents: expected {expected}, got {actual}")]
    WrongArity { expected: usize, actual: usize },

    /// Two parents disagree on the shape of a variable
    #[error("Dimension mismatch at variable {index}: {left} vs {right}")]
    DimensionMismatch {
        index: usize,
        left: usize,
        right: usize,
    },

    /// Selection operation failed
    #[error("Selection failed: {0}")]
    SelectionFailed(String),
}

/// Top-level error type for evolution operations
#[derive(Debug, Error)]
pub enum EvolutionError {
    /// Variable error
    #[error("Variable error: {0}")]
    Variable(#[from] VariableError),

    /// Operator error
    #[error("Operator error: {0}")]
    Operator(#[from] OperatorError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Two values that must agree in kind were compared
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Operation not defined for this value
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Requested element does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Empty population
    #[error("Empty population")]
    EmptyPopulation,

    /// An island worker failed during a run
    #[error("Island {index} failed: {reason}")]
    IslandFailed { index: usize, reason: String },
}

impl EvolutionError {
    pub(crate) fn type_mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Result type alias for evolution operations
pub type EvoResult<T> = Result<T, EvolutionError>;
