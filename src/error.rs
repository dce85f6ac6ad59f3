//! Error types for network and pathway analysis

use thiserror::Error;

/// Errors that can occur while building, scoring or reducing networks
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A required input set or table was empty
    #[error("Empty input: {context}")]
    EmptyInput { context: String },

    /// An enumerated option or numeric parameter is not recognized / out of range
    #[error("Invalid configuration: {parameter} = {value:?}")]
    InvalidConfiguration { parameter: String, value: String },

    /// A pathway with a degenerate (empty) gene set reached distance computation
    #[error("Invalid pathway {pathway}: gene set is empty")]
    InvalidPathway { pathway: String },

    /// An identifier is absent from the universe it must belong to
    #[error("Mapping error: {id} not found in {universe}")]
    MappingError { id: String, universe: String },

    /// Interaction tables may not pair a gene with itself
    #[error("Invalid interaction: self-pair on {gene}")]
    InvalidInteraction { gene: String },

    /// Malformed tabular input
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML configuration error
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl AnalysisError {
    pub fn empty_input(context: impl Into<String>) -> Self {
        AnalysisError::EmptyInput { context: context.into() }
    }

    pub fn invalid_config(parameter: impl Into<String>, value: impl ToString) -> Self {
        AnalysisError::InvalidConfiguration {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    pub fn mapping(id: impl ToString, universe: impl Into<String>) -> Self {
        AnalysisError::MappingError {
            id: id.to_string(),
            universe: universe.into(),
        }
    }

    /// `EmptyInput` is informational; callers composing pipelines may treat it as an
    /// empty result instead of a failure.
    pub fn is_empty_input(&self) -> bool {
        matches!(self, AnalysisError::EmptyInput { .. })
    }
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
