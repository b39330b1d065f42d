//! Error types for model loading and evaluation

use std::path::PathBuf;
use thiserror::Error;

/// Construction-time failure. Fatal to the model being loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// No artifact exists at the resolved path.
    #[error("no compiled model found at {}", path.display())]
    NotFound { path: PathBuf },
    /// The file exists but the dynamic loader rejected it.
    #[error("failed to load compiled model {}: {reason}", path.display())]
    LoadFailed { path: PathBuf, reason: String },
    /// A required entry point is not exported by the artifact.
    #[error("compiled model is missing required symbol `{symbol}`")]
    MissingSymbol { symbol: String },
    /// The model name cannot be used as a symbol prefix.
    #[error("invalid model name {name:?}: expected a C identifier")]
    InvalidModelName { name: String },
    /// The artifact reports an input or output size of zero.
    #[error("compiled model declares invalid dimensions: input_size={input_size}, output_size={output_size}")]
    InvalidDimensions { input_size: usize, output_size: usize },
}

/// Call-time shape mismatch. The caller may retry with corrected arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DimensionError {
    #[error("input size mismatch: expected {expected}, got {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },
    #[error("parameter size mismatch: expected {expected}, got {actual}")]
    ParamSizeMismatch { expected: usize, actual: usize },
}

/// The derivative kinds a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Evaluate,
    Jacobian,
    Hessian,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Evaluate => write!(f, "evaluate"),
            Operation::Jacobian => write!(f, "jacobian"),
            Operation::Hessian => write!(f, "hessian"),
        }
    }
}

/// Main error type for cgmodel_core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    // ===== Load Errors =====
    #[error(transparent)]
    Load(#[from] LoadError),

    // ===== Call Errors =====
    #[error(transparent)]
    Dimension(#[from] DimensionError),
    /// The artifact was built without the requested derivative order.
    #[error("model `{model}` does not support {operation}: artifact was built without it")]
    Unsupported { model: String, operation: Operation },
    /// Hessian output index outside `[0, output_size)`.
    #[error("output index {index} out of range: valid range is [0, {output_size})")]
    OutputIndexOutOfRange { index: i64, output_size: usize },

    // ===== Native Errors =====
    /// A compiled routine returned a non-zero status code.
    #[error("compiled routine `{symbol}` failed with code {code}")]
    Evaluation { symbol: String, code: i32 },
}

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;
