//! Shared error types used across submodules.

use thiserror::Error;

use crate::params::Param;

/// Errors raised while resolving units and quantities.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// The unit symbol is not in the registry.
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),
    /// The parameter name is not recognized.
    #[error("unknown parameter `{0}`")]
    UnknownParameter(String),
    /// A unit was attached to a quantity of a different physical dimension.
    #[error("unit `{unit}` has dimension {found}, but `{quantity}` expects {expected}")]
    DimensionMismatch {
        /// Name of the quantity being assigned.
        quantity: String,
        /// Unit symbol that was supplied.
        unit: String,
        /// Dimension required by the quantity.
        expected: String,
        /// Dimension carried by the unit.
        found: String,
    },
}

/// Top-level error type for the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    /// Invalid, missing or conflicting field parameters.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Fields cannot be combined (different dimensions, mismatched spans).
    #[error("incompatible fields: {0}")]
    IncompatibleFields(String),
    /// A numeric argument is outside the domain of the operation.
    #[error("domain error: {0}")]
    Domain(String),
    /// The field does not define the requested quantity.
    #[error("quantity {quantity} is not defined for this field")]
    UndefinedQuantity {
        /// The quantity that was requested.
        quantity: Param,
    },
    /// Wraps unit registry errors.
    #[error(transparent)]
    Units(#[from] UnitError),
    /// Raised by the parameter block parser.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// One-based line number of the offending statement.
        line: usize,
        /// Description of the problem.
        message: String,
    },
    /// Raised when numerical procedures fail to converge.
    #[error("solver convergence failure: {0}")]
    Convergence(String),
}

impl FieldError {
    /// Shorthand for [`FieldError::Configuration`].
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}
