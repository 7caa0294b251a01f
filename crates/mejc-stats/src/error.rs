//! # Statistics Errors
//!
//! Every rejection names the variable and, where it applies, the offending
//! observation index. Nothing in this crate returns NaN or infinity in
//! place of an error.

use thiserror::Error;

/// Errors raised by fitting and summary routines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    /// No observations supplied.
    #[error("no observations in {variable}")]
    Empty {
        /// Name of the empty sequence.
        variable: String,
    },

    /// `x` and `y` have different lengths.
    #[error("length mismatch: x has {x_len} observations, y has {y_len}")]
    LengthMismatch {
        /// Length of the regressor.
        x_len: usize,
        /// Length of the response.
        y_len: usize,
    },

    /// Fewer observations than the model has parameters.
    #[error("at least {required} observations required, got {got}")]
    InsufficientObservations {
        /// Minimum observation count.
        required: usize,
        /// Observations supplied.
        got: usize,
    },

    /// NaN or infinite value in the input.
    #[error("non-finite value {value} in {variable} at index {index}")]
    NonFinite {
        /// Sequence containing the value.
        variable: String,
        /// Position of the value.
        index: usize,
        /// The value itself.
        value: f64,
    },

    /// Logarithm requested of a zero or negative value.
    #[error("cannot take log of {value} in {variable} at index {index}")]
    NonPositiveLog {
        /// Sequence containing the value.
        variable: String,
        /// Position of the value.
        index: usize,
        /// The value itself.
        value: f64,
    },

    /// The regressor has zero variance; the slope is not identified.
    #[error("undefined slope: {variable} is constant (value {value})")]
    UndefinedSlope {
        /// Name of the regressor.
        variable: String,
        /// The constant value.
        value: f64,
    },

    /// Intermediate sums left the `f64` range although every input was finite.
    #[error("numeric overflow fitting {y_variable} on {x_variable}")]
    NumericOverflow {
        /// Name of the regressor.
        x_variable: String,
        /// Name of the response.
        y_variable: String,
    },

    /// Percentile outside `[0, 100]`.
    #[error("percentile must lie in [0, 100], got {0}")]
    InvalidPercentile(f64),

    /// A sampling distribution could not be constructed.
    #[error("invalid distribution parameters: {0}")]
    InvalidDistribution(String),
}
