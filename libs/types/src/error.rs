//! Order construction errors.
//!
//! All variants are validation failures: the call is rejected, nothing is
//! retried, and the caller is expected to fix the request.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrderError {
    /// More than one of the mutually exclusive amount fields was supplied
    #[error("cannot supply both `{first}` and `{second}`")]
    AmbiguousAmountSpec {
        first: &'static str,
        second: &'static str,
    },

    /// Neither `amount_in` nor `amount_out` was supplied
    #[error("must supply one of `amount_in` or `amount_out`")]
    MissingAmount,

    /// Amounts must be strictly positive after quantization
    #[error("`{field}` must be positive, got {value}")]
    NonPositiveAmount { field: &'static str, value: Decimal },

    /// Slippage ratio must lie strictly between 0 and 1
    #[error("slippage must be in (0, 1), got {value}")]
    SlippageOutOfRange { value: Decimal },
}
