//! Property errors.

use nf_core::NfError;
use nf_eos::EosError;
use nf_flash::{FlashError, Property};
use thiserror::Error;

/// Result type for property operations.
pub type PropsResult<T> = Result<T, PropsError>;

/// Errors that can occur during property evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropsError {
    /// The underlying flash failed.
    #[error("Flash failed: {0}")]
    Flash(#[from] FlashError),

    /// The equation of state rejected the state.
    #[error("Equation of state error: {0}")]
    Eos(#[from] EosError),

    /// Non-finite input or result.
    #[error("Numeric error: {0}")]
    Numeric(#[from] NfError),

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// No flash exists for this property pair.
    #[error("Unsupported property pair ({first}, {second})")]
    UnsupportedPair { first: Property, second: Property },

    /// Invalid sweep configuration.
    #[error("Invalid sweep: {what}")]
    InvalidSweep { what: &'static str },
}

impl From<PropsError> for NfError {
    fn from(err: PropsError) -> Self {
        match err {
            PropsError::Flash(inner) => inner.into(),
            PropsError::Eos(inner) => inner.into(),
            PropsError::Numeric(inner) => inner,
            PropsError::InvalidArg { what } | PropsError::InvalidSweep { what } => {
                NfError::InvalidArg { what }
            }
            PropsError::UnsupportedPair { .. } => NfError::InvalidArg {
                what: "property pair",
            },
        }
    }
}
