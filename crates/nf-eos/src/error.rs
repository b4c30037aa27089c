//! Equation-of-state errors.

use nf_core::NfError;
use thiserror::Error;

/// Result type for oracle operations.
pub type EosResult<T> = Result<T, EosError>;

/// Errors raised by equation-of-state and initial-guess oracles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EosError {
    /// Non-physical values (negative temperature, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// State point outside the model's domain.
    #[error("Value out of range for {what}")]
    OutOfRange { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Property backend failure.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

impl From<EosError> for NfError {
    fn from(err: EosError) -> Self {
        match err {
            EosError::NonPhysical { what } => NfError::Invariant { what },
            EosError::OutOfRange { what } | EosError::InvalidArg { what } => {
                NfError::InvalidArg { what }
            }
            EosError::Backend { .. } => NfError::Invariant {
                what: "property backend",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EosError::OutOfRange {
            what: "specific volume",
        };
        assert!(err.to_string().contains("specific volume"));
    }

    #[test]
    fn error_to_nf_error() {
        let err: NfError = EosError::NonPhysical { what: "temperature" }.into();
        assert!(matches!(err, NfError::Invariant { what: "temperature" }));

        let err: NfError = EosError::OutOfRange { what: "volume" }.into();
        assert!(matches!(err, NfError::InvalidArg { .. }));

        let err = EosError::Backend {
            message: "no state".into(),
        };
        assert!(err.to_string().contains("no state"));
        assert!(matches!(NfError::from(err), NfError::Invariant { .. }));
    }
}
