//! Error types for flash operations.

use crate::derivatives::Property;
use crate::flash::FlashKind;
use nf_core::NfError;
use nf_eos::EosError;
use thiserror::Error;

/// Errors that can occur during a flash or derivative propagation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlashError {
    #[error("{kind} flash did not converge within {iterations} iterations")]
    NonConvergence { kind: FlashKind, iterations: usize },

    #[error("{kind} flash Jacobian is singular (determinant {determinant}) at iteration {iteration}")]
    IllConditioned {
        kind: FlashKind,
        determinant: f64,
        iteration: usize,
    },

    #[error("{kind} flash left the gas region (p = {pressure} MPa, T = {temperature} K)")]
    NotGas {
        kind: FlashKind,
        pressure: f64,
        temperature: f64,
    },

    #[error("Properties {first} and {second} do not determine the state")]
    DegeneratePair { first: Property, second: Property },

    #[error("Invalid flash input: {0}")]
    InvalidInput(#[from] NfError),

    #[error("Equation of state error: {0}")]
    Eos(#[from] EosError),
}

pub type FlashResult<T> = Result<T, FlashError>;

impl From<FlashError> for NfError {
    fn from(e: FlashError) -> Self {
        match e {
            FlashError::NonConvergence { .. } => NfError::Invariant {
                what: "flash convergence",
            },
            FlashError::IllConditioned { .. } => NfError::Invariant {
                what: "flash jacobian",
            },
            FlashError::NotGas { .. } => NfError::InvalidArg {
                what: "targets outside the gas region",
            },
            FlashError::DegeneratePair { .. } => NfError::InvalidArg {
                what: "property pair",
            },
            FlashError::InvalidInput(inner) => inner,
            FlashError::Eos(inner) => inner.into(),
        }
    }
}
