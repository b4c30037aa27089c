//! nf-props: nitrogen properties in SI units.
//!
//! Wraps the flash solvers in an interface taking and returning Pa, K, J/kg,
//! J/(kg·K), m³/kg and kg/m³. All conversion to and from the oracle's MPa/kJ units
//! happens here. Also provides an equilibrium-state calculator and parallel property
//! sweeps built on it.

pub mod calculator;
pub mod error;
pub mod nitrogen;
pub mod sweep_executor;
pub mod sweeps;

pub use calculator::{EquilibriumState, FluidInputPair, compute_equilibrium_state};
pub use error::{PropsError, PropsResult};
pub use nitrogen::NitrogenProperties;
pub use sweep_executor::{SweepResult, SweptInput, execute_sweep};
pub use sweeps::{SweepDefinition, SweepType};

pub use nf_flash::Partials;
