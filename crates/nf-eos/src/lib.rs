//! nf-eos: equation-of-state contracts for nitroflash.
//!
//! Provides:
//! - `StatePoint`: the fundamental `(v, u)` coordinates, carried with `vt = ln v`
//! - `EquationOfState`: property + derivative oracle in natural and log-volume coordinates
//! - `InitialGuess`: starting-point oracle for every flash target pair
//! - `CoolPropNitrogen`: the reference nitrogen model, backed by CoolProp
//! - A closed-form van der Waals nitrogen model and a matching ideal-gas initial guess
//!
//! # Units
//!
//! Everything in this crate is expressed in oracle units: pressure in MPa, temperature in
//! K, specific energies in kJ/kg, entropy in kJ/(kg·K), specific volume in m³/kg. With
//! these units enthalpy is `h = u + p·v·1000`.
//!
//! # Example
//!
//! ```
//! use nf_eos::{EquationOfState, NativeProperty, StatePoint, VanDerWaals};
//!
//! let eos = VanDerWaals::nitrogen();
//! let point = StatePoint::from_volume(1.15, 291.6);
//! let p = eos.diff(NativeProperty::Pressure, &point).unwrap();
//! assert!(p.value > 0.0 && p.d_dvol < 0.0);
//! ```

pub mod coolprop;
pub mod enthalpy;
pub mod error;
pub mod guess;
pub mod oracle;
pub mod state;
pub mod van_der_waals;

// Re-exports for ergonomics
pub use coolprop::CoolPropNitrogen;
pub use enthalpy::{enthalpy, enthalpy_derivatives, enthalpy_derivatives_transformed};
pub use error::{EosError, EosResult};
pub use guess::{IdealGasGuess, InitialGuess};
pub use oracle::{EquationOfState, NativeProperty, PropertyDerivatives, SaturatedVapor};
pub use state::StatePoint;
pub use van_der_waals::{MOLAR_MASS_N2, VanDerWaals, VanDerWaalsParams};
