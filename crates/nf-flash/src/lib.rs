//! Newton flash solvers for single-phase nitrogen.
//!
//! A flash finds the fundamental state `(v, u)` that reproduces two target properties
//! under an [`EquationOfState`](nf_eos::EquationOfState). Five target pairs are
//! solved in log-volume coordinates `(ln v, u)` with a 2×2 Newton step by Cramer's rule:
//! pressure–temperature, pressure–enthalpy, pressure–entropy, enthalpy–entropy and
//! volume–enthalpy (scalar, at fixed volume). Temperature–volume and pressure–volume
//! are scalar solves in `u` as well. Every iteration is bounded by a fixed cap, and a
//! converged state that is not a stable gas is rejected.
//!
//! A successful flash returns a [`FlashSolution`]; the derivative propagators in
//! [`derivatives`] and in each variant module only accept one, so derivatives can never
//! be taken at an unconverged state.

pub mod derivatives;
pub mod error;
pub mod flash;
pub mod jacobian;
pub mod newton;

pub use derivatives::{
    Differential, Linearization, Partials, Property, cross_derivatives, secondary_derivatives,
};
pub use error::{FlashError, FlashResult};
pub use flash::{
    FlashInput, FlashKind, FlashSolution, flash,
    hs::{
        EnthalpyEntropyDerivatives, flash_hs, hs_derivatives, hs_pressure, hs_temperature,
    },
    ph::{PressureEnthalpyDerivatives, flash_ph, ph_derivatives, ph_temperature},
    ps::{PressureEntropyDerivatives, flash_ps, ps_derivatives},
    pt::{PressureTemperatureDerivatives, flash_pt, pt_derivatives},
    vh::{VolumeEnthalpyDerivatives, flash_vh, vh_derivatives},
    volume::{
        PressureVolumeDerivatives, TemperatureVolumeDerivatives, flash_pv, flash_tv,
        pv_derivatives, tv_derivatives,
    },
};
pub use jacobian::Jacobian2;
pub use newton::{Criterion, MAX_ITERATIONS};
