//! Pressure–entropy flash.

use super::{FlashKind, FlashSolution, check_targets};
use crate::derivatives::{Linearization, Property};
use crate::error::FlashResult;
use crate::newton::{self, Criterion, Evaluation2};
use nf_eos::{EquationOfState, InitialGuess, NativeProperty};

const PRESSURE_TOL: Criterion = Criterion::Relative(1e-10);
const ENTROPY_TOL: Criterion = Criterion::Absolute(1e-10);

/// Solve for the state at pressure `p` [MPa] and entropy `s` [kJ/(kg·K)].
pub fn flash_ps<E, G>(eos: &E, guess: &G, p: f64, s: f64) -> FlashResult<FlashSolution>
where
    E: EquationOfState + ?Sized,
    G: InitialGuess + ?Sized,
{
    let kind = FlashKind::PressureEntropy;
    check_targets(kind, p, s)?;

    let converged = newton::solve_2d(
        kind,
        guess.guess_ps(p, s),
        [p, s],
        [PRESSURE_TOL, ENTROPY_TOL],
        |point| {
            let pressure = eos.diff_transformed(NativeProperty::Pressure, point)?;
            let entropy = eos.diff_transformed(NativeProperty::Entropy, point)?;
            Ok(Evaluation2::new(&pressure, &entropy))
        },
    )?;
    FlashSolution::gas(eos, kind, converged.state, [p, s], converged.iterations)
}

/// Volume and energy derivatives with respect to `(p, s)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureEntropyDerivatives {
    pub dv_dp_s: f64,
    pub dv_ds_p: f64,
    pub dp_ds_v: f64,
    pub du_dp_s: f64,
    pub du_ds_p: f64,
    pub dp_ds_u: f64,
}

pub fn ps_derivatives<E>(
    eos: &E,
    solution: &FlashSolution,
) -> FlashResult<PressureEntropyDerivatives>
where
    E: EquationOfState + ?Sized,
{
    let point = solution.point();
    let lin = Linearization::at(eos, point, Property::Pressure, Property::Entropy)?;
    let v = lin.partials_of(eos, point, Property::Volume)?;
    let u = lin.partials_of(eos, point, Property::Energy)?;
    Ok(PressureEntropyDerivatives {
        dv_dp_s: v.d_first,
        dv_ds_p: v.d_second,
        dp_ds_v: v.first_per_second(),
        du_dp_s: u.d_first,
        du_ds_p: u.d_second,
        dp_ds_u: u.first_per_second(),
    })
}
