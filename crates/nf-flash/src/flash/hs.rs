//! Enthalpy–entropy flash.

use super::{FlashKind, FlashSolution, check_targets};
use crate::derivatives::{Linearization, Partials, Property};
use crate::error::FlashResult;
use crate::newton::{self, Criterion, Evaluation2};
use nf_eos::{EquationOfState, InitialGuess, NativeProperty, enthalpy_derivatives_transformed};

const ENTHALPY_TOL: Criterion = Criterion::Absolute(1e-8);
const ENTROPY_TOL: Criterion = Criterion::Absolute(1e-10);

/// Solve for the state at enthalpy `h` [kJ/kg] and entropy `s` [kJ/(kg·K)].
pub fn flash_hs<E, G>(eos: &E, guess: &G, h: f64, s: f64) -> FlashResult<FlashSolution>
where
    E: EquationOfState + ?Sized,
    G: InitialGuess + ?Sized,
{
    let kind = FlashKind::EnthalpyEntropy;
    check_targets(kind, h, s)?;

    let converged = newton::solve_2d(
        kind,
        guess.guess_hs(h, s),
        [h, s],
        [ENTHALPY_TOL, ENTROPY_TOL],
        |point| {
            let pressure = eos.diff_transformed(NativeProperty::Pressure, point)?;
            let enthalpy = enthalpy_derivatives_transformed(&pressure, point);
            let entropy = eos.diff_transformed(NativeProperty::Entropy, point)?;
            Ok(Evaluation2::new(&enthalpy, &entropy))
        },
    )?;
    FlashSolution::gas(eos, kind, converged.state, [h, s], converged.iterations)
}

/// Volume and energy derivatives with respect to `(h, s)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnthalpyEntropyDerivatives {
    pub dv_dh_s: f64,
    pub dv_ds_h: f64,
    pub dh_ds_v: f64,
    pub du_dh_s: f64,
    pub du_ds_h: f64,
    pub dh_ds_u: f64,
}

pub fn hs_derivatives<E>(
    eos: &E,
    solution: &FlashSolution,
) -> FlashResult<EnthalpyEntropyDerivatives>
where
    E: EquationOfState + ?Sized,
{
    let point = solution.point();
    let lin = Linearization::at(eos, point, Property::Enthalpy, Property::Entropy)?;
    let v = lin.partials_of(eos, point, Property::Volume)?;
    let u = lin.partials_of(eos, point, Property::Energy)?;
    Ok(EnthalpyEntropyDerivatives {
        dv_dh_s: v.d_first,
        dv_ds_h: v.d_second,
        dh_ds_v: v.first_per_second(),
        du_dh_s: u.d_first,
        du_ds_h: u.d_second,
        dh_ds_u: u.first_per_second(),
    })
}

/// Pressure with `∂p/∂h|s`, `∂p/∂s|h`; `first_per_second()` gives `∂h/∂s|p`.
pub fn hs_pressure<E>(eos: &E, solution: &FlashSolution) -> FlashResult<Partials>
where
    E: EquationOfState + ?Sized,
{
    hs_block(eos, solution, Property::Pressure)
}

/// Temperature with `∂T/∂h|s`, `∂T/∂s|h`; `first_per_second()` gives `∂h/∂s|T`.
pub fn hs_temperature<E>(eos: &E, solution: &FlashSolution) -> FlashResult<Partials>
where
    E: EquationOfState + ?Sized,
{
    hs_block(eos, solution, Property::Temperature)
}

fn hs_block<E>(eos: &E, solution: &FlashSolution, of: Property) -> FlashResult<Partials>
where
    E: EquationOfState + ?Sized,
{
    let point = solution.point();
    Linearization::at(eos, point, Property::Enthalpy, Property::Entropy)?
        .partials_of(eos, point, of)
}
