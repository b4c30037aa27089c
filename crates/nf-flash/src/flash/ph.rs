//! Pressure–enthalpy flash.

use super::{FlashKind, FlashSolution, check_targets};
use crate::derivatives::{Linearization, Partials, Property};
use crate::error::FlashResult;
use crate::newton::{self, Criterion, Evaluation2};
use nf_eos::{EquationOfState, InitialGuess, NativeProperty, enthalpy_derivatives_transformed};

const PRESSURE_TOL: Criterion = Criterion::Relative(1e-10);
const ENTHALPY_TOL: Criterion = Criterion::Absolute(1e-8);

/// Solve for the state at pressure `p` [MPa] and enthalpy `h` [kJ/kg].
pub fn flash_ph<E, G>(eos: &E, guess: &G, p: f64, h: f64) -> FlashResult<FlashSolution>
where
    E: EquationOfState + ?Sized,
    G: InitialGuess + ?Sized,
{
    let kind = FlashKind::PressureEnthalpy;
    check_targets(kind, p, h)?;

    let converged = newton::solve_2d(
        kind,
        guess.guess_ph(p, h),
        [p, h],
        [PRESSURE_TOL, ENTHALPY_TOL],
        |point| {
            let pressure = eos.diff_transformed(NativeProperty::Pressure, point)?;
            let enthalpy = enthalpy_derivatives_transformed(&pressure, point);
            Ok(Evaluation2::new(&pressure, &enthalpy))
        },
    )?;
    FlashSolution::gas(eos, kind, converged.state, [p, h], converged.iterations)
}

/// Volume and energy derivatives with respect to `(p, h)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureEnthalpyDerivatives {
    pub dv_dp_h: f64,
    pub dv_dh_p: f64,
    pub dp_dh_v: f64,
    pub du_dp_h: f64,
    pub du_dh_p: f64,
    pub dp_dh_u: f64,
}

pub fn ph_derivatives<E>(
    eos: &E,
    solution: &FlashSolution,
) -> FlashResult<PressureEnthalpyDerivatives>
where
    E: EquationOfState + ?Sized,
{
    let point = solution.point();
    let lin = Linearization::at(eos, point, Property::Pressure, Property::Enthalpy)?;
    let v = lin.partials_of(eos, point, Property::Volume)?;
    let u = lin.partials_of(eos, point, Property::Energy)?;
    Ok(PressureEnthalpyDerivatives {
        dv_dp_h: v.d_first,
        dv_dh_p: v.d_second,
        dp_dh_v: v.first_per_second(),
        du_dp_h: u.d_first,
        du_dh_p: u.d_second,
        dp_dh_u: u.first_per_second(),
    })
}

/// Temperature with `∂T/∂p|h`, `∂T/∂h|p`; `first_per_second()` gives `∂p/∂h|T`.
pub fn ph_temperature<E>(eos: &E, solution: &FlashSolution) -> FlashResult<Partials>
where
    E: EquationOfState + ?Sized,
{
    let point = solution.point();
    Linearization::at(eos, point, Property::Pressure, Property::Enthalpy)?
        .partials_of(eos, point, Property::Temperature)
}
