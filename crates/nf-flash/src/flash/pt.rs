//! Pressure–temperature flash.

use super::{FlashKind, FlashSolution, check_targets};
use crate::derivatives::{Linearization, Property};
use crate::error::FlashResult;
use crate::newton::{self, Criterion, Evaluation2};
use nf_eos::{EquationOfState, InitialGuess, NativeProperty};

const PRESSURE_TOL: Criterion = Criterion::Relative(1e-10);
const TEMPERATURE_TOL: Criterion = Criterion::Absolute(1e-10);

/// Solve for the state at pressure `p` [MPa] and temperature `t` [K].
pub fn flash_pt<E, G>(eos: &E, guess: &G, p: f64, t: f64) -> FlashResult<FlashSolution>
where
    E: EquationOfState + ?Sized,
    G: InitialGuess + ?Sized,
{
    let kind = FlashKind::PressureTemperature;
    check_targets(kind, p, t)?;

    let converged = newton::solve_2d(
        kind,
        guess.guess_pt(p, t),
        [p, t],
        [PRESSURE_TOL, TEMPERATURE_TOL],
        |point| {
            let pressure = eos.diff_transformed(NativeProperty::Pressure, point)?;
            let temperature = eos.diff_transformed(NativeProperty::Temperature, point)?;
            Ok(Evaluation2::new(&pressure, &temperature))
        },
    )?;
    FlashSolution::gas(eos, kind, converged.state, [p, t], converged.iterations)
}

/// Volume and energy derivatives with respect to `(p, T)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureTemperatureDerivatives {
    pub dv_dp_t: f64,
    pub dv_dt_p: f64,
    pub dp_dt_v: f64,
    pub du_dp_t: f64,
    pub du_dt_p: f64,
    pub dp_dt_u: f64,
}

pub fn pt_derivatives<E>(
    eos: &E,
    solution: &FlashSolution,
) -> FlashResult<PressureTemperatureDerivatives>
where
    E: EquationOfState + ?Sized,
{
    let point = solution.point();
    let lin = Linearization::at(eos, point, Property::Pressure, Property::Temperature)?;
    let v = lin.partials_of(eos, point, Property::Volume)?;
    let u = lin.partials_of(eos, point, Property::Energy)?;
    Ok(PressureTemperatureDerivatives {
        dv_dp_t: v.d_first,
        dv_dt_p: v.d_second,
        dp_dt_v: v.first_per_second(),
        du_dp_t: u.d_first,
        du_dt_p: u.d_second,
        dp_dt_u: u.first_per_second(),
    })
}
