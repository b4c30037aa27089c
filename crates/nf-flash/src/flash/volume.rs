//! Fixed-volume flashes for temperature and pressure targets.
//!
//! As in the volume–enthalpy flash only `u` is unknown. Both targets are native oracle
//! properties, so each step needs a single oracle call.

use super::{FlashKind, FlashSolution, check_targets};
use crate::derivatives::{Linearization, Property};
use crate::error::FlashResult;
use crate::newton::{self, Criterion};
use nf_eos::{EquationOfState, InitialGuess, NativeProperty, StatePoint};

const TEMPERATURE_TOL: Criterion = Criterion::Absolute(1e-10);
const PRESSURE_TOL: Criterion = Criterion::Relative(1e-10);

/// Solve for the state at temperature `t` [K] and specific volume `v` [m³/kg].
pub fn flash_tv<E, G>(eos: &E, guess: &G, t: f64, v: f64) -> FlashResult<FlashSolution>
where
    E: EquationOfState + ?Sized,
    G: InitialGuess + ?Sized,
{
    let kind = FlashKind::TemperatureVolume;
    check_targets(kind, t, v)?;
    let start = guess.guess_u_tv(v.ln(), t);
    solve_at_volume(eos, kind, v, start, [t, v], TEMPERATURE_TOL, NativeProperty::Temperature)
}

/// Solve for the state at pressure `p` [MPa] and specific volume `v` [m³/kg].
pub fn flash_pv<E, G>(eos: &E, guess: &G, p: f64, v: f64) -> FlashResult<FlashSolution>
where
    E: EquationOfState + ?Sized,
    G: InitialGuess + ?Sized,
{
    let kind = FlashKind::PressureVolume;
    check_targets(kind, p, v)?;
    let start = guess.guess_u_pv(v.ln(), p);
    solve_at_volume(eos, kind, v, start, [p, v], PRESSURE_TOL, NativeProperty::Pressure)
}

fn solve_at_volume<E>(
    eos: &E,
    kind: FlashKind,
    v: f64,
    start: f64,
    targets: [f64; 2],
    criterion: Criterion,
    property: NativeProperty,
) -> FlashResult<FlashSolution>
where
    E: EquationOfState + ?Sized,
{
    let base = StatePoint::from_volume(v, start);
    let converged = newton::solve_1d(kind, start, targets[0], criterion, |u| {
        let d = eos.diff(property, &base.with_u(u))?;
        Ok((d.value, d.d_du))
    })?;
    FlashSolution::gas(
        eos,
        kind,
        base.with_u(converged.state),
        targets,
        converged.iterations,
    )
}

/// Energy and pressure derivatives with respect to `(T, v)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemperatureVolumeDerivatives {
    /// Constant-volume heat capacity [kJ/(kg·K)]
    pub du_dt_v: f64,
    pub du_dv_t: f64,
    pub dp_dt_v: f64,
    pub dp_dv_t: f64,
}

pub fn tv_derivatives<E>(
    eos: &E,
    solution: &FlashSolution,
) -> FlashResult<TemperatureVolumeDerivatives>
where
    E: EquationOfState + ?Sized,
{
    let point = solution.point();
    let lin = Linearization::at(eos, point, Property::Temperature, Property::Volume)?;
    let u = lin.partials_of(eos, point, Property::Energy)?;
    let p = lin.partials_of(eos, point, Property::Pressure)?;
    Ok(TemperatureVolumeDerivatives {
        du_dt_v: u.d_first,
        du_dv_t: u.d_second,
        dp_dt_v: p.d_first,
        dp_dv_t: p.d_second,
    })
}

/// Energy and temperature derivatives with respect to `(p, v)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureVolumeDerivatives {
    pub du_dp_v: f64,
    pub du_dv_p: f64,
    pub dt_dp_v: f64,
    pub dt_dv_p: f64,
}

pub fn pv_derivatives<E>(
    eos: &E,
    solution: &FlashSolution,
) -> FlashResult<PressureVolumeDerivatives>
where
    E: EquationOfState + ?Sized,
{
    let point = solution.point();
    let lin = Linearization::at(eos, point, Property::Pressure, Property::Volume)?;
    let u = lin.partials_of(eos, point, Property::Energy)?;
    let t = lin.partials_of(eos, point, Property::Temperature)?;
    Ok(PressureVolumeDerivatives {
        du_dp_v: u.d_first,
        du_dv_p: u.d_second,
        dt_dp_v: t.d_first,
        dt_dv_p: t.d_second,
    })
}
