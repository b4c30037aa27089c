//! Volume–enthalpy flash.
//!
//! Volume is fixed, so only `u` is unknown and the iteration is scalar Newton on
//! `h(v, u) - h_target`.

use super::{FlashKind, FlashSolution, check_targets};
use crate::derivatives::{Linearization, Property};
use crate::error::FlashResult;
use crate::newton::{self, Criterion};
use nf_eos::{EquationOfState, InitialGuess, NativeProperty, StatePoint, enthalpy_derivatives};

const ENTHALPY_TOL: Criterion = Criterion::Absolute(1e-8);

/// Solve for the state at specific volume `v` [m³/kg] and enthalpy `h` [kJ/kg].
pub fn flash_vh<E, G>(eos: &E, guess: &G, v: f64, h: f64) -> FlashResult<FlashSolution>
where
    E: EquationOfState + ?Sized,
    G: InitialGuess + ?Sized,
{
    let kind = FlashKind::VolumeEnthalpy;
    check_targets(kind, v, h)?;

    let base = StatePoint::from_volume(v, guess.guess_u_vh(v.ln(), h));
    let converged = newton::solve_1d(kind, base.u(), h, ENTHALPY_TOL, |u| {
        let point = base.with_u(u);
        let pressure = eos.diff(NativeProperty::Pressure, &point)?;
        let enthalpy = enthalpy_derivatives(&pressure, &point);
        Ok((enthalpy.value, enthalpy.d_du))
    })?;
    FlashSolution::gas(
        eos,
        kind,
        base.with_u(converged.state),
        [v, h],
        converged.iterations,
    )
}

/// Energy and volume derivatives with respect to `(v, h)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumeEnthalpyDerivatives {
    pub du_dv_h: f64,
    pub du_dh_v: f64,
    pub dv_dh_u: f64,
}

pub fn vh_derivatives<E>(
    eos: &E,
    solution: &FlashSolution,
) -> FlashResult<VolumeEnthalpyDerivatives>
where
    E: EquationOfState + ?Sized,
{
    let point = solution.point();
    let lin = Linearization::at(eos, point, Property::Volume, Property::Enthalpy)?;
    let u = lin.partials_of(eos, point, Property::Energy)?;
    Ok(VolumeEnthalpyDerivatives {
        du_dv_h: u.d_first,
        du_dh_v: u.d_second,
        dv_dh_u: u.first_per_second(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use nf_eos::{IdealGasGuess, VanDerWaals};

    #[test]
    fn matches_forward_enthalpy() {
        let eos = VanDerWaals::nitrogen();
        let guess = IdealGasGuess::nitrogen();
        let point = StatePoint::from_volume(0.02, 150.0);
        let h = eos.enthalpy_diff(&point).unwrap().value;

        let sol = flash_vh(&eos, &guess, 0.02, h).unwrap();
        assert_eq!(sol.v(), 0.02);
        assert!((sol.u() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn ideal_gas_derivatives() {
        let eos = VanDerWaals::ideal_nitrogen();
        let guess = IdealGasGuess::nitrogen();
        let params = *eos.params();

        let sol = flash_vh(&eos, &guess, 0.3, 250.0).unwrap();
        let d = vh_derivatives(&eos, &sol).unwrap();
        // h = u0 + (cv + R)·T is independent of v, so is u at fixed h
        assert!(d.du_dv_h.abs() < 1e-12);
        assert!((d.du_dh_v - params.cv / (params.cv + params.r)).abs() < 1e-12);
    }

    #[test]
    fn non_positive_volume_fails() {
        let eos = VanDerWaals::nitrogen();
        let guess = IdealGasGuess::nitrogen();
        assert!(flash_vh(&eos, &guess, -0.1, 200.0).is_err());
        assert!(flash_vh(&eos, &guess, 0.0, 200.0).is_err());
    }
}
