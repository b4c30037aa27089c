//! Shared fixtures for flash integration tests.
#![allow(dead_code)]

use nf_eos::{
    EosError, EosResult, EquationOfState, IdealGasGuess, InitialGuess, NativeProperty,
    PropertyDerivatives, StatePoint, VanDerWaals,
};
use nf_flash::{FlashSolution, flash_pt};

pub fn eos() -> VanDerWaals {
    VanDerWaals::nitrogen()
}

pub fn guess() -> IdealGasGuess {
    IdealGasGuess::nitrogen()
}

/// Forward-evaluated properties of a state, in oracle units.
#[derive(Clone, Copy, Debug)]
pub struct Forward {
    pub v: f64,
    pub u: f64,
    pub p: f64,
    pub t: f64,
    pub h: f64,
    pub s: f64,
}

pub fn forward<E: EquationOfState>(eos: &E, point: &StatePoint) -> Forward {
    Forward {
        v: point.v(),
        u: point.u(),
        p: eos.value(NativeProperty::Pressure, point).unwrap(),
        t: eos.value(NativeProperty::Temperature, point).unwrap(),
        h: eos.enthalpy_diff(point).unwrap().value,
        s: eos.value(NativeProperty::Entropy, point).unwrap(),
    }
}

/// Reference state at `(p, T)`.
pub fn state_at(p: f64, t: f64) -> (FlashSolution, Forward) {
    let eos = eos();
    let sol = flash_pt(&eos, &guess(), p, t).unwrap();
    let fwd = forward(&eos, sol.point());
    (sol, fwd)
}

pub fn rel_close(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * a.abs().max(b.abs()).max(1.0)
}

/// Guess that always returns the same point.
pub struct FixedGuess(pub StatePoint);

impl InitialGuess for FixedGuess {
    fn guess_pt(&self, _p: f64, _t: f64) -> StatePoint {
        self.0
    }

    fn guess_ph(&self, _p: f64, _h: f64) -> StatePoint {
        self.0
    }

    fn guess_ps(&self, _p: f64, _s: f64) -> StatePoint {
        self.0
    }

    fn guess_hs(&self, _h: f64, _s: f64) -> StatePoint {
        self.0
    }

    fn guess_u_vh(&self, _vt: f64, _h: f64) -> f64 {
        self.0.u()
    }

    fn guess_u_tv(&self, _vt: f64, _t: f64) -> f64 {
        self.0.u()
    }

    fn guess_u_pv(&self, _vt: f64, _p: f64) -> f64 {
        self.0.u()
    }
}

/// Pressure is constant, so any Jacobian with a pressure row is singular.
pub struct ConstantPressure;

impl EquationOfState for ConstantPressure {
    fn name(&self) -> &str {
        "constant pressure"
    }

    fn diff(&self, property: NativeProperty, point: &StatePoint) -> EosResult<PropertyDerivatives> {
        match property {
            NativeProperty::Pressure => Ok(PropertyDerivatives::new(0.1, 0.0, 0.0)),
            _ => VanDerWaals::ideal_nitrogen().diff(property, point),
        }
    }
}

/// Enthalpy is `h_target + cbrt(u - 1)` at any volume.
///
/// Newton on a cube root overshoots the root by a factor of -2 every step, so a
/// volume–enthalpy flash started away from `u = 1` can never converge.
pub struct CubeRootEnthalpy {
    pub h_target: f64,
}

impl EquationOfState for CubeRootEnthalpy {
    fn name(&self) -> &str {
        "cube-root enthalpy"
    }

    fn diff(&self, property: NativeProperty, point: &StatePoint) -> EosResult<PropertyDerivatives> {
        let (v, u) = (point.v(), point.u());
        match property {
            NativeProperty::Pressure => {
                let c = (u - 1.0).cbrt();
                let p = (c + self.h_target - u) / (1000.0 * v);
                let dp_du = (1.0 / (3.0 * c * c) - 1.0) / (1000.0 * v);
                Ok(PropertyDerivatives::new(p, -p / v, dp_du))
            }
            _ => Err(EosError::InvalidArg {
                what: "only pressure is defined",
            }),
        }
    }
}
