//! CoolProp-backed nitrogen model.
//!
//! CoolProp evaluates states from `(ρ, T)`, so each call first inverts `u(ρ, T)` for
//! temperature by Newton with `∂u/∂T|ρ = cv`. Pressure derivatives come from central
//! differences in `(ρ, T)`; every other partial follows from the fundamental relation
//!
//! ```text
//! ∂u/∂v|T = T·∂p/∂T|v - p
//! ∂s/∂u|v = 1/T
//! ∂s/∂v|u = p/T
//! ```

use crate::error::{EosError, EosResult};
use crate::oracle::{EquationOfState, NativeProperty, PropertyDerivatives, SaturatedVapor};
use crate::state::StatePoint;
use crate::van_der_waals::VanDerWaalsParams;
use nf_core::units::oracle::{J_PER_KJ, PA_PER_MPA};
use rfluids::prelude::*;
use std::fmt::Display;

/// Triple-point temperature of nitrogen [K].
pub const TRIPLE_POINT_TEMPERATURE: f64 = 63.151;

const MAX_INVERSION_ITERATIONS: usize = 50;
const INVERSION_TOL: f64 = 1e-12;
const DIFF_STEP: f64 = 1e-6;

/// Nitrogen through the CoolProp reference equation of state.
#[derive(Clone, Copy, Debug, Default)]
pub struct CoolPropNitrogen;

/// Oracle-unit state at one `(v, u)` point.
#[derive(Clone, Copy, Debug)]
struct Evaluated {
    /// [K]
    t: f64,
    /// [MPa]
    p: f64,
    /// [kJ/(kg·K)]
    s: f64,
    dt_dv: f64,
    dt_du: f64,
    dp_dv: f64,
    dp_du: f64,
}

fn backend(context: &str, err: impl Display) -> EosError {
    EosError::Backend {
        message: format!("CoolProp error {context}: {err}"),
    }
}

impl CoolPropNitrogen {
    pub fn new() -> Self {
        Self
    }

    /// Critical temperature [K].
    pub fn critical_temperature(&self) -> EosResult<f64> {
        let mut fluid = Fluid::from(Pure::Nitrogen);
        fluid
            .critical_temperature()
            .map_err(|e| backend("getting critical temperature", e))
    }

    fn at(&self, rho: f64, t: f64) -> EosResult<Fluid> {
        Fluid::from(Pure::Nitrogen)
            .in_state(FluidInput::density(rho), FluidInput::temperature(t))
            .map_err(|e| backend(&format!("at rho={rho} kg/m³, T={t} K"), e))
    }

    fn pressure_at(&self, rho: f64, t: f64) -> EosResult<f64> {
        self.at(rho, t)?
            .pressure()
            .map_err(|e| backend("getting pressure", e))
    }

    /// Internal energy [kJ/kg] and `cv` [kJ/(kg·K)] at `(ρ, T)`.
    fn energy_at(&self, rho: f64, t: f64) -> EosResult<(f64, f64)> {
        let mut fluid = self.at(rho, t)?;
        let h = fluid.enthalpy().map_err(|e| backend("getting enthalpy", e))?;
        let p = fluid.pressure().map_err(|e| backend("getting pressure", e))?;
        let cv = fluid
            .specific_heat_const_volume()
            .map_err(|e| backend("getting cv", e))?;
        Ok(((h - p / rho) / J_PER_KJ, cv / J_PER_KJ))
    }

    /// Temperature at density `rho` [kg/m³] and internal energy `u` [kJ/kg].
    fn temperature(&self, rho: f64, u: f64) -> EosResult<f64> {
        let vdw = VanDerWaalsParams::nitrogen();
        let mut t = ((u - vdw.u_offset + vdw.a * rho) / vdw.cv).max(TRIPLE_POINT_TEMPERATURE);
        for _ in 0..MAX_INVERSION_ITERATIONS {
            let (u_t, cv) = self.energy_at(rho, t)?;
            let mut next = t - (u_t - u) / cv;
            if !(next > 0.0) {
                next = 0.5 * t;
            }
            let converged = (next - t).abs() < INVERSION_TOL * t;
            t = next;
            if converged {
                return Ok(t);
            }
        }
        Err(EosError::OutOfRange {
            what: "temperature inversion from density and internal energy",
        })
    }

    fn evaluate(&self, point: &StatePoint) -> EosResult<Evaluated> {
        let (v, u) = (point.v(), point.u());
        if !u.is_finite() || !v.is_finite() {
            return Err(EosError::InvalidArg {
                what: "state point must be finite",
            });
        }
        if !(v > 0.0) {
            return Err(EosError::OutOfRange {
                what: "specific volume must be positive",
            });
        }
        let rho = 1.0 / v;
        let t = self.temperature(rho, u)?;

        let mut fluid = self.at(rho, t)?;
        let p = fluid.pressure().map_err(|e| backend("getting pressure", e))?;
        let s = fluid.entropy().map_err(|e| backend("getting entropy", e))?;
        let cv = fluid
            .specific_heat_const_volume()
            .map_err(|e| backend("getting cv", e))?
            / J_PER_KJ;

        let d_rho = DIFF_STEP * rho;
        let dp_drho = (self.pressure_at(rho + d_rho, t)? - self.pressure_at(rho - d_rho, t)?)
            / (2.0 * d_rho);
        let d_t = DIFF_STEP * t;
        let dp_dt = (self.pressure_at(rho, t + d_t)? - self.pressure_at(rho, t - d_t)?)
            / (2.0 * d_t);

        // Pa·m³/kg = J/kg
        let du_dv_t = (t * dp_dt - p) / J_PER_KJ;
        let dt_du = 1.0 / cv;
        let dt_dv = -du_dv_t * dt_du;
        let dp_dv_t = -rho * rho * dp_drho;
        Ok(Evaluated {
            t,
            p: p / PA_PER_MPA,
            s: s / J_PER_KJ,
            dt_dv,
            dt_du,
            dp_dv: (dp_dv_t + dp_dt * dt_dv) / PA_PER_MPA,
            dp_du: dp_dt * dt_du / PA_PER_MPA,
        })
    }
}

impl EquationOfState for CoolPropNitrogen {
    fn name(&self) -> &str {
        "CoolProp (N2)"
    }

    fn diff(&self, property: NativeProperty, point: &StatePoint) -> EosResult<PropertyDerivatives> {
        let e = self.evaluate(point)?;
        let d = match property {
            NativeProperty::Temperature => PropertyDerivatives::new(e.t, e.dt_dv, e.dt_du),
            NativeProperty::Pressure => PropertyDerivatives::new(e.p, e.dp_dv, e.dp_du),
            // kPa·m³/kg = kJ/kg
            NativeProperty::Entropy => {
                PropertyDerivatives::new(e.s, e.p * 1.0e3 / e.t, 1.0 / e.t)
            }
        };
        Ok(d)
    }

    fn saturated_vapor(&self, t: f64) -> EosResult<Option<SaturatedVapor>> {
        if !(t > 0.0) {
            return Err(EosError::NonPhysical {
                what: "saturation temperature must be positive",
            });
        }
        if t >= self.critical_temperature()? {
            return Ok(None);
        }
        if t < TRIPLE_POINT_TEMPERATURE {
            return Err(EosError::OutOfRange {
                what: "temperature below the triple point",
            });
        }
        let mut fluid = Fluid::from(Pure::Nitrogen)
            .in_state(FluidInput::temperature(t), FluidInput::quality(1.0))
            .map_err(|e| backend(&format!("at saturation, T={t} K"), e))?;
        let p = fluid.pressure().map_err(|e| backend("getting pressure", e))?;
        let rho = fluid.density().map_err(|e| backend("getting density", e))?;
        Ok(Some(SaturatedVapor {
            pressure: p / PA_PER_MPA,
            volume: 1.0 / rho,
        }))
    }
}
