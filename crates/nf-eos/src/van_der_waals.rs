//! Closed-form van der Waals model for nitrogen.
//!
//! A single-phase reference oracle with analytic derivatives. With the attraction and
//! co-volume terms set to zero it reduces to a calorically perfect ideal gas, which is
//! what [`IdealGasGuess`](crate::guess::IdealGasGuess) inverts in closed form.
//!
//! ```text
//! T(v, u) = (u - u0 + a/v) / cv
//! p(v, u) = R·T/(v - b) - a/v²                      [kPa, scaled to MPa]
//! s(v, u) = cv·ln(T/T_ref) + R·ln(v - b) + s0
//! ```

use crate::error::{EosError, EosResult};
use crate::oracle::{EquationOfState, NativeProperty, PropertyDerivatives, SaturatedVapor};
use crate::state::StatePoint;

/// Universal gas constant [kJ/(kmol·K)].
pub const R_UNIVERSAL: f64 = 8.314_462_618;

/// Molar mass of N₂ [kg/kmol].
pub const MOLAR_MASS_N2: f64 = 28.013_48;

const KPA_PER_MPA: f64 = 1.0e3;

/// Model constants, all in oracle units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VanDerWaalsParams {
    /// Specific gas constant [kJ/(kg·K)]
    pub r: f64,
    /// Attraction parameter [kJ·m³/kg²]
    pub a: f64,
    /// Co-volume [m³/kg]
    pub b: f64,
    /// Constant-volume heat capacity [kJ/(kg·K)]
    pub cv: f64,
    /// Reference temperature for the entropy origin [K]
    pub t_ref: f64,
    /// Internal energy offset [kJ/kg]
    pub u_offset: f64,
    /// Entropy offset [kJ/(kg·K)]
    pub s_offset: f64,
}

impl VanDerWaalsParams {
    /// Nitrogen. The energy and entropy offsets put `u`, `h` and `s` on the same
    /// reference as tabulated nitrogen correlations near ambient conditions.
    pub fn nitrogen() -> Self {
        let m = MOLAR_MASS_N2 / 1000.0;
        Self {
            r: R_UNIVERSAL / MOLAR_MASS_N2,
            // 0.1370 Pa·m⁶/mol², 3.87e-5 m³/mol
            a: 0.1370 / (m * m) / 1000.0,
            b: 3.87e-5 / m,
            cv: 0.746_94,
            t_ref: 298.15,
            u_offset: -1.9315,
            s_offset: 6.8755,
        }
    }

    /// Nitrogen as a calorically perfect ideal gas (no attraction, no co-volume).
    pub fn ideal_nitrogen() -> Self {
        Self {
            a: 0.0,
            b: 0.0,
            ..Self::nitrogen()
        }
    }

    pub fn is_ideal(&self) -> bool {
        self.a == 0.0 && self.b == 0.0
    }

    fn validate(&self) -> EosResult<()> {
        let all = [
            self.r,
            self.a,
            self.b,
            self.cv,
            self.t_ref,
            self.u_offset,
            self.s_offset,
        ];
        if all.iter().any(|x| !x.is_finite()) {
            return Err(EosError::InvalidArg {
                what: "van der Waals parameters must be finite",
            });
        }
        if self.r <= 0.0 || self.cv <= 0.0 || self.t_ref <= 0.0 {
            return Err(EosError::InvalidArg {
                what: "gas constant, heat capacity and reference temperature must be positive",
            });
        }
        if self.a < 0.0 || self.b < 0.0 {
            return Err(EosError::InvalidArg {
                what: "attraction and co-volume must be non-negative",
            });
        }
        Ok(())
    }
}

impl Default for VanDerWaalsParams {
    fn default() -> Self {
        Self::nitrogen()
    }
}

/// Van der Waals equation of state.
#[derive(Clone, Debug)]
pub struct VanDerWaals {
    params: VanDerWaalsParams,
}

impl VanDerWaals {
    pub fn new(params: VanDerWaalsParams) -> EosResult<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn nitrogen() -> Self {
        Self {
            params: VanDerWaalsParams::nitrogen(),
        }
    }

    pub fn ideal_nitrogen() -> Self {
        Self {
            params: VanDerWaalsParams::ideal_nitrogen(),
        }
    }

    pub fn params(&self) -> &VanDerWaalsParams {
        &self.params
    }

    /// Critical point `(T_c [K], p_c [MPa], v_c [m³/kg])`, if the model has one.
    pub fn critical_point(&self) -> Option<(f64, f64, f64)> {
        let VanDerWaalsParams { r, a, b, .. } = self.params;
        if a <= 0.0 || b <= 0.0 {
            return None;
        }
        let t_c = 8.0 * a / (27.0 * r * b);
        let p_c = a / (27.0 * b * b) / KPA_PER_MPA;
        Some((t_c, p_c, 3.0 * b))
    }

    /// Maxwell equal-area construction on the isotherm `t` below `T_c`.
    ///
    /// Returns `(p_sat [MPa], v_liquid, v_vapour)`.
    pub fn saturation(&self, t: f64) -> Option<(f64, f64, f64)> {
        let (t_c, _, _) = self.critical_point()?;
        if !(t > 0.0 && t < t_c) {
            return None;
        }
        let VanDerWaalsParams { r, a, b, .. } = self.params;
        let rt = r * t;
        // Isotherm pressure [kPa] and the sign of -∂p/∂v (positive where stable).
        let pk = |v: f64| rt / (v - b) - a / (v * v);
        let stable = |v: f64| rt * v * v * v - 2.0 * a * (v - b) * (v - b);

        let liquid_spinodal = bisect(b, 3.0 * b, stable);
        let mut hi = 6.0 * b;
        while stable(hi) <= 0.0 {
            hi *= 2.0;
        }
        let vapor_spinodal = bisect(3.0 * b, hi, |v| -stable(v));

        let roots = |p: f64| {
            let v_l = bisect(b, liquid_spinodal, |v| pk(v) - p);
            let mut hi = 2.0 * vapor_spinodal;
            while pk(hi) >= p {
                hi *= 2.0;
            }
            let v_g = bisect(vapor_spinodal, hi, |v| pk(v) - p);
            (v_l, v_g)
        };
        let unequal_area = |p: f64| {
            let (v_l, v_g) = roots(p);
            rt * ((v_g - b) / (v_l - b)).ln() + a * (1.0 / v_g - 1.0 / v_l) - p * (v_g - v_l)
        };

        let p_min = pk(liquid_spinodal).max(0.0);
        let p_max = pk(vapor_spinodal);
        let p = bisect(p_min, p_max, unequal_area);
        let (v_l, v_g) = roots(p);
        Some((p / KPA_PER_MPA, v_l, v_g))
    }

    fn temperature(&self, v: f64, u: f64) -> f64 {
        (u - self.params.u_offset + self.params.a / v) / self.params.cv
    }

    fn check_point(&self, point: &StatePoint) -> EosResult<(f64, f64)> {
        let (v, u) = (point.v(), point.u());
        if !u.is_finite() || !v.is_finite() {
            return Err(EosError::InvalidArg {
                what: "state point must be finite",
            });
        }
        // Also rejects NaN volume.
        if !(v > self.params.b) {
            return Err(EosError::OutOfRange {
                what: "specific volume must exceed the co-volume",
            });
        }
        Ok((v, u))
    }
}

impl Default for VanDerWaals {
    fn default() -> Self {
        Self::nitrogen()
    }
}

impl EquationOfState for VanDerWaals {
    fn name(&self) -> &str {
        if self.params.is_ideal() {
            "ideal gas (N2)"
        } else {
            "van der Waals (N2)"
        }
    }

    fn diff(&self, property: NativeProperty, point: &StatePoint) -> EosResult<PropertyDerivatives> {
        let (v, u) = self.check_point(point)?;
        let VanDerWaalsParams {
            r,
            a,
            b,
            cv,
            t_ref,
            s_offset,
            ..
        } = self.params;

        let t = self.temperature(v, u);
        let dt_dv = -a / (cv * v * v);
        let dt_du = 1.0 / cv;
        let vb = v - b;

        let d = match property {
            NativeProperty::Temperature => PropertyDerivatives::new(t, dt_dv, dt_du),
            NativeProperty::Pressure => {
                let p = (r * t / vb - a / (v * v)) / KPA_PER_MPA;
                let dp_dv = (r * dt_dv / vb - r * t / (vb * vb) + 2.0 * a / (v * v * v))
                    / KPA_PER_MPA;
                let dp_du = r / (cv * vb) / KPA_PER_MPA;
                PropertyDerivatives::new(p, dp_dv, dp_du)
            }
            NativeProperty::Entropy => {
                if !(t > 0.0) {
                    return Err(EosError::NonPhysical {
                        what: "temperature must be positive to evaluate entropy",
                    });
                }
                let s = cv * (t / t_ref).ln() + r * vb.ln() + s_offset;
                let ds_dv = -a / (v * v * t) + r / vb;
                let ds_du = 1.0 / t;
                PropertyDerivatives::new(s, ds_dv, ds_du)
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
        Ok(self
            .saturation(t)
            .map(|(pressure, _, volume)| SaturatedVapor { pressure, volume }))
    }
}

/// Bisection for a sign change with `f(lo) > 0 >= f(hi)`. Never evaluates the ends.
fn bisect(mut lo: f64, mut hi: f64, f: impl Fn(f64) -> f64) -> f64 {
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        if f(mid) > 0.0 {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
