//! Enthalpy derived from pressure, `h = u + p·v·1000`.
//!
//! With pressure in MPa and volume in m³/kg, `p·v` is in MJ/kg, hence the factor of
//! 1000 to land in kJ/kg.

use crate::oracle::PropertyDerivatives;
use crate::state::StatePoint;
use nf_core::units::oracle::PV_TO_KJ_PER_KG;

/// Specific enthalpy [kJ/kg] from `u` [kJ/kg], `p` [MPa] and `v` [m³/kg].
#[inline]
pub fn enthalpy(u: f64, p: f64, v: f64) -> f64 {
    u + p * v * PV_TO_KJ_PER_KG
}

/// Enthalpy and its `(v, u)` derivatives, given pressure derivatives in `(v, u)`.
pub fn enthalpy_derivatives(
    pressure: &PropertyDerivatives,
    point: &StatePoint,
) -> PropertyDerivatives {
    let v = point.v();
    let p = pressure.value;
    PropertyDerivatives::new(
        enthalpy(point.u(), p, v),
        (pressure.d_dvol * v + p) * PV_TO_KJ_PER_KG,
        1.0 + pressure.d_du * v * PV_TO_KJ_PER_KG,
    )
}

/// Enthalpy and its `(vt, u)` derivatives, given pressure derivatives in `(vt, u)`.
pub fn enthalpy_derivatives_transformed(
    pressure: &PropertyDerivatives,
    point: &StatePoint,
) -> PropertyDerivatives {
    let v = point.v();
    let p = pressure.value;
    PropertyDerivatives::new(
        enthalpy(point.u(), p, v),
        (pressure.d_dvol + p) * v * PV_TO_KJ_PER_KG,
        1.0 + pressure.d_du * v * PV_TO_KJ_PER_KG,
    )
}
