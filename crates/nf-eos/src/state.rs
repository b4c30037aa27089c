//! Fundamental state coordinates.

use crate::error::{EosError, EosResult};

/// A single-phase state in the fundamental coordinates `(v, u)`.
///
/// The log-volume `vt = ln v` is carried alongside `v` so that flash iterations, which
/// step in `vt`, never have to recompute one from the other. The two are kept consistent
/// by construction: the fields are private and every constructor derives one from the
/// other.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatePoint {
    /// Specific volume [m³/kg]
    v: f64,
    /// Log of specific volume, `ln v`
    vt: f64,
    /// Specific internal energy [kJ/kg]
    u: f64,
}

impl StatePoint {
    /// Build from specific volume and internal energy.
    pub fn from_volume(v: f64, u: f64) -> Self {
        Self { v, vt: v.ln(), u }
    }

    /// Build from log-volume and internal energy.
    pub fn from_transformed(vt: f64, u: f64) -> Self {
        Self { v: vt.exp(), vt, u }
    }

    /// Build from volume and internal energy, rejecting non-finite or non-positive volume.
    pub fn checked(v: f64, u: f64) -> EosResult<Self> {
        if !v.is_finite() || !u.is_finite() {
            return Err(EosError::InvalidArg {
                what: "state point coordinates must be finite",
            });
        }
        if v <= 0.0 {
            return Err(EosError::OutOfRange {
                what: "specific volume must be positive",
            });
        }
        Ok(Self::from_volume(v, u))
    }

    /// Specific volume [m³/kg].
    #[inline]
    pub fn v(&self) -> f64 {
        self.v
    }

    /// Log of specific volume.
    #[inline]
    pub fn vt(&self) -> f64 {
        self.vt
    }

    /// Specific internal energy [kJ/kg].
    #[inline]
    pub fn u(&self) -> f64 {
        self.u
    }

    /// Density [kg/m³].
    #[inline]
    pub fn density(&self) -> f64 {
        1.0 / self.v
    }

    pub fn is_finite(&self) -> bool {
        self.v.is_finite() && self.vt.is_finite() && self.u.is_finite()
    }

    /// Same volume, different internal energy.
    pub fn with_u(&self, u: f64) -> Self {
        Self { u, ..*self }
    }

    /// Move by `(dvt, du)` in transformed coordinates.
    pub fn step_transformed(&self, dvt: f64, du: f64) -> Self {
        Self::from_transformed(self.vt + dvt, self.u + du)
    }
}
