//! Equation-of-state oracle contract.

use crate::enthalpy;
use crate::error::EosResult;
use crate::state::StatePoint;
use std::fmt;

/// Properties an oracle evaluates directly from `(v, u)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NativeProperty {
    /// Pressure [MPa]
    Pressure,
    /// Temperature [K]
    Temperature,
    /// Specific entropy [kJ/(kg·K)]
    Entropy,
}

impl NativeProperty {
    pub fn label(self) -> &'static str {
        match self {
            NativeProperty::Pressure => "pressure",
            NativeProperty::Temperature => "temperature",
            NativeProperty::Entropy => "entropy",
        }
    }
}

impl fmt::Display for NativeProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Value of a property and its first derivatives at a state.
///
/// `d_dvol` is taken with respect to whichever volume coordinate the oracle was called
/// in: `v` for [`EquationOfState::diff`], `vt = ln v` for
/// [`EquationOfState::diff_transformed`]. `du_dvol` is the slope of the iso-line of this
/// property in the same coordinates, `-d_dvol / d_du`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyDerivatives {
    pub value: f64,
    /// ∂x/∂v at constant u (or ∂x/∂vt)
    pub d_dvol: f64,
    /// ∂x/∂u at constant v
    pub d_du: f64,
    /// ∂u/∂v at constant x (or ∂u/∂vt)
    pub du_dvol: f64,
}

impl PropertyDerivatives {
    pub fn new(value: f64, d_dvol: f64, d_du: f64) -> Self {
        Self {
            value,
            d_dvol,
            d_du,
            du_dvol: -d_dvol / d_du,
        }
    }

    /// Convert volume derivatives from `v` to `vt = ln v` at volume `v`.
    ///
    /// Uses `∂/∂vt = v·∂/∂v`.
    pub fn to_transformed(self, v: f64) -> Self {
        Self {
            value: self.value,
            d_dvol: self.d_dvol * v,
            d_du: self.d_du,
            du_dvol: self.du_dvol * v,
        }
    }

    /// Convert volume derivatives from `vt` back to `v` at volume `v`.
    pub fn to_natural(self, v: f64) -> Self {
        Self {
            value: self.value,
            d_dvol: self.d_dvol / v,
            d_du: self.d_du,
            du_dvol: self.du_dvol / v,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.value.is_finite() && self.d_dvol.is_finite() && self.d_du.is_finite()
    }
}

/// Saturated-vapour state on the dew line at a given temperature.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaturatedVapor {
    /// Saturation pressure [MPa]
    pub pressure: f64,
    /// Specific volume of the saturated vapour [m³/kg]
    pub volume: f64,
}

/// A thermodynamic model that evaluates native properties from `(v, u)`.
///
/// Implementations must be pure: the same inputs always give the same outputs, so a
/// single model can be shared by any number of concurrent flash calls.
pub trait EquationOfState: Send + Sync {
    /// Model name for diagnostics.
    fn name(&self) -> &str;

    /// Property value and derivatives in natural coordinates `(v, u)`.
    fn diff(&self, property: NativeProperty, point: &StatePoint) -> EosResult<PropertyDerivatives>;

    /// Property value and derivatives in transformed coordinates `(vt, u)`.
    fn diff_transformed(
        &self,
        property: NativeProperty,
        point: &StatePoint,
    ) -> EosResult<PropertyDerivatives> {
        Ok(self.diff(property, point)?.to_transformed(point.v()))
    }

    /// Property value only.
    fn value(&self, property: NativeProperty, point: &StatePoint) -> EosResult<f64> {
        Ok(self.diff(property, point)?.value)
    }

    /// Saturated vapour at temperature `t` [K].
    ///
    /// `None` when the model has no two-phase region at `t` (supercritical, or no
    /// dome at all). Gas states at `t` must have a volume of at least `volume`.
    fn saturated_vapor(&self, _t: f64) -> EosResult<Option<SaturatedVapor>> {
        Ok(None)
    }

    /// Enthalpy [kJ/kg] with derivatives in natural coordinates.
    fn enthalpy_diff(&self, point: &StatePoint) -> EosResult<PropertyDerivatives> {
        let p = self.diff(NativeProperty::Pressure, point)?;
        Ok(enthalpy::enthalpy_derivatives(&p, point))
    }

    /// Enthalpy [kJ/kg] with derivatives in transformed coordinates.
    fn enthalpy_diff_transformed(&self, point: &StatePoint) -> EosResult<PropertyDerivatives> {
        let p = self.diff_transformed(NativeProperty::Pressure, point)?;
        Ok(enthalpy::enthalpy_derivatives_transformed(&p, point))
    }
}

impl<T: EquationOfState + ?Sized> EquationOfState for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn diff(&self, property: NativeProperty, point: &StatePoint) -> EosResult<PropertyDerivatives> {
        (**self).diff(property, point)
    }

    fn diff_transformed(
        &self,
        property: NativeProperty,
        point: &StatePoint,
    ) -> EosResult<PropertyDerivatives> {
        (**self).diff_transformed(property, point)
    }

    fn saturated_vapor(&self, t: f64) -> EosResult<Option<SaturatedVapor>> {
        (**self).saturated_vapor(t)
    }
}
