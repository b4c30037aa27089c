//! Derivative propagation.
//!
//! At a fixed state every property `z` has a differential `dz = z_v·dv + z_u·du`. Given
//! the differentials of two independent properties `x` and `y`, inverting the 2×2
//! system for `(dv, du)` and substituting gives
//!
//! ```text
//! det      = x_v·y_u - x_u·y_v
//! ∂z/∂x|y  = (z_v·y_u - z_u·y_v) / det
//! ∂z/∂y|x  = (z_u·x_v - z_v·x_u) / det
//! ```
//!
//! No iteration is involved, and because every partial comes from the same
//! linearization the triple-product rule `∂x/∂y|z·∂y/∂z|x·∂z/∂x|y = -1` holds to
//! round-off.

use crate::error::{FlashError, FlashResult};
use crate::flash::FlashSolution;
use nf_eos::{EquationOfState, NativeProperty, PropertyDerivatives, StatePoint};
use std::fmt;

/// Any property of a single-phase state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Property {
    /// Specific volume [m³/kg]
    Volume,
    /// Density [kg/m³]
    Density,
    /// Specific internal energy [kJ/kg]
    Energy,
    /// Pressure [MPa]
    Pressure,
    /// Temperature [K]
    Temperature,
    /// Specific entropy [kJ/(kg·K)]
    Entropy,
    /// Specific enthalpy [kJ/kg]
    Enthalpy,
}

impl Property {
    pub const ALL: [Property; 7] = [
        Property::Volume,
        Property::Density,
        Property::Energy,
        Property::Pressure,
        Property::Temperature,
        Property::Entropy,
        Property::Enthalpy,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Property::Volume => "v",
            Property::Density => "rho",
            Property::Energy => "u",
            Property::Pressure => "p",
            Property::Temperature => "T",
            Property::Entropy => "s",
            Property::Enthalpy => "h",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Value and natural-coordinate derivatives `(∂/∂v|u, ∂/∂u|v)` of a property.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Differential {
    pub value: f64,
    pub d_dv: f64,
    pub d_du: f64,
}

impl Differential {
    pub fn new(value: f64, d_dv: f64, d_du: f64) -> Self {
        Self { value, d_dv, d_du }
    }

    /// Differential of `property` at `point`.
    pub fn of<E>(eos: &E, point: &StatePoint, property: Property) -> FlashResult<Self>
    where
        E: EquationOfState + ?Sized,
    {
        let v = point.v();
        let d = match property {
            Property::Volume => Self::new(v, 1.0, 0.0),
            Property::Density => Self::new(1.0 / v, -1.0 / (v * v), 0.0),
            Property::Energy => Self::new(point.u(), 0.0, 1.0),
            Property::Pressure => eos.diff(NativeProperty::Pressure, point)?.into(),
            Property::Temperature => eos.diff(NativeProperty::Temperature, point)?.into(),
            Property::Entropy => eos.diff(NativeProperty::Entropy, point)?.into(),
            Property::Enthalpy => eos.enthalpy_diff(point)?.into(),
        };
        Ok(d)
    }
}

impl From<PropertyDerivatives> for Differential {
    fn from(d: PropertyDerivatives) -> Self {
        Self::new(d.value, d.d_dvol, d.d_du)
    }
}

/// A property and its partials with respect to an independent pair `(x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partials {
    pub value: f64,
    /// ∂z/∂x at constant y
    pub d_first: f64,
    /// ∂z/∂y at constant x
    pub d_second: f64,
}

impl Partials {
    /// `∂x/∂y` at constant value of this property.
    pub fn first_per_second(&self) -> f64 {
        -self.d_second / self.d_first
    }
}

/// Linearization of the state around a point in terms of two independent properties.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Linearization {
    first: Differential,
    second: Differential,
    det: f64,
}

impl Linearization {
    /// `None` when the two differentials are linearly dependent.
    pub fn new(first: Differential, second: Differential) -> Option<Self> {
        let det = first.d_dv * second.d_du - first.d_du * second.d_dv;
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        Some(Self { first, second, det })
    }

    /// Linearize at `point` in terms of `(first, second)`.
    pub fn at<E>(
        eos: &E,
        point: &StatePoint,
        first: Property,
        second: Property,
    ) -> FlashResult<Self>
    where
        E: EquationOfState + ?Sized,
    {
        let x = Differential::of(eos, point, first)?;
        let y = Differential::of(eos, point, second)?;
        Self::new(x, y).ok_or(FlashError::DegeneratePair { first, second })
    }

    pub fn partials(&self, z: &Differential) -> Partials {
        let (x, y) = (&self.first, &self.second);
        Partials {
            value: z.value,
            d_first: (z.d_dv * y.d_du - z.d_du * y.d_dv) / self.det,
            d_second: (z.d_du * x.d_dv - z.d_dv * x.d_du) / self.det,
        }
    }

    /// Partials of `property` at the linearized point.
    pub fn partials_of<E>(
        &self,
        eos: &E,
        point: &StatePoint,
        property: Property,
    ) -> FlashResult<Partials>
    where
        E: EquationOfState + ?Sized,
    {
        Ok(self.partials(&Differential::of(eos, point, property)?))
    }
}

/// Partials of `of` with respect to `(first, second)` at a converged state.
///
/// The pair need not be the one the flash was solved for.
pub fn cross_derivatives<E>(
    eos: &E,
    solution: &FlashSolution,
    first: Property,
    second: Property,
    of: Property,
) -> FlashResult<Partials>
where
    E: EquationOfState + ?Sized,
{
    let point = solution.point();
    Linearization::at(eos, point, first, second)?.partials_of(eos, point, of)
}

/// Partials of `of` with respect to the solution's own target pair.
pub fn secondary_derivatives<E>(
    eos: &E,
    solution: &FlashSolution,
    of: Property,
) -> FlashResult<Partials>
where
    E: EquationOfState + ?Sized,
{
    let [first, second] = solution.kind().targets();
    cross_derivatives(eos, solution, first, second, of)
}
