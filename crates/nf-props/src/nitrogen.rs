//! Nitrogen properties in SI units.
//!
//! Every `x_from_a_b` method returns `x` given `a` and `b`; the matching
//! `x_from_a_b_with_derivatives` also returns `∂x/∂a|b` and `∂x/∂b|a` as a [`Partials`].
//! Units: Pa, K, J/kg, J/(kg·K), m³/kg, kg/m³, m/s.
//!
//! Properties of the flash pairs come from a single flash plus derivative propagation.
//! Caloric and acoustic properties (`cv`, `cp`, `c`, `beta`) are already first
//! derivatives of the equation of state; their own derivatives are taken by central
//! differences.

use crate::error::{PropsError, PropsResult};
use nf_core::ensure_finite;
use nf_core::units::oracle::{J_PER_KJ, PA_PER_MPA};
use nf_eos::{
    CoolPropNitrogen, EosError, EquationOfState, IdealGasGuess, InitialGuess, MOLAR_MASS_N2,
    StatePoint, VanDerWaals,
};
use nf_flash::jacobian::central_difference;
use nf_flash::{
    Differential, Linearization, Partials, Property, flash_hs, flash_ph, flash_ps, flash_pt,
    flash_pv, flash_tv, flash_vh,
};

/// Relative step for central differences of caloric properties.
const FD_STEP: f64 = 1e-6;

/// Oracle-to-SI factor for a property.
fn si_scale(property: Property) -> f64 {
    match property {
        Property::Pressure => PA_PER_MPA,
        Property::Energy | Property::Enthalpy | Property::Entropy => J_PER_KJ,
        Property::Volume | Property::Density | Property::Temperature => 1.0,
    }
}

/// SI property facade over an equation of state and an initial guess.
#[derive(Clone, Debug)]
pub struct NitrogenProperties<E = CoolPropNitrogen, G = IdealGasGuess> {
    eos: E,
    guess: G,
}

impl NitrogenProperties {
    /// CoolProp nitrogen with the ideal-gas initial guess.
    pub fn nitrogen() -> Self {
        Self::new(CoolPropNitrogen, IdealGasGuess::nitrogen())
    }
}

impl NitrogenProperties<VanDerWaals> {
    /// Closed-form van der Waals nitrogen.
    pub fn van_der_waals() -> Self {
        Self::new(VanDerWaals::nitrogen(), IdealGasGuess::nitrogen())
    }

    /// Calorically perfect ideal-gas nitrogen.
    pub fn ideal_gas() -> Self {
        Self::new(VanDerWaals::ideal_nitrogen(), IdealGasGuess::nitrogen())
    }
}

impl Default for NitrogenProperties {
    fn default() -> Self {
        Self::nitrogen()
    }
}

impl<E, G> NitrogenProperties<E, G>
where
    E: EquationOfState,
    G: InitialGuess,
{
    pub fn new(eos: E, guess: G) -> Self {
        Self { eos, guess }
    }

    pub fn eos(&self) -> &E {
        &self.eos
    }

    pub fn guess(&self) -> &G {
        &self.guess
    }

    /// Molar mass [kg/mol].
    pub fn molar_mass(&self) -> f64 {
        MOLAR_MASS_N2 / 1000.0
    }

    /// Resolve the state at `first = a`, `second = b` (SI units).
    ///
    /// `(v, e)` is evaluated directly; every other supported pair runs one flash.
    pub fn state(
        &self,
        first: Property,
        a: f64,
        second: Property,
        b: f64,
    ) -> PropsResult<StatePoint> {
        use Property::*;
        let a = ensure_finite(a, first.symbol())? / si_scale(first);
        let b = ensure_finite(b, second.symbol())? / si_scale(second);
        let (eos, guess) = (&self.eos, &self.guess);

        let solution = match (first, second) {
            (Volume, Energy) => return Ok(StatePoint::checked(a, b)?),
            (Pressure, Temperature) => flash_pt(eos, guess, a, b)?,
            (Pressure, Enthalpy) => flash_ph(eos, guess, a, b)?,
            (Enthalpy, Pressure) => flash_ph(eos, guess, b, a)?,
            (Pressure, Entropy) => flash_ps(eos, guess, a, b)?,
            (Enthalpy, Entropy) => flash_hs(eos, guess, a, b)?,
            (Volume, Enthalpy) => flash_vh(eos, guess, a, b)?,
            (Density, Enthalpy) => flash_vh(eos, guess, 1.0 / a, b)?,
            (Temperature, Volume) => flash_tv(eos, guess, a, b)?,
            (Pressure, Volume) => flash_pv(eos, guess, a, b)?,
            (Pressure, Density) => flash_pv(eos, guess, a, 1.0 / b)?,
            _ => return Err(PropsError::UnsupportedPair { first, second }),
        };
        Ok(*solution.point())
    }

    /// Property `of` (SI) at `first = a`, `second = b`.
    pub fn property(
        &self,
        first: Property,
        a: f64,
        second: Property,
        b: f64,
        of: Property,
    ) -> PropsResult<f64> {
        let point = self.state(first, a, second, b)?;
        self.value_at(&point, of)
    }

    /// Property `of` (SI) at a resolved state.
    pub fn value_at(&self, point: &StatePoint, of: Property) -> PropsResult<f64> {
        let value = Differential::of(&self.eos, point, of)?.value * si_scale(of);
        Ok(ensure_finite(value, of.symbol())?)
    }

    /// Property `of` (SI) and its partials with respect to `first` and `second`.
    pub fn property_with_derivatives(
        &self,
        first: Property,
        a: f64,
        second: Property,
        b: f64,
        of: Property,
    ) -> PropsResult<Partials> {
        let point = self.state(first, a, second, b)?;
        let z = Linearization::at(&self.eos, &point, first, second)?.partials_of(
            &self.eos,
            &point,
            of,
        )?;
        let scale = si_scale(of);
        Ok(Partials {
            value: ensure_finite(z.value * scale, of.symbol())?,
            d_first: z.d_first * scale / si_scale(first),
            d_second: z.d_second * scale / si_scale(second),
        })
    }

    /// Gibbs free energy [J/kg], `g = h - T·s`, with partials in `(first, second)`.
    pub fn gibbs_with_derivatives(
        &self,
        first: Property,
        a: f64,
        second: Property,
        b: f64,
    ) -> PropsResult<Partials> {
        let h = self.property_with_derivatives(first, a, second, b, Property::Enthalpy)?;
        let t = self.property_with_derivatives(first, a, second, b, Property::Temperature)?;
        let s = self.property_with_derivatives(first, a, second, b, Property::Entropy)?;
        Ok(Partials {
            value: ensure_finite(h.value - t.value * s.value, "g")?,
            d_first: h.d_first - t.d_first * s.value - t.value * s.d_first,
            d_second: h.d_second - t.d_second * s.value - t.value * s.d_second,
        })
    }

    /// Isochoric heat capacity [J/(kg·K)], `(∂u/∂T)_v`.
    pub fn cv_at(&self, point: &StatePoint) -> PropsResult<f64> {
        let t = Differential::of(&self.eos, point, Property::Temperature)?;
        Ok(ensure_finite(J_PER_KJ / t.d_du, "cv")?)
    }

    /// Isobaric heat capacity [J/(kg·K)], `(∂h/∂T)_p`.
    pub fn cp_at(&self, point: &StatePoint) -> PropsResult<f64> {
        let h = Linearization::at(&self.eos, point, Property::Temperature, Property::Pressure)?
            .partials_of(&self.eos, point, Property::Enthalpy)?;
        Ok(ensure_finite(h.d_first * J_PER_KJ, "cp")?)
    }

    /// Speed of sound [m/s], `c² = -v²·(∂p/∂v)_s`.
    pub fn c_at(&self, point: &StatePoint) -> PropsResult<f64> {
        let v = Linearization::at(&self.eos, point, Property::Pressure, Property::Entropy)?
            .partials_of(&self.eos, point, Property::Volume)?;
        let dv_dp_s = v.d_first / PA_PER_MPA;
        if !(dv_dp_s < 0.0) {
            return Err(EosError::NonPhysical {
                what: "isentropic compressibility must be positive",
            }
            .into());
        }
        Ok(ensure_finite((-v.value * v.value / dv_dp_s).sqrt(), "c")?)
    }

    /// Volumetric thermal expansion coefficient [1/K], `(1/v)·(∂v/∂T)_p`.
    pub fn beta_at(&self, point: &StatePoint) -> PropsResult<f64> {
        let v = Linearization::at(&self.eos, point, Property::Pressure, Property::Temperature)?
            .partials_of(&self.eos, point, Property::Volume)?;
        Ok(ensure_finite(v.d_second / v.value, "beta")?)
    }

    fn caloric<F>(
        &self,
        first: Property,
        a: f64,
        second: Property,
        b: f64,
        f: F,
    ) -> PropsResult<f64>
    where
        F: Fn(&Self, &StatePoint) -> PropsResult<f64>,
    {
        let point = self.state(first, a, second, b)?;
        f(self, &point)
    }

    fn caloric_with_derivatives<F>(
        &self,
        first: Property,
        a: f64,
        second: Property,
        b: f64,
        f: F,
    ) -> PropsResult<Partials>
    where
        F: Fn(&Self, &StatePoint) -> PropsResult<f64>,
    {
        let at = |x: f64, y: f64| self.caloric(first, x, second, y, &f);
        Ok(Partials {
            value: at(a, b)?,
            d_first: central_difference(|x| at(x, b), a, FD_STEP)?,
            d_second: central_difference(|y| at(a, y), b, FD_STEP)?,
        })
    }

    // (v, e)

    /// Pressure [Pa] from specific volume [m³/kg] and internal energy [J/kg].
    pub fn p_from_v_e(&self, v: f64, e: f64) -> PropsResult<f64> {
        self.property(Property::Volume, v, Property::Energy, e, Property::Pressure)
    }

    pub fn p_from_v_e_with_derivatives(&self, v: f64, e: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(Property::Volume, v, Property::Energy, e, Property::Pressure)
    }

    /// Temperature [K] from specific volume [m³/kg] and internal energy [J/kg].
    pub fn t_from_v_e(&self, v: f64, e: f64) -> PropsResult<f64> {
        self.property(Property::Volume, v, Property::Energy, e, Property::Temperature)
    }

    pub fn t_from_v_e_with_derivatives(&self, v: f64, e: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Volume,
            v,
            Property::Energy,
            e,
            Property::Temperature,
        )
    }

    /// Entropy [J/(kg·K)] from specific volume [m³/kg] and internal energy [J/kg].
    pub fn s_from_v_e(&self, v: f64, e: f64) -> PropsResult<f64> {
        self.property(Property::Volume, v, Property::Energy, e, Property::Entropy)
    }

    pub fn s_from_v_e_with_derivatives(&self, v: f64, e: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(Property::Volume, v, Property::Energy, e, Property::Entropy)
    }

    /// Enthalpy [J/kg] from specific volume [m³/kg] and internal energy [J/kg].
    pub fn h_from_v_e(&self, v: f64, e: f64) -> PropsResult<f64> {
        self.property(Property::Volume, v, Property::Energy, e, Property::Enthalpy)
    }

    pub fn h_from_v_e_with_derivatives(&self, v: f64, e: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(Property::Volume, v, Property::Energy, e, Property::Enthalpy)
    }

    /// Isochoric heat capacity [J/(kg·K)].
    pub fn cv_from_v_e(&self, v: f64, e: f64) -> PropsResult<f64> {
        self.caloric(Property::Volume, v, Property::Energy, e, Self::cv_at)
    }

    pub fn cv_from_v_e_with_derivatives(&self, v: f64, e: f64) -> PropsResult<Partials> {
        self.caloric_with_derivatives(Property::Volume, v, Property::Energy, e, Self::cv_at)
    }

    /// Isobaric heat capacity [J/(kg·K)].
    pub fn cp_from_v_e(&self, v: f64, e: f64) -> PropsResult<f64> {
        self.caloric(Property::Volume, v, Property::Energy, e, Self::cp_at)
    }

    pub fn cp_from_v_e_with_derivatives(&self, v: f64, e: f64) -> PropsResult<Partials> {
        self.caloric_with_derivatives(Property::Volume, v, Property::Energy, e, Self::cp_at)
    }

    /// Speed of sound [m/s].
    pub fn c_from_v_e(&self, v: f64, e: f64) -> PropsResult<f64> {
        self.caloric(Property::Volume, v, Property::Energy, e, Self::c_at)
    }

    pub fn c_from_v_e_with_derivatives(&self, v: f64, e: f64) -> PropsResult<Partials> {
        self.caloric_with_derivatives(Property::Volume, v, Property::Energy, e, Self::c_at)
    }

    /// Gibbs free energy [J/kg] from specific volume [m³/kg] and internal energy [J/kg].
    pub fn g_from_v_e(&self, v: f64, e: f64) -> PropsResult<f64> {
        Ok(self.g_from_v_e_with_derivatives(v, e)?.value)
    }

    pub fn g_from_v_e_with_derivatives(&self, v: f64, e: f64) -> PropsResult<Partials> {
        self.gibbs_with_derivatives(Property::Volume, v, Property::Energy, e)
    }

    // (T, v)

    /// Internal energy [J/kg] from temperature [K] and specific volume [m³/kg].
    pub fn e_from_t_v(&self, t: f64, v: f64) -> PropsResult<f64> {
        self.property(Property::Temperature, t, Property::Volume, v, Property::Energy)
    }

    pub fn e_from_t_v_with_derivatives(&self, t: f64, v: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Temperature,
            t,
            Property::Volume,
            v,
            Property::Energy,
        )
    }

    /// Pressure [Pa] from temperature [K] and specific volume [m³/kg].
    pub fn p_from_t_v(&self, t: f64, v: f64) -> PropsResult<f64> {
        self.property(Property::Temperature, t, Property::Volume, v, Property::Pressure)
    }

    pub fn p_from_t_v_with_derivatives(&self, t: f64, v: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Temperature,
            t,
            Property::Volume,
            v,
            Property::Pressure,
        )
    }

    /// Enthalpy [J/kg] from temperature [K] and specific volume [m³/kg].
    pub fn h_from_t_v(&self, t: f64, v: f64) -> PropsResult<f64> {
        self.property(Property::Temperature, t, Property::Volume, v, Property::Enthalpy)
    }

    pub fn h_from_t_v_with_derivatives(&self, t: f64, v: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Temperature,
            t,
            Property::Volume,
            v,
            Property::Enthalpy,
        )
    }

    /// Entropy [J/(kg·K)] from temperature [K] and specific volume [m³/kg].
    pub fn s_from_t_v(&self, t: f64, v: f64) -> PropsResult<f64> {
        self.property(Property::Temperature, t, Property::Volume, v, Property::Entropy)
    }

    pub fn s_from_t_v_with_derivatives(&self, t: f64, v: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Temperature,
            t,
            Property::Volume,
            v,
            Property::Entropy,
        )
    }

    /// Isochoric heat capacity [J/(kg·K)] from temperature [K] and specific volume [m³/kg].
    pub fn cv_from_t_v(&self, t: f64, v: f64) -> PropsResult<f64> {
        self.caloric(Property::Temperature, t, Property::Volume, v, Self::cv_at)
    }

    pub fn cv_from_t_v_with_derivatives(&self, t: f64, v: f64) -> PropsResult<Partials> {
        self.caloric_with_derivatives(Property::Temperature, t, Property::Volume, v, Self::cv_at)
    }

    // (p, rho)

    /// Internal energy [J/kg] from pressure [Pa] and density [kg/m³].
    pub fn e_from_p_rho(&self, p: f64, rho: f64) -> PropsResult<f64> {
        self.property(Property::Pressure, p, Property::Density, rho, Property::Energy)
    }

    pub fn e_from_p_rho_with_derivatives(&self, p: f64, rho: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Pressure,
            p,
            Property::Density,
            rho,
            Property::Energy,
        )
    }

    // (p, T)

    /// Density [kg/m³] from pressure [Pa] and temperature [K].
    pub fn rho_from_p_t(&self, p: f64, t: f64) -> PropsResult<f64> {
        self.property(Property::Pressure, p, Property::Temperature, t, Property::Density)
    }

    pub fn rho_from_p_t_with_derivatives(&self, p: f64, t: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Pressure,
            p,
            Property::Temperature,
            t,
            Property::Density,
        )
    }

    /// Enthalpy [J/kg] from pressure [Pa] and temperature [K].
    pub fn h_from_p_t(&self, p: f64, t: f64) -> PropsResult<f64> {
        self.property(Property::Pressure, p, Property::Temperature, t, Property::Enthalpy)
    }

    pub fn h_from_p_t_with_derivatives(&self, p: f64, t: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Pressure,
            p,
            Property::Temperature,
            t,
            Property::Enthalpy,
        )
    }

    /// Internal energy [J/kg] from pressure [Pa] and temperature [K].
    pub fn e_from_p_t(&self, p: f64, t: f64) -> PropsResult<f64> {
        self.property(Property::Pressure, p, Property::Temperature, t, Property::Energy)
    }

    pub fn e_from_p_t_with_derivatives(&self, p: f64, t: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Pressure,
            p,
            Property::Temperature,
            t,
            Property::Energy,
        )
    }

    /// Volumetric thermal expansion coefficient [1/K].
    pub fn beta_from_p_t(&self, p: f64, t: f64) -> PropsResult<f64> {
        self.caloric(Property::Pressure, p, Property::Temperature, t, Self::beta_at)
    }

    pub fn beta_from_p_t_with_derivatives(&self, p: f64, t: f64) -> PropsResult<Partials> {
        self.caloric_with_derivatives(
            Property::Pressure,
            p,
            Property::Temperature,
            t,
            Self::beta_at,
        )
    }

    /// Isobaric heat capacity [J/(kg·K)].
    pub fn cp_from_p_t(&self, p: f64, t: f64) -> PropsResult<f64> {
        self.caloric(Property::Pressure, p, Property::Temperature, t, Self::cp_at)
    }

    pub fn cp_from_p_t_with_derivatives(&self, p: f64, t: f64) -> PropsResult<Partials> {
        self.caloric_with_derivatives(Property::Pressure, p, Property::Temperature, t, Self::cp_at)
    }

    /// Isochoric heat capacity [J/(kg·K)].
    pub fn cv_from_p_t(&self, p: f64, t: f64) -> PropsResult<f64> {
        self.caloric(Property::Pressure, p, Property::Temperature, t, Self::cv_at)
    }

    pub fn cv_from_p_t_with_derivatives(&self, p: f64, t: f64) -> PropsResult<Partials> {
        self.caloric_with_derivatives(Property::Pressure, p, Property::Temperature, t, Self::cv_at)
    }

    // Other flash pairs

    /// Density [kg/m³] from pressure [Pa] and entropy [J/(kg·K)].
    pub fn rho_from_p_s(&self, p: f64, s: f64) -> PropsResult<f64> {
        self.property(Property::Pressure, p, Property::Entropy, s, Property::Density)
    }

    pub fn rho_from_p_s_with_derivatives(&self, p: f64, s: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Pressure,
            p,
            Property::Entropy,
            s,
            Property::Density,
        )
    }

    /// Entropy [J/(kg·K)] from enthalpy [J/kg] and pressure [Pa].
    pub fn s_from_h_p(&self, h: f64, p: f64) -> PropsResult<f64> {
        self.property(Property::Enthalpy, h, Property::Pressure, p, Property::Entropy)
    }

    pub fn s_from_h_p_with_derivatives(&self, h: f64, p: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Enthalpy,
            h,
            Property::Pressure,
            p,
            Property::Entropy,
        )
    }

    /// Pressure [Pa] from enthalpy [J/kg] and entropy [J/(kg·K)].
    pub fn p_from_h_s(&self, h: f64, s: f64) -> PropsResult<f64> {
        self.property(Property::Enthalpy, h, Property::Entropy, s, Property::Pressure)
    }

    pub fn p_from_h_s_with_derivatives(&self, h: f64, s: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Enthalpy,
            h,
            Property::Entropy,
            s,
            Property::Pressure,
        )
    }

    /// Temperature [K] from enthalpy [J/kg] and entropy [J/(kg·K)].
    pub fn t_from_h_s(&self, h: f64, s: f64) -> PropsResult<f64> {
        self.property(Property::Enthalpy, h, Property::Entropy, s, Property::Temperature)
    }

    pub fn t_from_h_s_with_derivatives(&self, h: f64, s: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Enthalpy,
            h,
            Property::Entropy,
            s,
            Property::Temperature,
        )
    }

    /// Internal energy [J/kg] from specific volume [m³/kg] and enthalpy [J/kg].
    pub fn e_from_v_h(&self, v: f64, h: f64) -> PropsResult<f64> {
        self.property(Property::Volume, v, Property::Enthalpy, h, Property::Energy)
    }

    pub fn e_from_v_h_with_derivatives(&self, v: f64, h: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(Property::Volume, v, Property::Enthalpy, h, Property::Energy)
    }

    /// Temperature [K] from pressure [Pa] and enthalpy [J/kg].
    pub fn t_from_p_h(&self, p: f64, h: f64) -> PropsResult<f64> {
        self.property(Property::Pressure, p, Property::Enthalpy, h, Property::Temperature)
    }

    pub fn t_from_p_h_with_derivatives(&self, p: f64, h: f64) -> PropsResult<Partials> {
        self.property_with_derivatives(
            Property::Pressure,
            p,
            Property::Enthalpy,
            h,
            Property::Temperature,
        )
    }
}
