//! Full equilibrium state from any supported SI input pair.

use crate::{NitrogenProperties, PropsResult};
use nf_core::units::{Density, Pressure, Temperature, Velocity, k, kg_per_m3, m_per_s, pa};
use nf_eos::{EquationOfState, InitialGuess};
use nf_flash::Property;
use uom::si::{
    mass_density::kilogram_per_cubic_meter, pressure::pascal, thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FluidInputPair {
    PT,
    PH,
    PS,
    HS,
    RhoH,
}

impl FluidInputPair {
    pub const ALL: [Self; 5] = [Self::PT, Self::PH, Self::PS, Self::HS, Self::RhoH];

    pub fn label(self) -> &'static str {
        match self {
            Self::PT => "P-T",
            Self::PH => "P-h",
            Self::PS => "P-s",
            Self::HS => "h-s",
            Self::RhoH => "rho-h",
        }
    }

    pub fn first_label(self) -> &'static str {
        match self {
            Self::PT | Self::PH | Self::PS => "Pressure [Pa]",
            Self::HS => "Enthalpy [J/kg]",
            Self::RhoH => "Density [kg/m^3]",
        }
    }

    pub fn second_label(self) -> &'static str {
        match self {
            Self::PT => "Temperature [K]",
            Self::PH | Self::RhoH => "Enthalpy [J/kg]",
            Self::PS | Self::HS => "Entropy [J/(kg K)]",
        }
    }

    /// The independent properties in argument order.
    pub fn properties(self) -> (Property, Property) {
        match self {
            Self::PT => (Property::Pressure, Property::Temperature),
            Self::PH => (Property::Pressure, Property::Enthalpy),
            Self::PS => (Property::Pressure, Property::Entropy),
            Self::HS => (Property::Enthalpy, Property::Entropy),
            Self::RhoH => (Property::Density, Property::Enthalpy),
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EquilibriumState {
    pub pressure: Pressure,
    pub temperature: Temperature,
    pub density: Density,
    pub internal_energy_j_per_kg: f64,
    pub enthalpy_j_per_kg: f64,
    pub entropy_j_per_kg_k: f64,
    pub cp_j_per_kg_k: f64,
    pub cv_j_per_kg_k: f64,
    pub gamma: f64,
    pub speed_of_sound: Velocity,
    pub beta_per_k: f64,
}

impl EquilibriumState {
    pub fn pressure_pa(&self) -> f64 {
        self.pressure.get::<pascal>()
    }

    pub fn temperature_k(&self) -> f64 {
        self.temperature.get::<kelvin>()
    }

    pub fn density_kg_m3(&self) -> f64 {
        self.density.get::<kilogram_per_cubic_meter>()
    }

    pub fn speed_of_sound_m_s(&self) -> f64 {
        self.speed_of_sound.get::<meter_per_second>()
    }
}

/// Resolve `pair = (first, second)` and evaluate every state property at the result.
pub fn compute_equilibrium_state<E, G>(
    props: &NitrogenProperties<E, G>,
    pair: FluidInputPair,
    first: f64,
    second: f64,
) -> PropsResult<EquilibriumState>
where
    E: EquationOfState,
    G: InitialGuess,
{
    let (a, b) = pair.properties();
    let point = props.state(a, first, b, second)?;
    let at = |of: Property| props.value_at(&point, of);

    let cp_j_per_kg_k = props.cp_at(&point)?;
    let cv_j_per_kg_k = props.cv_at(&point)?;

    Ok(EquilibriumState {
        pressure: pa(at(Property::Pressure)?),
        temperature: k(at(Property::Temperature)?),
        density: kg_per_m3(point.density()),
        internal_energy_j_per_kg: at(Property::Energy)?,
        enthalpy_j_per_kg: at(Property::Enthalpy)?,
        entropy_j_per_kg_k: at(Property::Entropy)?,
        cp_j_per_kg_k,
        cv_j_per_kg_k,
        gamma: cp_j_per_kg_k / cv_j_per_kg_k,
        speed_of_sound: m_per_s(props.c_at(&point)?),
        beta_per_k: props.beta_at(&point)?,
    })
}
