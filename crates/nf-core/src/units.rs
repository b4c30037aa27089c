// nf-core/src/units.rs

use uom::si::f64::{
    MassDensity as UomMassDensity, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Velocity as UomVelocity,
};

// Public canonical unit types (SI, f64)
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn m_per_s(v: f64) -> Velocity {
    use uom::si::velocity::meter_per_second;
    Velocity::new::<meter_per_second>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

/// Units of the equation-of-state oracle.
///
/// Pressure is in MPa, energies in kJ/kg, entropy in kJ/(kg·K), temperature in K
/// and specific volume in m³/kg.
pub mod oracle {
    /// Pa per MPa.
    pub const PA_PER_MPA: f64 = 1.0e6;

    /// J per kJ.
    pub const J_PER_KJ: f64 = 1.0e3;

    /// Converts `p·v` in MPa·m³/kg to kJ/kg.
    pub const PV_TO_KJ_PER_KG: f64 = 1.0e3;
}
