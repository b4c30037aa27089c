//! Flash variants and their shared types.

pub mod hs;
pub mod ph;
pub mod ps;
pub mod pt;
pub mod vh;
pub mod volume;

use crate::derivatives::Property;
use crate::error::{FlashError, FlashResult};
use nf_core::ensure_finite;
use nf_eos::{EquationOfState, InitialGuess, NativeProperty, StatePoint};
use std::fmt;
use tracing::debug;

/// Which pair of properties a flash solves for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlashKind {
    PressureTemperature,
    PressureEnthalpy,
    PressureEntropy,
    EnthalpyEntropy,
    VolumeEnthalpy,
    TemperatureVolume,
    PressureVolume,
}

impl FlashKind {
    pub const ALL: [FlashKind; 7] = [
        FlashKind::PressureTemperature,
        FlashKind::PressureEnthalpy,
        FlashKind::PressureEntropy,
        FlashKind::EnthalpyEntropy,
        FlashKind::VolumeEnthalpy,
        FlashKind::TemperatureVolume,
        FlashKind::PressureVolume,
    ];

    /// The two target properties, in argument order.
    pub fn targets(self) -> [Property; 2] {
        match self {
            FlashKind::PressureTemperature => [Property::Pressure, Property::Temperature],
            FlashKind::PressureEnthalpy => [Property::Pressure, Property::Enthalpy],
            FlashKind::PressureEntropy => [Property::Pressure, Property::Entropy],
            FlashKind::EnthalpyEntropy => [Property::Enthalpy, Property::Entropy],
            FlashKind::VolumeEnthalpy => [Property::Volume, Property::Enthalpy],
            FlashKind::TemperatureVolume => [Property::Temperature, Property::Volume],
            FlashKind::PressureVolume => [Property::Pressure, Property::Volume],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlashKind::PressureTemperature => "p-T",
            FlashKind::PressureEnthalpy => "p-h",
            FlashKind::PressureEntropy => "p-s",
            FlashKind::EnthalpyEntropy => "h-s",
            FlashKind::VolumeEnthalpy => "v-h",
            FlashKind::TemperatureVolume => "T-v",
            FlashKind::PressureVolume => "p-v",
        }
    }
}

impl fmt::Display for FlashKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Target pair for [`flash`], in oracle units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlashInput {
    /// Pressure [MPa], temperature [K]
    PressureTemperature { p: f64, t: f64 },
    /// Pressure [MPa], enthalpy [kJ/kg]
    PressureEnthalpy { p: f64, h: f64 },
    /// Pressure [MPa], entropy [kJ/(kg·K)]
    PressureEntropy { p: f64, s: f64 },
    /// Enthalpy [kJ/kg], entropy [kJ/(kg·K)]
    EnthalpyEntropy { h: f64, s: f64 },
    /// Specific volume [m³/kg], enthalpy [kJ/kg]
    VolumeEnthalpy { v: f64, h: f64 },
    /// Temperature [K], specific volume [m³/kg]
    TemperatureVolume { t: f64, v: f64 },
    /// Pressure [MPa], specific volume [m³/kg]
    PressureVolume { p: f64, v: f64 },
}

impl FlashInput {
    pub fn kind(&self) -> FlashKind {
        match self {
            FlashInput::PressureTemperature { .. } => FlashKind::PressureTemperature,
            FlashInput::PressureEnthalpy { .. } => FlashKind::PressureEnthalpy,
            FlashInput::PressureEntropy { .. } => FlashKind::PressureEntropy,
            FlashInput::EnthalpyEntropy { .. } => FlashKind::EnthalpyEntropy,
            FlashInput::VolumeEnthalpy { .. } => FlashKind::VolumeEnthalpy,
            FlashInput::TemperatureVolume { .. } => FlashKind::TemperatureVolume,
            FlashInput::PressureVolume { .. } => FlashKind::PressureVolume,
        }
    }

    pub fn values(&self) -> [f64; 2] {
        match *self {
            FlashInput::PressureTemperature { p, t } => [p, t],
            FlashInput::PressureEnthalpy { p, h } => [p, h],
            FlashInput::PressureEntropy { p, s } => [p, s],
            FlashInput::EnthalpyEntropy { h, s } => [h, s],
            FlashInput::VolumeEnthalpy { v, h } => [v, h],
            FlashInput::TemperatureVolume { t, v } => [t, v],
            FlashInput::PressureVolume { p, v } => [p, v],
        }
    }
}

/// A converged flash.
///
/// Only the flash functions construct this, so holding one means the state reproduces
/// its targets within the variant's tolerances and is a mechanically stable gas outside
/// the model's saturation dome.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlashSolution {
    kind: FlashKind,
    point: StatePoint,
    targets: [f64; 2],
    iterations: usize,
}

impl FlashSolution {
    /// Accept a converged state only if it is gas.
    ///
    /// Rejects states with `∂p/∂v|T >= 0` and, below the critical temperature, states
    /// denser than the saturated vapour.
    pub(crate) fn gas<E>(
        eos: &E,
        kind: FlashKind,
        point: StatePoint,
        targets: [f64; 2],
        iterations: usize,
    ) -> FlashResult<Self>
    where
        E: EquationOfState + ?Sized,
    {
        let pressure = eos.diff(NativeProperty::Pressure, &point)?;
        let temperature = eos.diff(NativeProperty::Temperature, &point)?;
        let dp_dv_t = pressure.d_dvol - pressure.d_du * temperature.d_dvol / temperature.d_du;
        let saturated = eos.saturated_vapor(temperature.value)?;
        let condensed = saturated.is_some_and(|sat| point.v() < sat.volume);
        if !(dp_dv_t < 0.0) || condensed {
            debug!(
                %kind,
                v = point.v(),
                p = pressure.value,
                t = temperature.value,
                dp_dv_t,
                p_sat = saturated.map(|sat| sat.pressure),
                "converged state is not a gas"
            );
            return Err(FlashError::NotGas {
                kind,
                pressure: pressure.value,
                temperature: temperature.value,
            });
        }
        Ok(Self {
            kind,
            point,
            targets,
            iterations,
        })
    }

    pub fn kind(&self) -> FlashKind {
        self.kind
    }

    pub fn point(&self) -> &StatePoint {
        &self.point
    }

    /// Specific volume [m³/kg].
    pub fn v(&self) -> f64 {
        self.point.v()
    }

    /// Log of specific volume.
    pub fn vt(&self) -> f64 {
        self.point.vt()
    }

    /// Specific internal energy [kJ/kg].
    pub fn u(&self) -> f64 {
        self.point.u()
    }

    /// Target values the flash was solved for.
    pub fn targets(&self) -> [f64; 2] {
        self.targets
    }

    /// Newton iterations taken.
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Run the flash matching `input`.
pub fn flash<E, G>(eos: &E, guess: &G, input: FlashInput) -> FlashResult<FlashSolution>
where
    E: EquationOfState + ?Sized,
    G: InitialGuess + ?Sized,
{
    match input {
        FlashInput::PressureTemperature { p, t } => pt::flash_pt(eos, guess, p, t),
        FlashInput::PressureEnthalpy { p, h } => ph::flash_ph(eos, guess, p, h),
        FlashInput::PressureEntropy { p, s } => ps::flash_ps(eos, guess, p, s),
        FlashInput::EnthalpyEntropy { h, s } => hs::flash_hs(eos, guess, h, s),
        FlashInput::VolumeEnthalpy { v, h } => vh::flash_vh(eos, guess, v, h),
        FlashInput::TemperatureVolume { t, v } => volume::flash_tv(eos, guess, t, v),
        FlashInput::PressureVolume { p, v } => volume::flash_pv(eos, guess, p, v),
    }
}

/// Reject non-finite targets before iterating.
fn check_targets(kind: FlashKind, first: f64, second: f64) -> FlashResult<()> {
    let [a, b] = kind.targets();
    ensure_finite(first, a.symbol())?;
    ensure_finite(second, b.symbol())?;
    Ok(())
}
