//! Parallel sweep execution.
//!
//! One input of a [`FluidInputPair`] follows a [`SweepDefinition`] while the other is
//! held fixed. Points are independent and are evaluated on the rayon thread pool; a
//! point that fails to converge is recorded as `None` rather than aborting the sweep.

use crate::calculator::{EquilibriumState, FluidInputPair, compute_equilibrium_state};
use crate::nitrogen::NitrogenProperties;
use crate::sweeps::SweepDefinition;
use nf_eos::{EquationOfState, InitialGuess};
use rayon::prelude::*;
use tracing::{debug, info};

/// Which input of the pair is swept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SweptInput {
    First,
    Second,
}

/// Result of a property sweep.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SweepResult {
    /// Input pair used for calculations
    pub input_pair: FluidInputPair,
    pub swept: SweptInput,
    /// Value of the input held fixed (SI units)
    pub fixed_value: f64,
    /// Swept input values
    pub independent_values: Vec<f64>,
    /// Computed states (`None` for failed points)
    pub states: Vec<Option<EquilibriumState>>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    fn collect<F>(&self, f: F) -> Vec<f64>
    where
        F: Fn(&EquilibriumState) -> f64,
    {
        self.states.iter().filter_map(|s| s.as_ref().map(&f)).collect()
    }

    /// Pressure array (excluding failed points)
    pub fn pressure_pa(&self) -> Vec<f64> {
        self.collect(EquilibriumState::pressure_pa)
    }

    /// Temperature array (excluding failed points)
    pub fn temperature_k(&self) -> Vec<f64> {
        self.collect(EquilibriumState::temperature_k)
    }

    /// Density array (excluding failed points)
    pub fn density_kg_m3(&self) -> Vec<f64> {
        self.collect(EquilibriumState::density_kg_m3)
    }

    pub fn enthalpy_j_per_kg(&self) -> Vec<f64> {
        self.collect(|s| s.enthalpy_j_per_kg)
    }

    pub fn entropy_j_per_kg_k(&self) -> Vec<f64> {
        self.collect(|s| s.entropy_j_per_kg_k)
    }

    /// Independent values corresponding to successful states
    pub fn successful_independent_values(&self) -> Vec<f64> {
        self.independent_values
            .iter()
            .zip(&self.states)
            .filter_map(|(val, state)| state.as_ref().map(|_| *val))
            .collect()
    }
}

/// Evaluate `pair` along `sweep` with the other input fixed at `fixed_value`.
pub fn execute_sweep<E, G>(
    props: &NitrogenProperties<E, G>,
    pair: FluidInputPair,
    swept: SweptInput,
    sweep: &SweepDefinition,
    fixed_value: f64,
) -> SweepResult
where
    E: EquationOfState,
    G: InitialGuess,
{
    let independent_values = sweep.generate_points();

    let states: Vec<Option<EquilibriumState>> = independent_values
        .par_iter()
        .map(|&x| {
            let (first, second) = match swept {
                SweptInput::First => (x, fixed_value),
                SweptInput::Second => (fixed_value, x),
            };
            match compute_equilibrium_state(props, pair, first, second) {
                Ok(state) => Some(state),
                Err(e) => {
                    debug!(pair = pair.label(), first, second, error = %e, "sweep point failed");
                    None
                }
            }
        })
        .collect();

    let num_successful = states.iter().filter(|s| s.is_some()).count();
    let num_failed = states.len() - num_successful;
    info!(
        pair = pair.label(),
        points = states.len(),
        num_failed,
        "sweep finished"
    );

    SweepResult {
        input_pair: pair,
        swept,
        fixed_value,
        independent_values,
        states,
        num_successful,
        num_failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sweeps::SweepType;

    #[test]
    fn temperature_sweep_at_pressure() {
        let props = NitrogenProperties::nitrogen();
        let sweep = SweepDefinition::new(250.0, 350.0, 10, SweepType::Linear).unwrap();

        let result =
            execute_sweep(&props, FluidInputPair::PT, SweptInput::Second, &sweep, 101_325.0);

        assert_eq!(result.independent_values.len(), 10);
        assert_eq!(result.num_successful, 10);
        assert!(result.pressure_pa().iter().all(|&p| (p - 101_325.0).abs() < 1e-4));
        for (t, expected) in result.temperature_k().iter().zip(&result.independent_values) {
            assert!((t - expected).abs() < 1e-8);
        }
    }

    #[test]
    fn pressure_sweep_keeps_order() {
        let props = NitrogenProperties::nitrogen();
        let sweep = SweepDefinition::new(1e5, 1e7, 9, SweepType::Logarithmic).unwrap();

        let result = execute_sweep(&props, FluidInputPair::PT, SweptInput::First, &sweep, 300.0);

        assert_eq!(result.num_failed, 0);
        let rho = result.density_kg_m3();
        assert!(rho.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn failed_points_are_recorded() {
        let props = NitrogenProperties::nitrogen();
        let sweep = SweepDefinition::new(-100.0, 300.0, 5, SweepType::Linear).unwrap();

        let result = execute_sweep(&props, FluidInputPair::PT, SweptInput::Second, &sweep, 1e5);

        assert_eq!(result.states.len(), 5);
        assert!(result.states[0].is_none());
        assert!(result.states[4].is_some());
        assert_eq!(result.num_successful + result.num_failed, 5);
        assert_eq!(
            result.successful_independent_values().len(),
            result.num_successful
        );
    }
}
