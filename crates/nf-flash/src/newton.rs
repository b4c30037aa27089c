//! Newton driver shared by the flash variants.
//!
//! Each iteration evaluates the targets at the current point, takes a full Newton step
//! and applies it. Convergence is judged on the residuals at the point the step was
//! taken from, so the returned state is one step past the first point that met every
//! tolerance. There is no damping, line search or restart: a failed flash is returned
//! to the caller as is.

use crate::error::{FlashError, FlashResult};
use crate::flash::FlashKind;
use crate::jacobian::Jacobian2;
use nalgebra::Vector2;
use nf_eos::{PropertyDerivatives, StatePoint};
use tracing::{debug, trace};

/// Iteration cap. A flash fails once its counter has passed this value.
pub const MAX_ITERATIONS: usize = 10;

/// Tolerance on a single target property.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Criterion {
    /// `|residual| < tol`
    Absolute(f64),
    /// `|residual| < tol·|target|`
    Relative(f64),
}

impl Criterion {
    pub fn is_met(self, residual: f64, target: f64) -> bool {
        match self {
            Criterion::Absolute(tol) => residual.abs() < tol,
            Criterion::Relative(tol) => residual.abs() < tol * target.abs(),
        }
    }
}

/// Bounded iteration counter.
#[derive(Debug, Default)]
struct IterationBudget {
    count: usize,
}

impl IterationBudget {
    /// Consume one iteration; `false` once the counter had already passed the cap.
    fn tick(&mut self) -> bool {
        let exhausted = self.count > MAX_ITERATIONS;
        self.count += 1;
        !exhausted
    }

    fn count(&self) -> usize {
        self.count
    }
}

/// Target values and Jacobian at one point of a two-equation flash.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Evaluation2 {
    pub values: Vector2<f64>,
    pub jacobian: Jacobian2,
}

impl Evaluation2 {
    pub fn new(first: &PropertyDerivatives, second: &PropertyDerivatives) -> Self {
        Self {
            values: Vector2::new(first.value, second.value),
            jacobian: Jacobian2::from_derivatives(first, second),
        }
    }
}

/// Converged state and the number of iterations it took.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Converged<T> {
    pub state: T,
    pub iterations: usize,
}

/// Two-equation Newton iteration in `(vt, u)`.
pub(crate) fn solve_2d<F>(
    kind: FlashKind,
    start: StatePoint,
    targets: [f64; 2],
    criteria: [Criterion; 2],
    mut evaluate: F,
) -> FlashResult<Converged<StatePoint>>
where
    F: FnMut(&StatePoint) -> FlashResult<Evaluation2>,
{
    let target = Vector2::new(targets[0], targets[1]);
    let mut budget = IterationBudget::default();
    let mut point = start;

    loop {
        let eval = evaluate(&point)
            .inspect_err(|e| debug!(%kind, error = %e, "flash evaluation failed"))?;
        let residual = eval.values - target;

        let Some(step) = eval.jacobian.newton_step(&residual) else {
            let determinant = eval.jacobian.determinant();
            debug!(%kind, determinant, iteration = budget.count(), "flash jacobian singular");
            return Err(FlashError::IllConditioned {
                kind,
                determinant,
                iteration: budget.count(),
            });
        };
        let next = point.step_transformed(step[0], step[1]);

        trace!(
            %kind,
            iteration = budget.count(),
            r0 = residual[0],
            r1 = residual[1],
            "newton step"
        );

        if !budget.tick() {
            debug!(%kind, iterations = budget.count(), "flash iteration cap exceeded");
            return Err(FlashError::NonConvergence {
                kind,
                iterations: budget.count(),
            });
        }

        let converged = criteria[0].is_met(residual[0], targets[0])
            && criteria[1].is_met(residual[1], targets[1]);
        if converged {
            debug!(%kind, iterations = budget.count(), "flash converged");
            return Ok(Converged {
                state: next,
                iterations: budget.count(),
            });
        }

        point = next;
    }
}

/// One-equation Newton iteration in `u` at fixed volume.
pub(crate) fn solve_1d<F>(
    kind: FlashKind,
    start: f64,
    target: f64,
    criterion: Criterion,
    mut evaluate: F,
) -> FlashResult<Converged<f64>>
where
    F: FnMut(f64) -> FlashResult<(f64, f64)>,
{
    let mut budget = IterationBudget::default();
    let mut u = start;

    loop {
        let (value, slope) =
            evaluate(u).inspect_err(|e| debug!(%kind, error = %e, "flash evaluation failed"))?;
        let residual = value - target;

        if slope == 0.0 || !slope.is_finite() {
            debug!(%kind, slope, iteration = budget.count(), "flash derivative singular");
            return Err(FlashError::IllConditioned {
                kind,
                determinant: slope,
                iteration: budget.count(),
            });
        }
        let next = u - residual / slope;

        trace!(%kind, iteration = budget.count(), r0 = residual, "newton step");

        if !budget.tick() {
            debug!(%kind, iterations = budget.count(), "flash iteration cap exceeded");
            return Err(FlashError::NonConvergence {
                kind,
                iterations: budget.count(),
            });
        }

        if criterion.is_met(residual, target) {
            debug!(%kind, iterations = budget.count(), "flash converged");
            return Ok(Converged {
                state: next,
                iterations: budget.count(),
            });
        }

        u = next;
    }
}
