//! 2×2 Jacobians and finite-difference helpers.

use nalgebra::{Matrix2, Vector2};
use nf_eos::PropertyDerivatives;

/// Jacobian of two target properties with respect to `(vt, u)` (or `(v, u)`).
///
/// Row `i` holds the derivatives of target `i`; column 0 is the volume coordinate,
/// column 1 is internal energy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jacobian2(Matrix2<f64>);

impl Jacobian2 {
    pub fn from_rows(first: [f64; 2], second: [f64; 2]) -> Self {
        Self(Matrix2::new(first[0], first[1], second[0], second[1]))
    }

    /// Rows from two oracle results taken in the same coordinates.
    pub fn from_derivatives(first: &PropertyDerivatives, second: &PropertyDerivatives) -> Self {
        Self::from_rows([first.d_dvol, first.d_du], [second.d_dvol, second.d_du])
    }

    pub fn matrix(&self) -> &Matrix2<f64> {
        &self.0
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)]
    }

    /// Solve `J·Δ = -f` by Cramer's rule.
    ///
    /// Returns `None` when the determinant is zero or not finite.
    pub fn newton_step(&self, residual: &Vector2<f64>) -> Option<Vector2<f64>> {
        let den = self.determinant();
        if den == 0.0 || !den.is_finite() {
            return None;
        }
        let m = &self.0;
        let (f0, f1) = (residual[0], residual[1]);
        Some(Vector2::new(
            (-m[(1, 1)] * f0 + f1 * m[(0, 1)]) / den,
            (-f1 * m[(0, 0)] + m[(1, 0)] * f0) / den,
        ))
    }
}

/// Central difference `df/dx` with a step relative to `|x|` (at least `rel_step`).
pub fn central_difference<F, E>(f: F, x: f64, rel_step: f64) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E>,
{
    let dx = rel_step * x.abs().max(1.0);
    let f_plus = f(x + dx)?;
    let f_minus = f(x - dx)?;
    Ok((f_plus - f_minus) / (2.0 * dx))
}

/// Central-difference Jacobian of a two-output function of two inputs.
///
/// Column `j` holds the derivatives with respect to input `j`; steps are relative to
/// each input as in [`central_difference`].
pub fn central_difference_jacobian<F, E>(
    f: F,
    x: Vector2<f64>,
    rel_step: f64,
) -> Result<Matrix2<f64>, E>
where
    F: Fn(Vector2<f64>) -> Result<Vector2<f64>, E>,
{
    let mut jac = Matrix2::zeros();
    for j in 0..2 {
        let dx = rel_step * x[j].abs().max(1.0);

        let mut x_plus = x;
        x_plus[j] += dx;
        let f_plus = f(x_plus)?;

        let mut x_minus = x;
        x_minus[j] -= dx;
        let f_minus = f(x_minus)?;

        let df = (f_plus - f_minus) / (2.0 * dx);
        for i in 0..2 {
            jac[(i, j)] = df[i];
        }
    }
    Ok(jac)
}
