//! Initial-guess oracles for the flash solvers.

use crate::state::StatePoint;
use crate::van_der_waals::VanDerWaalsParams;
use nf_core::units::oracle::PV_TO_KJ_PER_KG;

/// Starting points for Newton flashes, one per target pair.
///
/// A guess need not be accurate, only inside the basin of convergence. Guesses may
/// return non-finite coordinates for non-physical targets; the flash surfaces that as an
/// oracle failure on its first evaluation.
pub trait InitialGuess: Send + Sync {
    /// Guess from pressure [MPa] and temperature [K].
    fn guess_pt(&self, p: f64, t: f64) -> StatePoint;

    /// Guess from pressure [MPa] and enthalpy [kJ/kg].
    fn guess_ph(&self, p: f64, h: f64) -> StatePoint;

    /// Guess from pressure [MPa] and entropy [kJ/(kg·K)].
    fn guess_ps(&self, p: f64, s: f64) -> StatePoint;

    /// Guess from enthalpy [kJ/kg] and entropy [kJ/(kg·K)].
    fn guess_hs(&self, h: f64, s: f64) -> StatePoint;

    /// Internal energy guess [kJ/kg] at fixed log-volume for an enthalpy target.
    fn guess_u_vh(&self, vt: f64, h: f64) -> f64;

    /// Internal energy guess [kJ/kg] at fixed log-volume for a temperature target [K].
    fn guess_u_tv(&self, vt: f64, t: f64) -> f64;

    /// Internal energy guess [kJ/kg] at fixed log-volume for a pressure target [MPa].
    fn guess_u_pv(&self, vt: f64, p: f64) -> f64;
}

impl<T: InitialGuess + ?Sized> InitialGuess for &T {
    fn guess_pt(&self, p: f64, t: f64) -> StatePoint {
        (**self).guess_pt(p, t)
    }

    fn guess_ph(&self, p: f64, h: f64) -> StatePoint {
        (**self).guess_ph(p, h)
    }

    fn guess_ps(&self, p: f64, s: f64) -> StatePoint {
        (**self).guess_ps(p, s)
    }

    fn guess_hs(&self, h: f64, s: f64) -> StatePoint {
        (**self).guess_hs(h, s)
    }

    fn guess_u_vh(&self, vt: f64, h: f64) -> f64 {
        (**self).guess_u_vh(vt, h)
    }

    fn guess_u_tv(&self, vt: f64, t: f64) -> f64 {
        (**self).guess_u_tv(vt, t)
    }

    fn guess_u_pv(&self, vt: f64, p: f64) -> f64 {
        (**self).guess_u_pv(vt, p)
    }
}

/// Calorically perfect ideal-gas inversion.
///
/// Exact for [`VanDerWaalsParams::ideal_nitrogen`]; for the full van der Waals model the
/// error is small enough away from the critical region that Newton converges in a handful
/// of iterations.
///
/// ```text
/// u = u0 + cv·T
/// h = u0 + (cv + R)·T
/// s = s0 + cv·ln(T/T_ref) + R·ln v
/// p·v·1000 = R·T
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdealGasGuess {
    r: f64,
    cv: f64,
    t_ref: f64,
    u_offset: f64,
    s_offset: f64,
}

impl IdealGasGuess {
    /// Ideal-gas limit of a van der Waals parameter set.
    pub fn from_params(params: &VanDerWaalsParams) -> Self {
        Self {
            r: params.r,
            cv: params.cv,
            t_ref: params.t_ref,
            u_offset: params.u_offset,
            s_offset: params.s_offset,
        }
    }

    pub fn nitrogen() -> Self {
        Self::from_params(&VanDerWaalsParams::nitrogen())
    }

    fn u_from_t(&self, t: f64) -> f64 {
        self.u_offset + self.cv * t
    }

    fn t_from_h(&self, h: f64) -> f64 {
        (h - self.u_offset) / (self.cv + self.r)
    }

    fn vt_from_pt(&self, p: f64, t: f64) -> f64 {
        (self.r * t / (PV_TO_KJ_PER_KG * p)).ln()
    }
}

impl Default for IdealGasGuess {
    fn default() -> Self {
        Self::nitrogen()
    }
}

impl InitialGuess for IdealGasGuess {
    fn guess_pt(&self, p: f64, t: f64) -> StatePoint {
        StatePoint::from_transformed(self.vt_from_pt(p, t), self.u_from_t(t))
    }

    fn guess_ph(&self, p: f64, h: f64) -> StatePoint {
        self.guess_pt(p, self.t_from_h(h))
    }

    fn guess_ps(&self, p: f64, s: f64) -> StatePoint {
        // s = s0 + cv·ln(T/T_ref) + R·ln(R·T/(1000·p)), solved for ln T
        let ln_t = (s - self.s_offset + self.cv * self.t_ref.ln()
            - self.r * (self.r / (PV_TO_KJ_PER_KG * p)).ln())
            / (self.cv + self.r);
        self.guess_pt(p, ln_t.exp())
    }

    fn guess_hs(&self, h: f64, s: f64) -> StatePoint {
        let t = self.t_from_h(h);
        let vt = (s - self.s_offset - self.cv * (t / self.t_ref).ln()) / self.r;
        StatePoint::from_transformed(vt, self.u_from_t(t))
    }

    fn guess_u_vh(&self, _vt: f64, h: f64) -> f64 {
        self.u_from_t(self.t_from_h(h))
    }

    fn guess_u_tv(&self, _vt: f64, t: f64) -> f64 {
        self.u_from_t(t)
    }

    fn guess_u_pv(&self, vt: f64, p: f64) -> f64 {
        self.u_from_t(PV_TO_KJ_PER_KG * p * vt.exp() / self.r)
    }
}
