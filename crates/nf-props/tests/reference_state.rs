//! Reference-state values and consistency of the SI property interface.

use nf_eos::{EquationOfState, VanDerWaals};
use nf_props::{NitrogenProperties, Partials, PropsResult};
use proptest::prelude::*;

const P_REF: f64 = 101_325.0;
const T_REF: f64 = 393.15;

type Vdw = NitrogenProperties<VanDerWaals>;

fn props() -> Vdw {
    NitrogenProperties::van_der_waals()
}

fn rel_close(actual: f64, expected: f64, tol: f64) -> bool {
    (actual - expected).abs() <= tol * expected.abs().max(1e-300)
}

#[track_caller]
fn assert_rel(actual: f64, expected: f64, tol: f64, what: &str) {
    assert!(
        rel_close(actual, expected, tol),
        "{what}: {actual} vs {expected} (tol {tol})"
    );
}

/// Reference state expressed as (v, e).
fn reference_v_e<E: EquationOfState>(p: &NitrogenProperties<E>) -> (f64, f64) {
    let rho = p.rho_from_p_t(P_REF, T_REF).unwrap();
    (1.0 / rho, p.e_from_p_t(P_REF, T_REF).unwrap())
}

#[test]
fn van_der_waals_reference_values() {
    let p = props();
    let (v, e) = reference_v_e(&p);

    assert_rel(1.0 / v, 0.868_427_999_041_763_7, 1e-12, "rho");
    assert_rel(e, 291_576.353_649_281_66, 1e-12, "e");
    assert_rel(p.h_from_p_t(P_REF, T_REF).unwrap(), 408_252.693_094_582_24, 1e-12, "h");
    assert_rel(p.s_from_v_e(v, e).unwrap(), 7_123.613_271_334_101, 1e-12, "s");
    assert_rel(p.cv_from_v_e(v, e).unwrap(), 746.94, 1e-12, "cv");
    assert_rel(p.cp_from_v_e(v, e).unwrap(), 1_044.513_598_987_913_2, 1e-10, "cp");
    assert_rel(p.c_from_v_e(v, e).unwrap(), 403.909_991_180_261_7, 1e-10, "c");
    let beta = p.beta_from_p_t(P_REF, T_REF).unwrap();
    assert_rel(beta, 2.547_109_721_165_223e-3, 1e-10, "beta");
}

/// Reference-equation nitrogen values at the reference state.
#[track_caller]
fn check_tabulated<E: EquationOfState>(p: &NitrogenProperties<E>, tol: f64) {
    let (v, e) = reference_v_e(p);

    assert_rel(1.0 / v, 0.868_109_701_323_445_45, tol, "rho");
    assert_rel(e, 291_576.398_996_722_3, tol, "e");
    assert_rel(p.e_from_p_rho(P_REF, 1.0 / v).unwrap(), e, tol, "e(p, rho)");
    assert_rel(p.h_from_v_e(v, e).unwrap(), 408_295.518_533_722_15, tol, "h");
    assert_rel(p.s_from_v_e(v, e).unwrap(), 7_123.597_326_393_328_3, tol, "s");
    assert_rel(p.g_from_v_e(v, e).unwrap(), -2_392_346.818_761_158_3, tol, "g");
    assert_rel(p.cv_from_v_e(v, e).unwrap(), 746.944_174_941_564_82, tol, "cv");
    assert_rel(p.cp_from_v_e(v, e).unwrap(), 1_044.479_889_560_090_7, tol, "cp");
    assert_rel(p.c_from_v_e(v, e).unwrap(), 404.048_398_777_465_71, tol, "c");
}

/// CoolProp implements the same reference equation, so agreement is limited only by
/// the flash tolerances.
#[test]
fn coolprop_reproduces_tabulated_nitrogen() {
    check_tabulated(&NitrogenProperties::nitrogen(), 1e-6);
}

/// The calibrated van der Waals model agrees to within a few parts in ten thousand.
#[test]
fn van_der_waals_close_to_tabulated_nitrogen() {
    check_tabulated(&props(), 1e-3);
}

#[track_caller]
fn check_every_pair<E: EquationOfState>(p: &NitrogenProperties<E>, tol: f64) {
    let (v, e) = reference_v_e(p);
    let pressure = p.p_from_v_e(v, e).unwrap();
    let t = p.t_from_v_e(v, e).unwrap();
    let h = p.h_from_v_e(v, e).unwrap();
    let s = p.s_from_v_e(v, e).unwrap();

    assert_rel(pressure, P_REF, tol, "p(v, e)");
    assert_rel(t, T_REF, tol, "T(v, e)");
    assert_rel(p.t_from_p_h(pressure, h).unwrap(), t, tol, "T(p, h)");
    assert_rel(p.s_from_h_p(h, pressure).unwrap(), s, tol, "s(h, p)");
    assert_rel(p.rho_from_p_s(pressure, s).unwrap(), 1.0 / v, tol, "rho(p, s)");
    assert_rel(p.p_from_h_s(h, s).unwrap(), pressure, tol, "p(h, s)");
    assert_rel(p.t_from_h_s(h, s).unwrap(), t, tol, "T(h, s)");
    assert_rel(p.e_from_v_h(v, h).unwrap(), e, tol, "e(v, h)");
    assert_rel(p.e_from_t_v(t, v).unwrap(), e, tol, "e(T, v)");
    assert_rel(p.p_from_t_v(t, v).unwrap(), pressure, tol, "p(T, v)");
    assert_rel(p.h_from_t_v(t, v).unwrap(), h, tol, "h(T, v)");
    assert_rel(p.s_from_t_v(t, v).unwrap(), s, tol, "s(T, v)");
    assert_rel(p.e_from_p_rho(pressure, 1.0 / v).unwrap(), e, tol, "e(p, rho)");
}

#[test]
fn every_input_pair_agrees() {
    check_every_pair(&props(), 1e-10);
    check_every_pair(&NitrogenProperties::nitrogen(), 1e-9);
}

type Value<E> = fn(&NitrogenProperties<E>, f64, f64) -> PropsResult<f64>;
type WithDerivatives<E> = fn(&NitrogenProperties<E>, f64, f64) -> PropsResult<Partials>;
type Case<E> = (&'static str, Value<E>, WithDerivatives<E>, f64, f64);

/// Central-difference check of both partials of `derivative` against `value`.
#[track_caller]
fn check_partials<E: EquationOfState>(p: &NitrogenProperties<E>, case: Case<E>) {
    let (name, value, derivative, a, b) = case;
    let f = |x: f64, y: f64| value(p, x, y).unwrap();
    let z = derivative(p, a, b).unwrap();
    assert_rel(z.value, f(a, b), 1e-13, name);

    let da = 1e-5 * a.abs().max(1.0);
    let db = 1e-5 * b.abs().max(1.0);
    let fd_a = (f(a + da, b) - f(a - da, b)) / (2.0 * da);
    let fd_b = (f(a, b + db) - f(a, b - db)) / (2.0 * db);

    for (label, analytic, fd, x) in [("first", z.d_first, fd_a, a), ("second", z.d_second, fd_b, b)]
    {
        let floor = 1e-7 * z.value.abs() / x.abs().max(1.0);
        assert!(
            (analytic - fd).abs() <= 1e-5 * fd.abs() + floor,
            "{name} d_{label}: {analytic} vs finite difference {fd}"
        );
    }
}

/// Every flash-backed method at the state `(pressure, t)`.
fn flash_cases<E: EquationOfState>(
    p: &NitrogenProperties<E>,
    pressure: f64,
    t: f64,
) -> [Case<E>; 19] {
    use nf_props::NitrogenProperties as N;
    let v = 1.0 / p.rho_from_p_t(pressure, t).unwrap();
    let e = p.e_from_p_t(pressure, t).unwrap();
    let h = p.h_from_p_t(pressure, t).unwrap();
    let s = p.s_from_v_e(v, e).unwrap();
    [
        ("p(v,e)", N::p_from_v_e, N::p_from_v_e_with_derivatives, v, e),
        ("T(v,e)", N::t_from_v_e, N::t_from_v_e_with_derivatives, v, e),
        ("s(v,e)", N::s_from_v_e, N::s_from_v_e_with_derivatives, v, e),
        ("h(v,e)", N::h_from_v_e, N::h_from_v_e_with_derivatives, v, e),
        ("rho(p,T)", N::rho_from_p_t, N::rho_from_p_t_with_derivatives, pressure, t),
        ("h(p,T)", N::h_from_p_t, N::h_from_p_t_with_derivatives, pressure, t),
        ("e(p,T)", N::e_from_p_t, N::e_from_p_t_with_derivatives, pressure, t),
        ("rho(p,s)", N::rho_from_p_s, N::rho_from_p_s_with_derivatives, pressure, s),
        ("s(h,p)", N::s_from_h_p, N::s_from_h_p_with_derivatives, h, pressure),
        ("p(h,s)", N::p_from_h_s, N::p_from_h_s_with_derivatives, h, s),
        ("T(h,s)", N::t_from_h_s, N::t_from_h_s_with_derivatives, h, s),
        ("e(v,h)", N::e_from_v_h, N::e_from_v_h_with_derivatives, v, h),
        ("T(p,h)", N::t_from_p_h, N::t_from_p_h_with_derivatives, pressure, h),
        ("g(v,e)", N::g_from_v_e, N::g_from_v_e_with_derivatives, v, e),
        ("e(T,v)", N::e_from_t_v, N::e_from_t_v_with_derivatives, t, v),
        ("p(T,v)", N::p_from_t_v, N::p_from_t_v_with_derivatives, t, v),
        ("h(T,v)", N::h_from_t_v, N::h_from_t_v_with_derivatives, t, v),
        ("s(T,v)", N::s_from_t_v, N::s_from_t_v_with_derivatives, t, v),
        ("e(p,rho)", N::e_from_p_rho, N::e_from_p_rho_with_derivatives, pressure, 1.0 / v),
    ]
}

#[test]
fn flash_derivatives_match_finite_differences() {
    let p = props();
    for (pressure, t) in [(P_REF, T_REF), (1.0e6, 300.0), (5.0e6, 500.0)] {
        for case in flash_cases(&p, pressure, t) {
            check_partials(&p, case);
        }
    }
}

#[test]
fn coolprop_flash_derivatives_match_finite_differences() {
    let p = NitrogenProperties::nitrogen();
    for case in flash_cases(&p, 1.0e6, 300.0) {
        check_partials(&p, case);
    }
}

#[test]
fn caloric_derivatives_are_consistent() {
    let p = props();
    let (v, e) = reference_v_e(&p);

    let cv = p.cv_from_v_e_with_derivatives(v, e).unwrap();
    assert_rel(cv.value, 746.94, 1e-12, "cv");
    assert!(cv.d_first.abs() < 1e-6 && cv.d_second.abs() < 1e-9);

    let cp = p.cp_from_v_e_with_derivatives(v, e).unwrap();
    assert_rel(cp.value, p.cp_from_v_e(v, e).unwrap(), 1e-14, "cp");
    assert_rel(cp.d_first, -0.669_681_524_663_274_8, 1e-4, "dcp/dv");
    assert_rel(cp.d_second, -2.633_661_169_283_627e-6, 1e-3, "dcp/de");

    let c = p.c_from_v_e_with_derivatives(v, e).unwrap();
    assert_rel(c.d_first, -0.186_857_743_573_728_78, 1e-4, "dc/dv");
    assert_rel(c.d_second, 6.889_965_141_337_822e-4, 1e-4, "dc/de");

    let beta = p.beta_from_p_t_with_derivatives(P_REF, T_REF).unwrap();
    assert!(beta.d_second < 0.0);
    let cp_pt = p.cp_from_p_t_with_derivatives(P_REF, T_REF).unwrap();
    assert_rel(cp_pt.value, cp.value, 1e-10, "cp(p, T)");
    let cv_pt = p.cv_from_p_t_with_derivatives(P_REF, T_REF).unwrap();
    assert_rel(cv_pt.value, 746.94, 1e-12, "cv(p, T)");
    let cv_tv = p.cv_from_t_v_with_derivatives(T_REF, v).unwrap();
    assert_rel(cv_tv.value, 746.94, 1e-12, "cv(T, v)");
    assert!(cv_tv.d_first.abs() < 1e-6 && cv_tv.d_second.abs() < 1e-6);
}

fn ideal() -> Vdw {
    NitrogenProperties::ideal_gas()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn ideal_gas_caloric_identities(pressure in 2.0e4..8.0e6_f64, t in 150.0..900.0_f64) {
        let p = ideal();
        let params = *p.eos().params();
        let r = params.r * 1.0e3;

        let cp = p.cp_from_p_t(pressure, t).unwrap();
        let cv = p.cv_from_p_t(pressure, t).unwrap();
        prop_assert!((cp - cv - r).abs() < 1e-8);

        let rho = p.rho_from_p_t(pressure, t).unwrap();
        let e = p.e_from_p_t(pressure, t).unwrap();
        let c = p.c_from_v_e(1.0 / rho, e).unwrap();
        let expected = (cp / cv * r * t).sqrt();
        prop_assert!((c - expected).abs() < 1e-8 * expected);

        let beta = p.beta_from_p_t(pressure, t).unwrap();
        prop_assert!((beta * t - 1.0).abs() < 1e-9);
    }
}
