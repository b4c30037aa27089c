//! Propagated derivatives against central differences of repeated flashes.

mod common;

use common::{eos, guess, state_at};
use nalgebra::Vector2;
use nf_flash::jacobian::{central_difference, central_difference_jacobian};
use nf_flash::{
    Differential, FlashError, FlashInput, FlashKind, FlashSolution, Property, cross_derivatives,
    flash, flash_hs, flash_ph, flash_vh, hs_derivatives, hs_pressure, hs_temperature,
    ph_derivatives, ph_temperature, ps_derivatives, pt_derivatives, pv_derivatives,
    secondary_derivatives, tv_derivatives, vh_derivatives,
};

const STEP: f64 = 1e-6;

fn input(kind: FlashKind, a: f64, b: f64) -> FlashInput {
    match kind {
        FlashKind::PressureTemperature => FlashInput::PressureTemperature { p: a, t: b },
        FlashKind::PressureEnthalpy => FlashInput::PressureEnthalpy { p: a, h: b },
        FlashKind::PressureEntropy => FlashInput::PressureEntropy { p: a, s: b },
        FlashKind::EnthalpyEntropy => FlashInput::EnthalpyEntropy { h: a, s: b },
        FlashKind::VolumeEnthalpy => FlashInput::VolumeEnthalpy { v: a, h: b },
        FlashKind::TemperatureVolume => FlashInput::TemperatureVolume { t: a, v: b },
        FlashKind::PressureVolume => FlashInput::PressureVolume { p: a, v: b },
    }
}

fn property_after_flash(kind: FlashKind, a: f64, b: f64, z: Property) -> Result<f64, FlashError> {
    let eos = eos();
    let sol = flash(&eos, &guess(), input(kind, a, b))?;
    Ok(Differential::of(&eos, sol.point(), z)?.value)
}

fn agrees(analytic: f64, numeric: f64) -> bool {
    let diff = (analytic - numeric).abs();
    diff <= 1e-6 || diff <= 1e-6 * analytic.abs().max(numeric.abs())
}

fn solution_for(kind: FlashKind, p: f64, t: f64) -> FlashSolution {
    let eos = eos();
    let (_, f) = state_at(p, t);
    let [a, b] = match kind {
        FlashKind::PressureTemperature => [f.p, f.t],
        FlashKind::PressureEnthalpy => [f.p, f.h],
        FlashKind::PressureEntropy => [f.p, f.s],
        FlashKind::EnthalpyEntropy => [f.h, f.s],
        FlashKind::VolumeEnthalpy => [f.v, f.h],
        FlashKind::TemperatureVolume => [f.t, f.v],
        FlashKind::PressureVolume => [f.p, f.v],
    };
    flash(&eos, &guess(), input(kind, a, b)).unwrap()
}

#[test]
fn secondary_derivatives_match_central_differences() {
    let eos = eos();
    for (p, t) in [(1.0, 300.0), (5.0, 500.0)] {
        for kind in FlashKind::ALL {
            let sol = solution_for(kind, p, t);
            let [a, b] = sol.targets();
            for z in Property::ALL {
                let analytic = secondary_derivatives(&eos, &sol, z).unwrap();
                let d_first =
                    central_difference(|x| property_after_flash(kind, x, b, z), a, STEP).unwrap();
                let d_second =
                    central_difference(|x| property_after_flash(kind, a, x, z), b, STEP).unwrap();
                assert!(
                    agrees(analytic.d_first, d_first),
                    "{kind} d{z}/d(first): {} vs {d_first} at ({p}, {t})",
                    analytic.d_first
                );
                assert!(
                    agrees(analytic.d_second, d_second),
                    "{kind} d{z}/d(second): {} vs {d_second} at ({p}, {t})",
                    analytic.d_second
                );
            }
        }
    }
}

#[test]
fn pt_derivatives_match_flash_jacobian() {
    let (eos, guess) = (eos(), guess());
    let sol = solution_for(FlashKind::PressureTemperature, 1.0, 300.0);
    let d = pt_derivatives(&eos, &sol).unwrap();

    let jac = central_difference_jacobian(
        |x: Vector2<f64>| {
            let s = nf_flash::flash_pt(&eos, &guess, x[0], x[1])?;
            Ok::<_, FlashError>(Vector2::new(s.v(), s.u()))
        },
        Vector2::new(1.0, 300.0),
        STEP,
    )
    .unwrap();

    assert!(agrees(d.dv_dp_t, jac[(0, 0)]));
    assert!(agrees(d.dv_dt_p, jac[(0, 1)]));
    assert!(agrees(d.du_dp_t, jac[(1, 0)]));
    assert!(agrees(d.du_dt_p, jac[(1, 1)]));
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-10 * a.abs().max(b.abs())
}

#[test]
fn variant_outputs_agree_with_cross_derivatives() {
    use Property::*;
    let eos = eos();

    let sol = solution_for(FlashKind::PressureTemperature, 2.0, 320.0);
    let d = pt_derivatives(&eos, &sol).unwrap();
    let x = |first, second, of| cross_derivatives(&eos, &sol, first, second, of).unwrap();
    assert!(close(d.dp_dt_v, x(Temperature, Volume, Pressure).d_first));
    assert!(close(d.dp_dt_u, x(Temperature, Energy, Pressure).d_first));

    let sol = solution_for(FlashKind::PressureEntropy, 2.0, 320.0);
    let d = ps_derivatives(&eos, &sol).unwrap();
    let x = |first, second, of| cross_derivatives(&eos, &sol, first, second, of).unwrap();
    assert!(close(d.dp_ds_v, x(Entropy, Volume, Pressure).d_first));
    assert!(close(d.dp_ds_u, x(Entropy, Energy, Pressure).d_first));
    assert!(close(d.dv_ds_p, x(Pressure, Entropy, Volume).d_second));

    let sol = solution_for(FlashKind::PressureEnthalpy, 2.0, 320.0);
    let d = ph_derivatives(&eos, &sol).unwrap();
    let t = ph_temperature(&eos, &sol).unwrap();
    let x = |first, second, of| cross_derivatives(&eos, &sol, first, second, of).unwrap();
    assert!(close(d.dp_dh_v, x(Enthalpy, Volume, Pressure).d_first));
    assert!(close(d.dp_dh_u, x(Enthalpy, Energy, Pressure).d_first));
    assert!(close(t.first_per_second(), x(Enthalpy, Temperature, Pressure).d_first));
    assert!(close(t.value, 320.0));

    let sol = solution_for(FlashKind::EnthalpyEntropy, 2.0, 320.0);
    let d = hs_derivatives(&eos, &sol).unwrap();
    let p = hs_pressure(&eos, &sol).unwrap();
    let t = hs_temperature(&eos, &sol).unwrap();
    let x = |first, second, of| cross_derivatives(&eos, &sol, first, second, of).unwrap();
    assert!(close(d.dh_ds_v, x(Entropy, Volume, Enthalpy).d_first));
    assert!(close(d.dh_ds_u, x(Entropy, Energy, Enthalpy).d_first));
    assert!(close(p.first_per_second(), x(Entropy, Pressure, Enthalpy).d_first));
    assert!(close(t.first_per_second(), x(Entropy, Temperature, Enthalpy).d_first));

    let sol = solution_for(FlashKind::VolumeEnthalpy, 2.0, 320.0);
    let d = vh_derivatives(&eos, &sol).unwrap();
    let x = |first, second, of| cross_derivatives(&eos, &sol, first, second, of).unwrap();
    assert!(close(d.dv_dh_u, x(Enthalpy, Energy, Volume).d_first));
    assert!(close(d.du_dv_h, x(Volume, Enthalpy, Energy).d_first));

    let sol = solution_for(FlashKind::TemperatureVolume, 2.0, 320.0);
    let d = tv_derivatives(&eos, &sol).unwrap();
    let x = |first, second, of| cross_derivatives(&eos, &sol, first, second, of).unwrap();
    assert!(close(d.du_dt_v, x(Temperature, Volume, Energy).d_first));
    assert!(close(d.dp_dv_t, x(Volume, Temperature, Pressure).d_first));

    let sol = solution_for(FlashKind::PressureVolume, 2.0, 320.0);
    let d = pv_derivatives(&eos, &sol).unwrap();
    let x = |first, second, of| cross_derivatives(&eos, &sol, first, second, of).unwrap();
    assert!(close(d.dt_dp_v, x(Pressure, Volume, Temperature).d_first));
    assert!(close(d.du_dv_p, x(Volume, Pressure, Energy).d_first));
}

#[test]
fn triple_products_equal_minus_one() {
    use Property::*;
    let eos = eos();
    let sol = solution_for(FlashKind::PressureTemperature, 2.0, 320.0);
    let partial = |of, wrt, held| cross_derivatives(&eos, &sol, wrt, held, of).unwrap().d_first;

    for (x, y, z) in [
        (Pressure, Temperature, Volume),
        (Enthalpy, Entropy, Pressure),
        (Pressure, Enthalpy, Temperature),
        (Volume, Enthalpy, Energy),
        (Pressure, Entropy, Energy),
        (Density, Temperature, Entropy),
    ] {
        let product = partial(x, y, z) * partial(y, z, x) * partial(z, x, y);
        assert!((product + 1.0).abs() < 1e-12, "({x}, {y}, {z}): {product}");
    }
}

#[test]
fn vh_derivatives_match_central_differences() {
    let (eos, guess) = (eos(), guess());
    let (_, f) = state_at(0.101325, 393.15);
    let sol = flash_vh(&eos, &guess, f.v, f.h).unwrap();
    let d = vh_derivatives(&eos, &sol).unwrap();

    let u_at = |v: f64, h: f64| flash_vh(&eos, &guess, v, h).map(|s| s.u());
    let du_dh = central_difference(|h| u_at(f.v, h), f.h, STEP).unwrap();
    assert!(agrees(d.du_dh_v, du_dh));

    // Same pair through p-h and h-s gives the same temperature block.
    let ph = flash_ph(&eos, &guess, f.p, f.h).unwrap();
    let hs = flash_hs(&eos, &guess, f.h, f.s).unwrap();
    let t_ph = ph_temperature(&eos, &ph).unwrap();
    let t_hs = hs_temperature(&eos, &hs).unwrap();
    assert!((t_ph.value - t_hs.value).abs() < 1e-8);
}
