use saite::{StiffString, StringParams};

const K_44100: f64 = 1.0 / 44100.0;

fn energy(field: &[f64]) -> f64 {
    field.iter().map(|v| v * v).sum()
}

#[test]
/// A lossless string that is never excited stays exactly at rest.
fn rest_state_stays_zero() {
    let params = StringParams {
        sigma0: 0.0,
        sigma1: 0.0,
        ..StringParams::default()
    };
    let mut string = StiffString::with_time_step(&params, K_44100).unwrap();

    for _ in 0..1000 {
        string.step();
    }
    assert!(string.displacement().iter().all(|&v| v == 0.0));
    assert_eq!(string.anomalies(), 0);
}

#[test]
/// The reference steel string (1m, 0.5mm radius, 300N, 44.1kHz) must
/// configure and land on a sensible grid.
fn reference_steel_string_configures() {
    let string = StiffString::with_time_step(&StringParams::default(), K_44100).unwrap();
    let n = string.intervals();
    assert!(n >= 50 && n <= 400, "unexpected grid size {}", n);
    assert_eq!(string.displacement().len(), n + 1);
    assert!((string.grid_spacing() - 1.0 / n as f64).abs() < 1e-15);
}

#[test]
/// One step after a pluck the field is finite everywhere and the peak has
/// not exceeded the unit amplitude of the injected pulse.
fn pluck_stays_bounded_after_one_step() {
    let mut string = StiffString::with_time_step(&StringParams::default(), K_44100).unwrap();
    string.pluck(0.5);
    string.step();

    let peak = string
        .displacement()
        .iter()
        .fold(0.0f64, |m, &v| m.max(v.abs()));
    assert!(string.displacement().iter().all(|v| v.is_finite()));
    assert!(peak > 0.0, "pluck did not reach the field");
    assert!(peak <= 1.0 + 1e-9, "peak {} above unit pulse", peak);
}

#[test]
/// Stepping alone never touches the clamped boundary points.
fn boundaries_stay_clamped() {
    let mut string = StiffString::with_time_step(&StringParams::default(), K_44100).unwrap();
    let n = string.intervals();

    string.pluck(0.5);
    for _ in 0..2000 {
        string.step();
    }

    let u = string.displacement();
    assert_eq!(u[0], 0.0);
    assert_eq!(u[1], 0.0);
    assert_eq!(u[n - 1], 0.0);
    assert_eq!(u[n], 0.0);
}

#[test]
/// With both damping terms active, the summed squared displacement must not
/// grow once excitation has ceased.
fn energy_decays_after_pluck() {
    let mut string = StiffString::with_time_step(&StringParams::default(), K_44100).unwrap();
    string.pluck(0.5);

    for _ in 0..500 {
        string.step();
    }
    let e1 = energy(string.displacement());

    for _ in 0..1000 {
        string.step();
    }
    let e2 = energy(string.displacement());

    assert!(e1 > 0.0);
    assert!(e2 <= e1 * (1.0 + 1e-12), "energy grew: {} -> {}", e1, e2);
}

#[test]
/// Two identically built, identically driven engines produce bit-identical
/// output.
fn identical_engines_are_deterministic() {
    let params = StringParams::default();
    let mut a = StiffString::with_time_step(&params, K_44100).unwrap();
    let mut b = StiffString::with_time_step(&params, K_44100).unwrap();

    for step in 0..3000u32 {
        if step == 0 {
            a.pluck(0.3);
            b.pluck(0.3);
        }
        if step == 1500 {
            a.pluck(0.7);
            b.pluck(0.7);
        }
        a.step();
        b.step();
        let (va, vb) = (a.read(0.8), b.read(0.8));
        assert_eq!(va.to_bits(), vb.to_bits(), "diverged at step {}", step);
    }
}

#[test]
/// Raising the frequency-dependent damping tightens the stability bound, so
/// the grid must not get coarser.
fn grid_monotonic_in_sigma1() {
    let base = StringParams::default();
    let damped = StringParams {
        sigma1: base.sigma1 * 4.0,
        ..base
    };

    let n_base = StiffString::with_time_step(&base, K_44100).unwrap().intervals();
    let n_damped = StiffString::with_time_step(&damped, K_44100)
        .unwrap()
        .intervals();
    assert!(n_damped >= n_base);
}

#[test]
/// A smaller time step must not coarsen the grid either.
fn grid_monotonic_in_time_step() {
    let params = StringParams::default();
    let n_44k = StiffString::with_time_step(&params, K_44100).unwrap().intervals();
    let n_88k = StiffString::with_time_step(&params, K_44100 / 2.0)
        .unwrap()
        .intervals();
    assert!(n_88k >= n_44k);
}

#[test]
/// Excitation at the extreme positions is truncated, never out of bounds,
/// and leaves the left boundary and the last two points untouched.
fn extreme_positions_stay_in_range() {
    for &position in &[0.0, 1.0] {
        let mut string = StiffString::with_time_step(&StringParams::default(), K_44100).unwrap();
        let n = string.intervals();

        string.pluck(position);
        string.step();

        let u = string.displacement();
        assert!(u.iter().all(|v| v.is_finite()));
        assert_eq!(u[0], 0.0);
        assert_eq!(u[n], 0.0);
    }
}

#[test]
/// Pluck positions are clamped, not rejected.
fn out_of_range_positions_are_clamped() {
    let mut string = StiffString::with_time_step(&StringParams::default(), K_44100).unwrap();
    string.pluck(-3.0);
    string.step();
    let left = energy(string.displacement());

    let mut string = StiffString::with_time_step(&StringParams::default(), K_44100).unwrap();
    string.pluck(0.0);
    string.step();
    let zero = energy(string.displacement());

    assert_eq!(left, zero);
}

#[test]
/// A string too short for the stencil is rejected at construction.
fn degenerate_grid_is_rejected() {
    let short = StringParams {
        length: 0.01,
        ..StringParams::default()
    };
    let err = match StiffString::with_time_step(&short, K_44100) {
        Err(e) => e,
        Ok(_) => panic!("expected a degenerate grid"),
    };
    assert!(err.intervals < saite::model::MIN_INTERVALS);
}

#[test]
/// Read-out indexing covers the full ratio range without panicking.
fn read_covers_full_range() {
    let mut string = StiffString::with_time_step(&StringParams::default(), K_44100).unwrap();
    string.pluck(0.5);
    string.step();

    for &ratio in &[0.0, 0.25, 0.5, 0.8, 1.0] {
        let v = string.read(ratio);
        assert!(v.is_finite());
    }
    // Boundaries were never excited, so the end reads are exactly zero.
    assert_eq!(string.read(0.0), 0.0);
    assert_eq!(string.read(1.0), 0.0);
    assert_eq!(string.anomalies(), 0);
}
