// Host-side tests for the seeded noise field.

use orb_core::NoiseField;

#[test]
fn samples_stay_in_unit_range() {
    let field = NoiseField::new(42);
    for i in 0..2000 {
        let x = (i as f32) * 0.137 - 120.0;
        let y = (i as f32) * -0.291 + 33.0;
        let v = field.sample(x, y);
        assert!((0.0..=1.0).contains(&v), "sample({x}, {y}) = {v}");
    }
}

#[test]
fn same_seed_is_deterministic() {
    let a = NoiseField::new(7);
    let b = NoiseField::new(7);
    for i in 0..200 {
        let x = i as f32 * 0.31;
        let y = i as f32 * 0.17;
        assert_eq!(a.sample(x, y), b.sample(x, y));
    }
}

#[test]
fn different_seeds_give_different_fields() {
    let a = NoiseField::new(1);
    let b = NoiseField::new(2);
    let differing = (0..100)
        .filter(|i| {
            let x = *i as f32 * 0.73;
            (a.sample(x, 1.3) - b.sample(x, 1.3)).abs() > 1e-4
        })
        .count();
    assert!(differing > 50, "only {differing} samples differed");
}

#[test]
fn small_input_deltas_give_small_output_deltas() {
    let field = NoiseField::new(42);
    let eps = 1e-3;
    for i in 0..500 {
        let x = i as f32 * 0.05;
        let y = 3.0 - i as f32 * 0.02;
        let d = (field.sample(x + eps, y) - field.sample(x, y)).abs();
        // gradient noise has a bounded slope
        assert!(d < 0.01, "jump of {d} at ({x}, {y})");
    }
}

#[test]
fn out_of_range_inputs_do_not_panic() {
    let field = NoiseField::new(9);
    for (x, y) in [
        (f32::NAN, 0.0),
        (0.0, f32::INFINITY),
        (f32::NEG_INFINITY, f32::NAN),
        (1.0e30, -1.0e30),
        (-123456.78, 98765.43),
    ] {
        let v = field.sample(x, y);
        assert!((0.0..=1.0).contains(&v));
    }
}
