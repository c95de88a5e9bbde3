//! Backend consistency tests
//!
//! The kernels are built only from backend primitives, so the 1-, 4- and 8-lane
//! instantiations must agree bit for bit on every input.

use lanemath::math::{atan, atan2, changesign};
use lanemath::{SimdMask, SimdVector, VFloat, VFloat1, VFloat4, VFloat8};
use proptest::prelude::*;


#[cfg(test)]
use test_utils::*;

use proptest::test_runner::Config as ProptestConfig;

fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 2_000,
        ..ProptestConfig::default()
    }
}

const INPUTS: [f32; 16] = [
    0.0,
    -0.0,
    0.5,
    -0.75,
    1.0,
    -1.0,
    1.0001,
    -3.5,
    10.0,
    -1e6,
    1e-40,
    f32::INFINITY,
    f32::NEG_INFINITY,
    f32::NAN,
    f32::MAX,
    -f32::MIN_POSITIVE,
];

/// Evaluate `f` over `inputs` on backend `V`, one chunk at a time
fn eval_unary<V: SimdVector>(inputs: &[f32], f: impl Fn(V) -> V) -> Vec<u32> {
    inputs
        .chunks(V::LANES)
        .flat_map(|chunk| lane_bits(f(load_padded::<V>(chunk))).into_iter().take(chunk.len()))
        .collect()
}

fn eval_binary<V: SimdVector>(a: &[f32], b: &[f32], f: impl Fn(V, V) -> V) -> Vec<u32> {
    a.chunks(V::LANES)
        .zip(b.chunks(V::LANES))
        .flat_map(|(ca, cb)| {
            lane_bits(f(load_padded::<V>(ca), load_padded::<V>(cb)))
                .into_iter()
                .take(ca.len())
        })
        .collect()
}

#[test]
fn test_atan_identical_across_widths() {
    let scalar = eval_unary::<VFloat1>(&INPUTS, atan);
    assert_eq!(scalar, eval_unary::<VFloat4>(&INPUTS, atan));
    assert_eq!(scalar, eval_unary::<VFloat8>(&INPUTS, atan));
    assert_eq!(scalar, eval_unary::<VFloat>(&INPUTS, atan));
}

#[test]
fn test_atan2_identical_across_widths() {
    // Every (y, x) pair from the input table
    let mut ys = Vec::new();
    let mut xs = Vec::new();
    for &y in &INPUTS {
        for &x in &INPUTS {
            ys.push(y);
            xs.push(x);
        }
    }

    let scalar = eval_binary::<VFloat1>(&ys, &xs, atan2);
    assert_eq!(scalar, eval_binary::<VFloat4>(&ys, &xs, atan2));
    assert_eq!(scalar, eval_binary::<VFloat8>(&ys, &xs, atan2));
}

#[test]
fn test_changesign_identical_across_widths() {
    let ys: Vec<f32> = INPUTS.iter().rev().copied().collect();

    let scalar = eval_binary::<VFloat1>(&INPUTS, &ys, changesign);
    assert_eq!(scalar, eval_binary::<VFloat4>(&INPUTS, &ys, changesign));
    assert_eq!(scalar, eval_binary::<VFloat8>(&INPUTS, &ys, changesign));
}

#[test]
fn test_random_inputs_identical_across_widths() {
    proptest!(proptest_config(), |(values in prop::collection::vec(any_f32(), 8))| {
        let scalar = eval_unary::<VFloat1>(&values, atan);
        prop_assert_eq!(&scalar, &eval_unary::<VFloat4>(&values, atan));
        prop_assert_eq!(&scalar, &eval_unary::<VFloat8>(&values, atan));

        let rotated: Vec<f32> = values.iter().cycle().skip(3).take(8).copied().collect();
        let scalar = eval_binary::<VFloat1>(&values, &rotated, atan2);
        prop_assert_eq!(&scalar, &eval_binary::<VFloat4>(&values, &rotated, atan2));
        prop_assert_eq!(&scalar, &eval_binary::<VFloat8>(&values, &rotated, atan2));
    });
}

#[test]
fn test_select_and_masks_agree() {
    fn bitmask_of<V: SimdVector>(values: &[f32]) -> (u32, Vec<u32>) {
        let v = V::from_slice(values);
        let zero = V::splat(0.0);
        let negative = v.lt(zero);
        let picked = V::select(negative, V::splat(-1.0), V::splat(1.0));
        (negative.bitmask(), lane_bits(picked))
    }

    let values = [-1.0f32, 2.0, -0.0, f32::NAN, -5.0, 6.0, -7.0, 0.5];

    let (mask8, picked8) = bitmask_of::<VFloat8>(&values);
    assert_eq!(mask8, 0b0101_0001);

    let (lo4, picked_lo) = bitmask_of::<VFloat4>(&values[..4]);
    let (hi4, picked_hi) = bitmask_of::<VFloat4>(&values[4..]);
    assert_eq!(lo4 | (hi4 << 4), mask8);
    assert_eq!([picked_lo, picked_hi].concat(), picked8);

    for (lane, &bits) in picked8.iter().enumerate() {
        let (mask1, picked1) = bitmask_of::<VFloat1>(&values[lane..lane + 1]);
        assert_eq!(mask1, (mask8 >> lane) & 1);
        assert_eq!(picked1[0], bits);
    }
}

#[test]
fn test_sign_mask_agrees_with_lt_zero_off_zero() {
    let values = [-3.0f32, 4.0, -0.0, 0.0, f32::NEG_INFINITY, 1e-40, -1e-40, 9.0];
    let v = VFloat8::from_slice(&values);

    // Only the sign mask sees -0.0
    assert_eq!(v.sign_mask().bitmask(), 0b0101_0101);
    assert_eq!(v.lt(VFloat8::splat(0.0)).bitmask(), 0b0101_0001);
    assert!(v.sign_mask().any());
    assert!(!v.sign_mask().all());
}
