//! Edge case tests: NaN, infinities, signed zero and subnormals

use core::f32::consts::{FRAC_PI_2, PI};
use lanemath::math::{atan, atan2, changesign};
use lanemath::{SimdVector, VFloat};

#[test]
fn test_nan_propagates() {
    let nan = VFloat::splat(f32::NAN);
    let one = VFloat::splat(1.0);

    assert!(atan(nan).lane(0).is_nan());
    assert!(atan2(nan, one).lane(0).is_nan());
    assert!(atan2(one, nan).lane(0).is_nan());
}

#[test]
fn test_atan2_both_infinite_is_nan() {
    let inf = VFloat::splat(f32::INFINITY);
    assert!(atan2(inf, inf).lane(0).is_nan());
    assert!(atan2(-inf, inf).lane(0).is_nan());
}

#[test]
fn test_atan2_one_infinite() {
    let inf = VFloat::splat(f32::INFINITY);
    let two = VFloat::splat(2.0);

    assert_eq!(atan2(inf, two).lane(0), FRAC_PI_2);
    assert_eq!(atan2(-inf, two).lane(0), -FRAC_PI_2);
    assert_eq!(atan2(two, inf).lane(0), 0.0);
    assert_eq!(atan2(two, -inf).lane(0), PI);
    assert_eq!(atan2(-two, -inf).lane(0), -PI);
}

#[test]
fn test_atan2_zero_x() {
    let zero = VFloat::splat(0.0);
    let neg_zero = VFloat::splat(-0.0);
    let three = VFloat::splat(3.0);

    assert_eq!(atan2(three, zero).lane(0), FRAC_PI_2);
    assert_eq!(atan2(three, neg_zero).lane(0), FRAC_PI_2);
    assert_eq!(atan2(-three, zero).lane(0), -FRAC_PI_2);
    assert_eq!(atan2(-three, neg_zero).lane(0), -FRAC_PI_2);
}

#[test]
fn test_atan2_zero_y_negative_x() {
    let neg_zero = VFloat::splat(-0.0);
    let value = atan2(neg_zero, VFloat::splat(-4.0)).lane(0);
    assert_eq!(value, -PI);

    let value = atan2(VFloat::splat(0.0), VFloat::splat(-4.0)).lane(0);
    assert_eq!(value, PI);
}

#[test]
fn test_subnormal_inputs() {
    let tiny = 1e-40f32;
    let value = atan(VFloat::splat(tiny)).lane(0);
    assert!(value.abs() <= tiny * 2.0);

    let value = atan2(VFloat::splat(tiny), VFloat::splat(1.0)).lane(0);
    assert!((0.0..1e-30).contains(&value));
}

#[test]
fn test_changesign_signed_zero_and_nan_sign() {
    let five = VFloat::splat(5.0);

    assert_eq!(changesign(five, VFloat::splat(-0.0)).lane(0), -5.0);
    assert_eq!(changesign(five, VFloat::splat(0.0)).lane(0), 5.0);

    // The sign bit of a NaN still counts
    let negative_nan = -f32::NAN;
    assert_eq!(changesign(five, VFloat::splat(negative_nan)).lane(0), -5.0);
    assert_eq!(changesign(five, VFloat::splat(f32::NAN)).lane(0), 5.0);
}
