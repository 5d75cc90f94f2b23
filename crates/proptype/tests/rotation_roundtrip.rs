// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test readability over pedantic
#![allow(clippy::cast_precision_loss)] // Sweep parameters
#![allow(clippy::float_cmp)] // Test assertions with constants
#![allow(clippy::missing_panics_doc)] // Tests panic on failure

//! Heading/pitch/bank rotation records: quantized round trips through storages.

use glam::{EulerRot, Quat, Vec3, Vec4};
use proptype::serializer::rotation::{decode_rotation, encode_rotation};
use proptype::storage::{DataStorage, RotationStorage};
use proptype::Variant;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::io::Cursor;

/// Rotation distance; `q` and `-q` are the same rotation.
fn distance(a: Quat, b: Quat) -> f32 {
    let (a, b) = (Vec4::from(a), Vec4::from(b));
    (a - b).length().min((a + b).length())
}

const TOLERANCE: f32 = 1e-3;

fn assert_round_trip(q: Quat) {
    let back = decode_rotation(encode_rotation(q));
    assert!(
        distance(q, back) < TOLERANCE,
        "rotation {:?} came back as {:?}",
        q,
        back
    );
}

#[test]
fn quarter_turns_on_each_axis() {
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        for angle in [FRAC_PI_4, FRAC_PI_2, -FRAC_PI_2, 3.0 * FRAC_PI_4] {
            assert_round_trip(Quat::from_axis_angle(axis, angle));
        }
    }
}

#[test]
fn compound_rotation() {
    let q = Quat::from_euler(EulerRot::ZYX, 0.7, -0.3, 1.9);
    assert_round_trip(q);
}

#[test]
fn half_turn_survives_wrap() {
    // pi quantizes to the i16 minimum, which decodes to the same rotation
    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        assert_round_trip(Quat::from_axis_angle(axis, PI));
    }
}

#[test]
fn random_sweep() {
    let mut rng = fastrand::Rng::with_seed(0x5EED);
    for _ in 0..2000 {
        let axis = Vec3::new(rng.f32() - 0.5, rng.f32() - 0.5, rng.f32() - 0.5);
        if axis.length_squared() < 1e-4 {
            continue;
        }
        let angle = (rng.f32() * 2.0 - 1.0) * PI;
        assert_round_trip(Quat::from_axis_angle(axis.normalize(), angle));
    }
}

#[test]
fn rotation_storage_records_are_six_bytes() {
    let mut rotations = RotationStorage::new();
    let q = Quat::from_rotation_y(0.5);
    rotations
        .create_with_value(1, &Variant::Quaternion(q))
        .expect("create");
    assert_eq!(rotations.data_size(), Some(6));

    let mut file = Cursor::new(Vec::new());
    assert!(rotations.write_to(&mut file, 1, true).expect("write"));
    assert_eq!(file.get_ref().len(), 10);
    assert_eq!(&file.get_ref()[..4], &[6, 0, 0, 0]);

    rotations.clear();
    file.set_position(0);
    assert!(rotations.read_from(&mut file, 1, true).expect("read"));
    let back = rotations.get(1).copied().expect("stored");
    assert!(distance(q, back) < TOLERANCE);
}
