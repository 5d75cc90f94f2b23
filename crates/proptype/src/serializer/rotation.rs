// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Compressed rotation codec.
//!
//! A quaternion is stored as three `i16` angles (heading, pitch, bank), one
//! 16-bit step per `pi / 32768` radians. The angles are Euler angles of the
//! rotation matrix `M = Rz(bank) * Ry(pitch) * Rx(heading)`: encoding extracts
//! them in Z-Y-X order, decoding composes the matrix in that same order.
//!
//! | Slot | Axis | Range |
//! |------|------|-------|
//! | heading | X | `[-pi, pi)` |
//! | pitch | Y | `[-pi/2, pi/2]` |
//! | bank | Z | `[-pi, pi)` |

use super::fixed::Plain;
use super::Serializer;
use crate::config::{ROTATION_SCALE, ROTATION_STORED_SIZE};
use crate::error::Result;
use glam::{Mat3, Quat};
use std::f32::consts::{FRAC_PI_2, PI};
use std::io::{Read, Write};

/// Row-major element access on glam's column-major matrix.
fn at(m: &Mat3, row: usize, col: usize) -> f32 {
    m.col(col)[row]
}

/// Euler angles `(x, y, z)` such that `m = Rz(z) * Ry(y) * Rx(x)`.
///
/// At the poles (`|y| = pi/2`) only `z -/+ x` is defined; `x` is pinned to 0.
pub fn matrix_to_euler_zyx(m: &Mat3) -> (f32, f32, f32) {
    let y = (-at(m, 2, 0)).clamp(-1.0, 1.0).asin();
    if y < FRAC_PI_2 {
        if y > -FRAC_PI_2 {
            let z = at(m, 1, 0).atan2(at(m, 0, 0));
            let x = at(m, 2, 1).atan2(at(m, 2, 2));
            (x, y, z)
        } else {
            // z + x
            let z = (-at(m, 0, 1)).atan2(-at(m, 0, 2));
            (0.0, y, z)
        }
    } else {
        // z - x
        let z = (-at(m, 0, 1)).atan2(at(m, 0, 2));
        (0.0, y, z)
    }
}

/// `Rz(z) * Ry(y) * Rx(x)`.
pub fn euler_zyx_to_matrix(x: f32, y: f32, z: f32) -> Mat3 {
    Mat3::from_rotation_z(z) * Mat3::from_rotation_y(y) * Mat3::from_rotation_x(x)
}

fn quantize(angle: f32) -> i16 {
    // pi lands on 32768 and wraps to -pi, the same angle
    (angle * ROTATION_SCALE / PI) as i32 as i16
}

fn dequantize(step: i16) -> f32 {
    f32::from(step) / ROTATION_SCALE * PI
}

/// Quaternion to `[heading, pitch, bank]` steps.
pub fn quat_to_hpb(q: Quat) -> [i16; 3] {
    let q = if q.length_squared() > 0.0 {
        q.normalize()
    } else {
        Quat::IDENTITY
    };
    let (x, y, z) = matrix_to_euler_zyx(&Mat3::from_quat(q));
    [quantize(x), quantize(y), quantize(z)]
}

/// `[heading, pitch, bank]` steps to a unit quaternion.
pub fn hpb_to_quat(hpb: [i16; 3]) -> Quat {
    let [h, p, b] = hpb;
    Quat::from_mat3(&euler_zyx_to_matrix(
        dequantize(h),
        dequantize(p),
        dequantize(b),
    ))
}

/// The 6 stored bytes of a rotation.
pub fn encode_rotation(q: Quat) -> [u8; ROTATION_STORED_SIZE] {
    let [h, p, b] = quat_to_hpb(q);
    let mut out = [0u8; ROTATION_STORED_SIZE];
    out[0..2].copy_from_slice(&h.to_le_bytes());
    out[2..4].copy_from_slice(&p.to_le_bytes());
    out[4..6].copy_from_slice(&b.to_le_bytes());
    out
}

/// Inverse of [`encode_rotation`].
pub fn decode_rotation(bytes: [u8; ROTATION_STORED_SIZE]) -> Quat {
    hpb_to_quat([
        i16::from_le_bytes([bytes[0], bytes[1]]),
        i16::from_le_bytes([bytes[2], bytes[3]]),
        i16::from_le_bytes([bytes[4], bytes[5]]),
    ])
}

/// Quaternion as heading/pitch/bank `i16` triple.
#[derive(Debug, Clone, Copy, Default)]
pub struct RotationSerializer;

impl Serializer for RotationSerializer {
    type Value = Quat;

    fn serialize(&self, out: &mut dyn Write, value: &Quat) -> Result<()> {
        for step in quat_to_hpb(*value) {
            step.write_le(out)?;
        }
        Ok(())
    }

    fn deserialize(&self, input: &mut dyn Read, value: &mut Quat) -> Result<()> {
        let h = i16::read_le(input)?;
        let p = i16::read_le(input)?;
        let b = i16::read_le(input)?;
        *value = hpb_to_quat([h, p, b]);
        Ok(())
    }

    fn stored_size(&self, _value: &Quat) -> usize {
        ROTATION_STORED_SIZE
    }

    fn fixed_size(&self) -> Option<usize> {
        Some(ROTATION_STORED_SIZE)
    }
}
