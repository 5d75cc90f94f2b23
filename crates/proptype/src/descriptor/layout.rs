// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! In-buffer byte layout of simple leaves.
//!
//! | Kind | Sizes | Encoding |
//! |------|-------|----------|
//! | bool | 1, 2, 4 | little-endian 0/1, any nonzero byte reads true |
//! | int | 1, 2, 4 | little-endian two's complement, sign extended on read |
//! | uint | 1, 2, 4 | little-endian, zero extended on read |
//! | float | 4, 8 | IEEE single or double |
//! | vector | 12 | three `f32` |
//! | quaternion | 6 | heading/pitch/bank `i16` (rotation codec) |
//! | string | any | NUL-terminated text, truncated to `size - 1` bytes |

use crate::config::{ROTATION_STORED_SIZE, VECTOR_STORED_SIZE};
use crate::error::{Error, Result};
use crate::serializer::rotation::{decode_rotation, encode_rotation};
use crate::serializer::truncate_nul;
use crate::variant::{Variant, VariantKind};
use glam::Vec3;
use std::sync::Arc;

/// Check a `(kind, size)` pair for a simple leaf.
pub(crate) fn validate(name: &str, kind: VariantKind, size: usize) -> Result<()> {
    let valid = match kind {
        VariantKind::Bool | VariantKind::Int | VariantKind::UInt => matches!(size, 1 | 2 | 4),
        VariantKind::Float => matches!(size, 4 | 8),
        VariantKind::Vector => size == VECTOR_STORED_SIZE,
        VariantKind::Quaternion => size == ROTATION_STORED_SIZE,
        VariantKind::String => size > 0,
        VariantKind::Invalid => false,
    };
    if valid {
        Ok(())
    } else {
        Err(Error::invalid_definition(
            name,
            format!("{} leaf cannot be {} bytes", kind, size),
        ))
    }
}

fn read_word(bytes: &[u8]) -> u32 {
    let mut word = [0u8; 4];
    word[..bytes.len()].copy_from_slice(bytes);
    u32::from_le_bytes(word)
}

fn read_f32(bytes: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Decode the leaf stored in `bytes` (exactly the leaf's size).
pub(crate) fn read(kind: VariantKind, bytes: &[u8]) -> Result<Variant> {
    Ok(match (kind, bytes.len()) {
        (VariantKind::Bool, _) => Variant::Bool(bytes.iter().any(|&b| b != 0)),
        (VariantKind::UInt, _) => Variant::UInt(read_word(bytes)),
        (VariantKind::Int, 1) => Variant::Int(i32::from(bytes[0] as i8)),
        (VariantKind::Int, 2) => Variant::Int(i32::from(i16::from_le_bytes([bytes[0], bytes[1]]))),
        (VariantKind::Int, _) => Variant::Int(read_word(bytes) as i32),
        (VariantKind::Float, 8) => {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(bytes);
            Variant::Float(f64::from_le_bytes(raw) as f32)
        }
        (VariantKind::Float, _) => Variant::Float(read_f32(bytes, 0)),
        (VariantKind::Vector, _) => Variant::Vector(Vec3::new(
            read_f32(bytes, 0),
            read_f32(bytes, 4),
            read_f32(bytes, 8),
        )),
        (VariantKind::Quaternion, _) => {
            let mut raw = [0u8; ROTATION_STORED_SIZE];
            raw.copy_from_slice(bytes);
            Variant::Quaternion(decode_rotation(raw))
        }
        (VariantKind::String, _) => {
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            Variant::String(Arc::from(String::from_utf8_lossy(&bytes[..end])))
        }
        (VariantKind::Invalid, _) => {
            return Err(Error::InvalidConversion {
                from: VariantKind::Invalid,
                to: VariantKind::Invalid,
            })
        }
    })
}

/// Encode `value` (already of `kind`) into `bytes` (exactly the leaf's size).
pub(crate) fn write(kind: VariantKind, bytes: &mut [u8], value: &Variant) -> Result<()> {
    let size = bytes.len();
    match kind {
        VariantKind::Bool => {
            let word = u32::from(value.to_bool()?);
            bytes.copy_from_slice(&word.to_le_bytes()[..size]);
        }
        VariantKind::Int => {
            let word = value.to_int()? as u32;
            bytes.copy_from_slice(&word.to_le_bytes()[..size]);
        }
        VariantKind::UInt => {
            let word = value.to_uint()?;
            bytes.copy_from_slice(&word.to_le_bytes()[..size]);
        }
        VariantKind::Float if size == 8 => {
            bytes.copy_from_slice(&f64::from(value.to_float()?).to_le_bytes());
        }
        VariantKind::Float => bytes.copy_from_slice(&value.to_float()?.to_le_bytes()),
        VariantKind::Vector => {
            let v = value.to_vector()?;
            bytes[0..4].copy_from_slice(&v.x.to_le_bytes());
            bytes[4..8].copy_from_slice(&v.y.to_le_bytes());
            bytes[8..12].copy_from_slice(&v.z.to_le_bytes());
        }
        VariantKind::Quaternion => bytes.copy_from_slice(&encode_rotation(value.to_quaternion()?)),
        VariantKind::String => {
            let text = value.to_text()?;
            let text = truncate_nul(&text, size);
            bytes.fill(0);
            bytes[..text.len()].copy_from_slice(text.as_bytes());
        }
        VariantKind::Invalid => {
            return Err(Error::InvalidConversion {
                from: value.kind(),
                to: VariantKind::Invalid,
            })
        }
    }
    Ok(())
}
