// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-type field codecs.
//!
//! Every codec writes the legacy little-endian layout:
//!
//! | Type | Bytes | Layout |
//! |------|-------|--------|
//! | `bool` | 4 | `u32` 0/1 |
//! | `Vec3` | 12 | x, y, z as `f32` |
//! | `Quat` | 6 | heading, pitch, bank as `i16` (see [`rotation`]) |
//! | `String` | 4 + len | `u32` length, raw bytes, no terminator |
//! | numerics | `size_of::<T>()` | raw value |
//!
//! [`Serializable`] picks the default codec of a type; storages can override
//! it per field (for example [`FixedStringSerializer`]).

mod fixed;
pub mod rotation;
mod string;

pub use fixed::{BoolSerializer, Plain, PlainSerializer, VectorSerializer};
pub use rotation::RotationSerializer;
pub use string::{truncate_nul, FixedStringSerializer, VarStringSerializer};

use crate::error::Result;
use std::io::{Read, Write};

/// Stateless codec for one physical type.
pub trait Serializer {
    type Value;

    fn serialize(&self, out: &mut dyn Write, value: &Self::Value) -> Result<()>;

    fn deserialize(&self, input: &mut dyn Read, value: &mut Self::Value) -> Result<()>;

    /// Bytes `serialize` writes for `value`.
    fn stored_size(&self, value: &Self::Value) -> usize;

    /// Size shared by every value, `None` for variable-length codecs.
    fn fixed_size(&self) -> Option<usize>;
}

/// Types with a default codec.
pub trait Serializable: Sized {
    type Serializer: Serializer<Value = Self> + Default;
}

impl Serializable for bool {
    type Serializer = BoolSerializer;
}

impl Serializable for glam::Vec3 {
    type Serializer = VectorSerializer;
}

impl Serializable for glam::Quat {
    type Serializer = RotationSerializer;
}

impl Serializable for String {
    type Serializer = VarStringSerializer;
}

macro_rules! plain_serializable {
    ($($ty:ty),*) => {
        $(
            impl Serializable for $ty {
                type Serializer = PlainSerializer<$ty>;
            }
        )*
    };
}

plain_serializable!(u8, i8, u16, i16, u32, i32, f32, f64);

/// Serialize into a fresh buffer.
pub fn to_bytes<S: Serializer>(serializer: &S, value: &S::Value) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(serializer.stored_size(value));
    serializer.serialize(&mut out, value)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};
    use std::io::Cursor;

    fn round_trip<T: Serializable + Default>(value: &T) -> (T, usize) {
        let serializer = T::Serializer::default();
        let bytes = to_bytes(&serializer, value).expect("serialize");
        assert_eq!(bytes.len(), serializer.stored_size(value));
        let mut back = T::default();
        serializer
            .deserialize(&mut Cursor::new(&bytes), &mut back)
            .expect("deserialize");
        (back, bytes.len())
    }

    #[test]
    fn test_default_codecs_round_trip() {
        assert_eq!(round_trip(&true), (true, 4));
        assert_eq!(round_trip(&-123_456i32), (-123_456, 4));
        assert_eq!(round_trip(&0xDEAD_BEEFu32), (0xDEAD_BEEF, 4));
        assert_eq!(round_trip(&-7i16), (-7, 2));
        assert_eq!(round_trip(&2.5f32), (2.5, 4));
        assert_eq!(round_trip(&-1.0e-9f64), (-1.0e-9, 8));
        let v = Vec3::new(1.0, -2.5, 1e6);
        assert_eq!(round_trip(&v), (v, 12));
        assert_eq!(round_trip(&"Ian".to_string()), ("Ian".to_string(), 7));
        assert_eq!(round_trip(&String::new()), (String::new(), 4));
    }

    #[test]
    fn test_rotation_default_codec() {
        let q = Quat::from_rotation_y(0.5);
        let (back, size) = round_trip(&q);
        assert_eq!(size, 6);
        assert!(back.angle_between(q) < 1e-3);
    }

    #[test]
    fn test_fixed_sizes() {
        assert_eq!(BoolSerializer.fixed_size(), Some(4));
        assert_eq!(VectorSerializer.fixed_size(), Some(12));
        assert_eq!(RotationSerializer.fixed_size(), Some(6));
        assert_eq!(PlainSerializer::<u16>::default().fixed_size(), Some(2));
        assert_eq!(VarStringSerializer.fixed_size(), None);
        assert_eq!(FixedStringSerializer::<16>.fixed_size(), Some(16));
    }
}
