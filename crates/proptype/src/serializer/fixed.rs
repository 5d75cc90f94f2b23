// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fixed-width codecs: plain numerics, bool and Vector3.

use super::Serializer;
use crate::config::{BOOL_STORED_SIZE, VECTOR_STORED_SIZE};
use crate::error::Result;
use glam::Vec3;
use std::io::{Read, Write};
use std::marker::PhantomData;

/// Read exactly `N` bytes.
pub(crate) fn read_array<const N: usize>(input: &mut dyn Read) -> Result<[u8; N]> {
    let mut bytes = [0u8; N];
    input.read_exact(&mut bytes)?;
    Ok(bytes)
}

/// Numeric scalar stored as its raw little-endian bytes.
pub trait Plain: Copy + Default {
    const SIZE: usize;

    fn write_le(self, out: &mut dyn Write) -> Result<()>;

    fn read_le(input: &mut dyn Read) -> Result<Self>;
}

/// Generate [`Plain`] for numeric primitives
macro_rules! impl_plain {
    ($($type:ty => $size:expr),* $(,)?) => {
        $(
            impl Plain for $type {
                const SIZE: usize = $size;

                fn write_le(self, out: &mut dyn Write) -> Result<()> {
                    out.write_all(&self.to_le_bytes())?;
                    Ok(())
                }

                fn read_le(input: &mut dyn Read) -> Result<Self> {
                    Ok(<$type>::from_le_bytes(read_array::<$size>(input)?))
                }
            }
        )*
    };
}

impl_plain! {
    u8 => 1,
    i8 => 1,
    u16 => 2,
    i16 => 2,
    u32 => 4,
    i32 => 4,
    f32 => 4,
    f64 => 8,
}

/// Raw memory copy of a plain scalar.
#[derive(Debug, Clone, Copy)]
pub struct PlainSerializer<T>(PhantomData<T>);

impl<T> Default for PlainSerializer<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: Plain> Serializer for PlainSerializer<T> {
    type Value = T;

    fn serialize(&self, out: &mut dyn Write, value: &T) -> Result<()> {
        value.write_le(out)
    }

    fn deserialize(&self, input: &mut dyn Read, value: &mut T) -> Result<()> {
        *value = T::read_le(input)?;
        Ok(())
    }

    fn stored_size(&self, _value: &T) -> usize {
        T::SIZE
    }

    fn fixed_size(&self) -> Option<usize> {
        Some(T::SIZE)
    }
}

/// Bool as a 4-byte `u32`. Any nonzero word reads back as `true`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolSerializer;

impl Serializer for BoolSerializer {
    type Value = bool;

    fn serialize(&self, out: &mut dyn Write, value: &bool) -> Result<()> {
        u32::from(*value).write_le(out)
    }

    fn deserialize(&self, input: &mut dyn Read, value: &mut bool) -> Result<()> {
        *value = u32::read_le(input)? != 0;
        Ok(())
    }

    fn stored_size(&self, _value: &bool) -> usize {
        BOOL_STORED_SIZE
    }

    fn fixed_size(&self) -> Option<usize> {
        Some(BOOL_STORED_SIZE)
    }
}

/// Vector3 as three `f32` in x, y, z order.
#[derive(Debug, Clone, Copy, Default)]
pub struct VectorSerializer;

impl Serializer for VectorSerializer {
    type Value = Vec3;

    fn serialize(&self, out: &mut dyn Write, value: &Vec3) -> Result<()> {
        value.x.write_le(out)?;
        value.y.write_le(out)?;
        value.z.write_le(out)
    }

    fn deserialize(&self, input: &mut dyn Read, value: &mut Vec3) -> Result<()> {
        let x = f32::read_le(input)?;
        let y = f32::read_le(input)?;
        let z = f32::read_le(input)?;
        *value = Vec3::new(x, y, z);
        Ok(())
    }

    fn stored_size(&self, _value: &Vec3) -> usize {
        VECTOR_STORED_SIZE
    }

    fn fixed_size(&self) -> Option<usize> {
        Some(VECTOR_STORED_SIZE)
    }
}
