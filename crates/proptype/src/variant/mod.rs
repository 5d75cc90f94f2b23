// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed variant values.
//!
//! A [`Variant`] carries one value of a closed set of kinds and converts
//! between them. It is the currency of every by-name field access:
//! descriptors and storages take and return variants.
//!
//! # Equality
//!
//! Comparison is asymmetric: the left-hand side picks the kind the other side
//! is converted to.
//!
//! | Left | Rule |
//! |------|------|
//! | Bool | `left == right.to_bool()` |
//! | Float | `right.to_float() == left` |
//! | Int / UInt | both sides converted to the left kind |
//! | String | `left == right.to_text()` |
//! | Vector / Quaternion | right converted to the left kind |
//!
//! A failed conversion compares unequal.

mod parse;

#[cfg(test)]
mod tests;

use crate::error::{Error, Result};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Kind tag of a [`Variant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    Invalid,
    Bool,
    Float,
    Int,
    UInt,
    String,
    Vector,
    Quaternion,
}

impl VariantKind {
    /// Display name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Bool => "bool",
            Self::Float => "float",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::String => "string",
            Self::Vector => "vector",
            Self::Quaternion => "quaternion",
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, Default)]
pub enum Variant {
    #[default]
    Invalid,
    Bool(bool),
    Float(f32),
    Int(i32),
    UInt(u32),
    String(Arc<str>),
    Vector(Vec3),
    Quaternion(Quat),
}

impl Variant {
    /// Parse `text` as a value of `kind`.
    pub fn from_text(kind: VariantKind, text: &str) -> Result<Self> {
        Ok(match kind {
            VariantKind::Bool => Self::Bool(parse::parse_bool(text)?),
            VariantKind::Float => Self::Float(parse::parse_float(text)?),
            VariantKind::Int => Self::Int(parse::parse_int(text)?),
            VariantKind::UInt => Self::UInt(parse::parse_uint(text)?),
            VariantKind::String => Self::String(Arc::from(text)),
            VariantKind::Vector => Self::Vector(parse::parse_vector(text)?),
            VariantKind::Quaternion => Self::Quaternion(parse::parse_quaternion(text)?),
            VariantKind::Invalid => {
                return Err(Error::Parse {
                    kind,
                    text: text.to_string(),
                })
            }
        })
    }

    /// Kind of the held value.
    pub fn kind(&self) -> VariantKind {
        match self {
            Self::Invalid => VariantKind::Invalid,
            Self::Bool(_) => VariantKind::Bool,
            Self::Float(_) => VariantKind::Float,
            Self::Int(_) => VariantKind::Int,
            Self::UInt(_) => VariantKind::UInt,
            Self::String(_) => VariantKind::String,
            Self::Vector(_) => VariantKind::Vector,
            Self::Quaternion(_) => VariantKind::Quaternion,
        }
    }

    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    fn conversion_error(&self, to: VariantKind) -> Error {
        Error::InvalidConversion {
            from: self.kind(),
            to,
        }
    }

    /// Convert to bool. Numbers are true when nonzero.
    pub fn to_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(*v),
            Self::Float(v) => Ok(*v != 0.0),
            Self::Int(v) => Ok(*v != 0),
            Self::UInt(v) => Ok(*v != 0),
            Self::String(s) => parse::parse_bool(s),
            _ => Err(self.conversion_error(VariantKind::Bool)),
        }
    }

    /// Convert to i32. Floats truncate toward zero, uints reinterpret.
    pub fn to_int(&self) -> Result<i32> {
        match self {
            Self::Bool(v) => Ok(i32::from(*v)),
            Self::Float(v) => Ok(*v as i32),
            Self::Int(v) => Ok(*v),
            Self::UInt(v) => Ok(*v as i32),
            Self::String(s) => parse::parse_int(s),
            _ => Err(self.conversion_error(VariantKind::Int)),
        }
    }

    /// Convert to u32. Floats truncate toward zero, ints reinterpret.
    pub fn to_uint(&self) -> Result<u32> {
        match self {
            Self::Bool(v) => Ok(u32::from(*v)),
            Self::Float(v) => Ok(*v as u32),
            Self::Int(v) => Ok(*v as u32),
            Self::UInt(v) => Ok(*v),
            Self::String(s) => parse::parse_uint(s),
            _ => Err(self.conversion_error(VariantKind::UInt)),
        }
    }

    /// Convert to f32.
    pub fn to_float(&self) -> Result<f32> {
        match self {
            Self::Bool(v) => Ok(if *v { 1.0 } else { 0.0 }),
            Self::Float(v) => Ok(*v),
            Self::Int(v) => Ok(*v as f32),
            Self::UInt(v) => Ok(*v as f32),
            Self::String(s) => parse::parse_float(s),
            _ => Err(self.conversion_error(VariantKind::Float)),
        }
    }

    /// Render as text. The output parses back with [`Variant::from_text`].
    pub fn to_text(&self) -> Result<String> {
        match self {
            Self::Bool(v) => Ok(if *v { "true" } else { "false" }.to_string()),
            Self::Float(v) => Ok(v.to_string()),
            Self::Int(v) => Ok(v.to_string()),
            Self::UInt(v) => Ok(v.to_string()),
            Self::String(s) => Ok(s.to_string()),
            Self::Vector(v) => Ok(format!("{}, {}, {}", v.x, v.y, v.z)),
            Self::Quaternion(q) => Ok(format!("{}, {}, {}, {}", q.w, q.x, q.y, q.z)),
            Self::Invalid => Err(self.conversion_error(VariantKind::String)),
        }
    }

    /// Convert to a vector. Only vectors and `"x, y, z"` strings qualify.
    pub fn to_vector(&self) -> Result<Vec3> {
        match self {
            Self::Vector(v) => Ok(*v),
            Self::String(s) => parse::parse_vector(s),
            _ => Err(self.conversion_error(VariantKind::Vector)),
        }
    }

    /// Convert to a quaternion. Only quaternions and `"w, x, y, z"` strings qualify.
    pub fn to_quaternion(&self) -> Result<Quat> {
        match self {
            Self::Quaternion(q) => Ok(*q),
            Self::String(s) => parse::parse_quaternion(s),
            _ => Err(self.conversion_error(VariantKind::Quaternion)),
        }
    }

    /// Coerce into a variant of `kind`.
    pub fn convert(&self, kind: VariantKind) -> Result<Variant> {
        if self.kind() == kind {
            return Ok(self.clone());
        }
        Ok(match kind {
            VariantKind::Bool => Self::Bool(self.to_bool()?),
            VariantKind::Float => Self::Float(self.to_float()?),
            VariantKind::Int => Self::Int(self.to_int()?),
            VariantKind::UInt => Self::UInt(self.to_uint()?),
            VariantKind::String => Self::String(Arc::from(self.to_text()?)),
            VariantKind::Vector => Self::Vector(self.to_vector()?),
            VariantKind::Quaternion => Self::Quaternion(self.to_quaternion()?),
            VariantKind::Invalid => return Err(self.conversion_error(kind)),
        })
    }

    /// Extract a native value.
    pub fn get<T: FromVariant>(&self) -> Result<T> {
        T::from_variant(self)
    }

    /// Asymmetric equality: `other` is converted to this variant's kind.
    pub fn compare(&self, other: &Variant) -> bool {
        match self {
            Self::Invalid => matches!(other, Self::Invalid),
            Self::Bool(v) => other.to_bool().is_ok_and(|o| *v == o),
            Self::Float(v) => other.to_float().is_ok_and(|o| o == *v),
            Self::UInt(v) => other.to_uint().is_ok_and(|o| *v == o),
            Self::Int(v) => other.to_int().is_ok_and(|o| *v == o),
            Self::String(s) => other.to_text().is_ok_and(|o| **s == *o),
            Self::Vector(v) => other.to_vector().is_ok_and(|o| *v == o),
            Self::Quaternion(q) => other.to_quaternion().is_ok_and(|o| *q == o),
        }
    }
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Ok(text) => f.write_str(&text),
            Err(_) => f.write_str("<invalid>"),
        }
    }
}

// ============================================================================
// Native conversions
// ============================================================================

/// Native types that can be extracted from a [`Variant`].
pub trait FromVariant: Sized {
    /// Variant kind this type maps to.
    const KIND: VariantKind;

    fn from_variant(value: &Variant) -> Result<Self>;
}

impl FromVariant for bool {
    const KIND: VariantKind = VariantKind::Bool;

    fn from_variant(value: &Variant) -> Result<Self> {
        value.to_bool()
    }
}

impl FromVariant for String {
    const KIND: VariantKind = VariantKind::String;

    fn from_variant(value: &Variant) -> Result<Self> {
        value.to_text()
    }
}

impl FromVariant for Vec3 {
    const KIND: VariantKind = VariantKind::Vector;

    fn from_variant(value: &Variant) -> Result<Self> {
        value.to_vector()
    }
}

impl FromVariant for Quat {
    const KIND: VariantKind = VariantKind::Quaternion;

    fn from_variant(value: &Variant) -> Result<Self> {
        value.to_quaternion()
    }
}

macro_rules! numeric_variant {
    ($($ty:ty => $kind:ident, $to:ident, $wide:ty;)*) => {
        $(
            impl FromVariant for $ty {
                const KIND: VariantKind = VariantKind::$kind;

                fn from_variant(value: &Variant) -> Result<Self> {
                    Ok(value.$to()? as $ty)
                }
            }

            impl From<$ty> for Variant {
                fn from(value: $ty) -> Self {
                    Variant::$kind(value as $wide)
                }
            }
        )*
    };
}

numeric_variant! {
    f32 => Float, to_float, f32;
    f64 => Float, to_float, f32;
    i32 => Int, to_int, i32;
    i16 => Int, to_int, i32;
    i8 => Int, to_int, i32;
    u32 => UInt, to_uint, u32;
    u16 => UInt, to_uint, u32;
    u8 => UInt, to_uint, u32;
}

impl From<bool> for Variant {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Variant {
    fn from(value: &str) -> Self {
        Self::String(Arc::from(value))
    }
}

impl From<String> for Variant {
    fn from(value: String) -> Self {
        Self::String(Arc::from(value))
    }
}

impl From<Vec3> for Variant {
    fn from(value: Vec3) -> Self {
        Self::Vector(value)
    }
}

impl From<Quat> for Variant {
    fn from(value: Quat) -> Self {
        Self::Quaternion(value)
    }
}
