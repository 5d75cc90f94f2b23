// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Text parsers behind `Variant::from_text` and string conversions.

use super::VariantKind;
use crate::error::{Error, Result};
use glam::{Quat, Vec3};

fn parse_error(kind: VariantKind, text: &str) -> Error {
    Error::Parse {
        kind,
        text: text.to_string(),
    }
}

fn hex_digits(text: &str) -> Option<&str> {
    text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
}

/// `true`, `1`, `yes` / `false`, `0`, `no`. Case-sensitive.
pub(super) fn parse_bool(text: &str) -> Result<bool> {
    match text.trim() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(parse_error(VariantKind::Bool, text)),
    }
}

/// Decimal or `0x`-prefixed hexadecimal. Hex values above `i32::MAX` wrap.
pub(super) fn parse_int(text: &str) -> Result<i32> {
    let trimmed = text.trim();
    let parsed = match hex_digits(trimmed) {
        Some(digits) => u32::from_str_radix(digits, 16).map(|v| v as i32).ok(),
        None => trimmed.parse::<i32>().ok(),
    };
    parsed.ok_or_else(|| parse_error(VariantKind::Int, text))
}

/// Decimal or `0x`-prefixed hexadecimal. Negative decimals wrap.
pub(super) fn parse_uint(text: &str) -> Result<u32> {
    let trimmed = text.trim();
    let parsed = match hex_digits(trimmed) {
        Some(digits) => u32::from_str_radix(digits, 16).ok(),
        None => trimmed
            .parse::<u32>()
            .ok()
            .or_else(|| trimmed.parse::<i32>().ok().map(|v| v as u32)),
    };
    parsed.ok_or_else(|| parse_error(VariantKind::UInt, text))
}

pub(super) fn parse_float(text: &str) -> Result<f32> {
    text.trim()
        .parse::<f32>()
        .map_err(|_| parse_error(VariantKind::Float, text))
}

/// Longest numeric prefix of `text`, ignoring leading whitespace.
fn leading_float(text: &str) -> Option<f32> {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
        .unwrap_or(text.len());
    let candidate = &text[..end];
    (1..=candidate.len())
        .rev()
        .find_map(|len| candidate[..len].parse::<f32>().ok())
}

/// First `N` comma-separated numbers. Anything after the last one is ignored.
fn components<const N: usize>(kind: VariantKind, text: &str) -> Result<[f32; N]> {
    let mut out = [0.0; N];
    let mut parts = text.splitn(N, ',');
    for slot in &mut out {
        let part = parts.next().ok_or_else(|| parse_error(kind, text))?;
        *slot = leading_float(part).ok_or_else(|| parse_error(kind, text))?;
    }
    Ok(out)
}

/// `"x, y, z"`.
pub(super) fn parse_vector(text: &str) -> Result<Vec3> {
    let [x, y, z] = components::<3>(VariantKind::Vector, text)?;
    Ok(Vec3::new(x, y, z))
}

/// `"w, x, y, z"`.
pub(super) fn parse_quaternion(text: &str) -> Result<Quat> {
    let [w, x, y, z] = components::<4>(VariantKind::Quaternion, text)?;
    Ok(Quat::from_xyzw(x, y, z, w))
}
