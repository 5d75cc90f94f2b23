// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! String codecs.

use super::fixed::Plain;
use super::Serializer;
use crate::config::SIZE_PREFIX_LEN;
use crate::error::Result;
use std::io::{self, Read, Write};

/// Invalid UTF-8 in legacy data is replaced, not rejected.
pub(crate) fn decode_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

/// Longest prefix of `text` that fits a `size`-byte buffer with its NUL terminator.
pub fn truncate_nul(text: &str, size: usize) -> &str {
    let mut end = text.len().min(size.saturating_sub(1));
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// `u32` length prefix followed by the raw bytes, no terminator.
#[derive(Debug, Clone, Copy, Default)]
pub struct VarStringSerializer;

impl Serializer for VarStringSerializer {
    type Value = String;

    fn serialize(&self, out: &mut dyn Write, value: &String) -> Result<()> {
        let len = u32::try_from(value.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "string longer than u32"))?;
        len.write_le(out)?;
        out.write_all(value.as_bytes())?;
        Ok(())
    }

    fn deserialize(&self, input: &mut dyn Read, value: &mut String) -> Result<()> {
        let len = u64::from(u32::read_le(input)?);
        // grows with the data actually present, a corrupt length cannot over-allocate
        let mut bytes = Vec::new();
        input.take(len).read_to_end(&mut bytes)?;
        if bytes.len() as u64 != len {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        *value = decode_text(bytes);
        Ok(())
    }

    fn stored_size(&self, value: &String) -> usize {
        SIZE_PREFIX_LEN + value.len()
    }

    fn fixed_size(&self) -> Option<usize> {
        None
    }
}

/// Fixed `N`-byte buffer, NUL terminated.
///
/// Longer strings are cut to `N - 1` bytes on a character boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedStringSerializer<const N: usize>;

impl<const N: usize> FixedStringSerializer<N> {
    /// Longest prefix of `text` that fits with its terminator.
    pub fn truncate(text: &str) -> &str {
        truncate_nul(text, N)
    }
}

impl<const N: usize> Serializer for FixedStringSerializer<N> {
    type Value = String;

    fn serialize(&self, out: &mut dyn Write, value: &String) -> Result<()> {
        let mut buffer = vec![0u8; N];
        let text = Self::truncate(value);
        buffer[..text.len()].copy_from_slice(text.as_bytes());
        out.write_all(&buffer)?;
        Ok(())
    }

    fn deserialize(&self, input: &mut dyn Read, value: &mut String) -> Result<()> {
        let mut buffer = vec![0u8; N];
        input.read_exact(&mut buffer)?;
        let end = buffer.iter().position(|&b| b == 0).unwrap_or(N);
        buffer.truncate(end);
        *value = decode_text(buffer);
        Ok(())
    }

    fn stored_size(&self, _value: &String) -> usize {
        N
    }

    fn fixed_size(&self) -> Option<usize> {
        Some(N)
    }
}
