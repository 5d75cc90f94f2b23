// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enumerations and bitfields over variant values.

use crate::error::{Error, Result};
use crate::variant::{Variant, VariantKind};

/// One row of [`Enumeration::field_list`].
#[derive(Debug, Clone, PartialEq)]
pub struct EnumField {
    pub name: String,
    pub value: Variant,
    pub checked: bool,
}

/// Named symbols mapped to values of a single variant kind.
///
/// A bitfield enumeration is always `uint`; its symbols are flags that
/// combine with bitwise OR.
#[derive(Debug, Clone)]
pub struct Enumeration {
    name: String,
    kind: VariantKind,
    bitfield: bool,
    /// Insertion order is preserved.
    symbols: Vec<(String, Variant)>,
}

impl Enumeration {
    /// Create an empty enumeration.
    pub fn new(name: impl Into<String>, kind: VariantKind, bitfield: bool) -> Result<Self> {
        if bitfield && kind != VariantKind::UInt {
            return Err(Error::TypeMismatch {
                expected: VariantKind::UInt,
                found: kind,
            });
        }
        Ok(Self {
            name: name.into(),
            kind,
            bitfield,
            symbols: Vec::new(),
        })
    }

    /// Create an empty bitfield.
    pub fn bitfield(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VariantKind::UInt,
            bitfield: true,
            symbols: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> VariantKind {
        self.kind
    }

    pub fn is_bitfield(&self) -> bool {
        self.bitfield
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Add a symbol. Re-inserting a known name keeps the first value.
    pub fn insert(&mut self, name: impl Into<String>, value: Variant) -> Result<()> {
        if value.kind() != self.kind {
            return Err(Error::TypeMismatch {
                expected: self.kind,
                found: value.kind(),
            });
        }
        let name = name.into();
        if self.symbols.iter().any(|(n, _)| *n == name) {
            log::debug!("[enumeration] {}: symbol '{}' already defined", self.name, name);
            return Ok(());
        }
        self.symbols.push((name, value));
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Variant>) -> Result<Self> {
        self.insert(name, value.into())?;
        Ok(self)
    }

    /// Name of the first symbol whose value equals `value`.
    pub fn symbol_for(&self, value: &Variant) -> Result<&str> {
        if value.kind() != self.kind {
            return Err(Error::TypeMismatch {
                expected: self.kind,
                found: value.kind(),
            });
        }
        self.symbols
            .iter()
            .find(|(_, v)| v.compare(value))
            .map(|(n, _)| n.as_str())
            .ok_or_else(|| Error::SymbolNotFound(format!("{}: value {}", self.name, value)))
    }

    /// Value bound to `name`.
    pub fn value_of(&self, name: &str) -> Result<&Variant> {
        self.symbols
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| Error::SymbolNotFound(format!("{}::{}", self.name, name)))
    }

    /// Symbols in insertion order.
    pub fn symbols(&self) -> impl Iterator<Item = (&str, &Variant)> {
        self.symbols.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Every symbol with a flag telling whether `value` selects it.
    ///
    /// Plain enumerations check the symbol equal to `value`; bitfields check
    /// every symbol sharing a bit with it.
    pub fn field_list(&self, value: &Variant) -> Result<Vec<EnumField>> {
        let mask = if self.bitfield { value.to_uint()? } else { 0 };
        self.symbols
            .iter()
            .map(|(name, stored)| -> Result<EnumField> {
                let checked = if self.bitfield {
                    stored.to_uint()? & mask != 0
                } else {
                    stored.compare(value)
                };
                Ok(EnumField {
                    name: name.clone(),
                    value: stored.clone(),
                    checked,
                })
            })
            .collect()
    }
}
