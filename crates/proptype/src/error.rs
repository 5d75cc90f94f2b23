// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for variants, descriptors and storages.

use crate::variant::VariantKind;
use thiserror::Error;

/// Errors raised by the property engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Value kind disagrees with the declared kind and coercion failed.
    #[error("Type mismatch: expected {expected}, got {found}")]
    TypeMismatch {
        expected: VariantKind,
        found: VariantKind,
    },

    /// The source kind cannot produce the requested kind.
    #[error("Invalid conversion from {from} to {to}")]
    InvalidConversion { from: VariantKind, to: VariantKind },

    /// Text could not be read as a value of the given kind.
    #[error("Cannot parse {text:?} as {kind}")]
    Parse { kind: VariantKind, text: String },

    /// Unknown field name.
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    /// Unknown enumeration symbol or value.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Field access on a descriptor whose field cache was never built.
    #[error("Descriptor '{0}' used before build()")]
    NotBuilt(String),

    /// Definition change on a descriptor that is already built.
    #[error("Descriptor '{0}' is built and can no longer change")]
    AlreadyBuilt(String),

    /// Stored record length disagrees with the schema.
    #[error("Size mismatch: schema needs {expected} bytes, record has {found}")]
    SizeMismatch { expected: usize, found: usize },

    /// Malformed descriptor or enumeration definition.
    #[error("Invalid definition of '{name}': {reason}")]
    InvalidDefinition { name: String, reason: String },

    /// Catalog lookup failed.
    #[error("Not in catalog: {0}")]
    NotInCatalog(String),

    /// Malformed catalog path.
    #[error("Invalid catalog path: {0}")]
    InvalidPath(String),

    /// Underlying stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be decoded.
    #[cfg(feature = "config-loaders")]
    #[error("Config error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn invalid_definition(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
