// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Wire constants and runtime storage policy.
//!
//! - **Level 1 (Static)**: constants fixed by the legacy record format
//! - **Level 2 (Runtime)**: [`StorageConfig`], optionally loaded from YAML

use serde::{Deserialize, Serialize};

// =======================================================================
// Record format
// =======================================================================

/// Length of the optional `u32` record size prefix.
pub const SIZE_PREFIX_LEN: usize = 4;

/// Booleans are always stored as a `u32` 0/1.
pub const BOOL_STORED_SIZE: usize = 4;

/// Vector3 is three `f32` in x/y/z order.
pub const VECTOR_STORED_SIZE: usize = 12;

/// Rotations are three `i16` (heading, pitch, bank).
pub const ROTATION_STORED_SIZE: usize = 6;

/// Radians to `i16` scale: an angle of pi maps to 32768.
pub const ROTATION_SCALE: f32 = 32768.0;

/// Separator between group and name in catalog paths.
pub const CATALOG_PATH_SEPARATOR: char = '/';

// =======================================================================
// Runtime policy
// =======================================================================

/// What to do when a record's length prefix disagrees with the schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeMismatchPolicy {
    /// Log, consume the record bytes and skip it.
    #[default]
    Skip,
    /// Keep records longer than the schema; trailing bytes are discarded.
    /// Shorter records are still skipped.
    AcceptTrailing,
}

/// Storage behavior shared by every [`crate::storage::DataStorage`] implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub size_mismatch: SizeMismatchPolicy,
}

impl StorageConfig {
    /// Lenient config accepting records with trailing bytes.
    pub fn accept_trailing() -> Self {
        Self {
            size_mismatch: SizeMismatchPolicy::AcceptTrailing,
        }
    }

    /// Parse a config from YAML text.
    ///
    /// ```yaml
    /// size_mismatch: accept_trailing
    /// ```
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_str(text: &str) -> crate::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Load a config from a YAML file.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Whether a record of `found` bytes may be decoded with a schema of `expected` bytes.
    pub(crate) fn accepts(&self, expected: usize, found: usize) -> bool {
        match self.size_mismatch {
            SizeMismatchPolicy::Skip => expected == found,
            SizeMismatchPolicy::AcceptTrailing => found >= expected,
        }
    }
}
