// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Grouped registry of named descriptors and enumerations.
//!
//! Entries are addressed by `"group/name"` paths. A path without a separator
//! names an entry of the unnamed group `""`.
//!
//! ```rust
//! use proptype::{TypeCatalog, TypeDescriptor, VariantKind};
//!
//! let mut catalog = TypeCatalog::new();
//! let speed = TypeDescriptor::simple("speed", VariantKind::Float, 4)?.built()?;
//! catalog.add_type("physics", speed)?;
//!
//! assert_eq!(catalog.type_named("physics/speed")?.size(), 4);
//! assert!(catalog.type_named("speed").is_err());
//! # Ok::<(), proptype::Error>(())
//! ```

use crate::config::CATALOG_PATH_SEPARATOR;
use crate::descriptor::TypeDescriptor;
use crate::enumeration::Enumeration;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Group {
    types: HashMap<String, Arc<TypeDescriptor>>,
    enums: HashMap<String, Arc<Enumeration>>,
}

/// Types and enumerations grouped by name.
///
/// Built once at startup and passed by reference to whatever resolves named
/// types. Lookups hand out shared `Arc`s.
#[derive(Debug, Default)]
pub struct TypeCatalog {
    groups: BTreeMap<String, Group>,
}

/// Split `"group/name"`. A bare name belongs to group `""`.
fn split_path(path: &str) -> Result<(&str, &str)> {
    let mut parts = path.split(CATALOG_PATH_SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), None, None) => Ok(("", name)),
        (Some(group), Some(name), None) => Ok((group, name)),
        _ => Err(Error::InvalidPath(path.to_string())),
    }
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built descriptor under `group`, replacing any entry of the same name.
    pub fn add_type(&mut self, group: &str, descriptor: TypeDescriptor) -> Result<Arc<TypeDescriptor>> {
        if !descriptor.is_built() {
            return Err(Error::NotBuilt(descriptor.name().to_string()));
        }
        let name = descriptor.name().to_string();
        let descriptor = Arc::new(descriptor);
        let group_entry = self.groups.entry(group.to_string()).or_default();
        if group_entry
            .types
            .insert(name.clone(), Arc::clone(&descriptor))
            .is_some()
        {
            log::warn!("[catalog] type '{}/{}' replaced", group, name);
        } else {
            log::debug!("[catalog] type '{}/{}' registered", group, name);
        }
        Ok(descriptor)
    }

    /// Register an enumeration under `group`, replacing any entry of the same name.
    pub fn add_enum(&mut self, group: &str, enumeration: Arc<Enumeration>) -> Arc<Enumeration> {
        let name = enumeration.name().to_string();
        let group_entry = self.groups.entry(group.to_string()).or_default();
        if group_entry
            .enums
            .insert(name.clone(), Arc::clone(&enumeration))
            .is_some()
        {
            log::warn!("[catalog] enumeration '{}/{}' replaced", group, name);
        } else {
            log::debug!("[catalog] enumeration '{}/{}' registered", group, name);
        }
        enumeration
    }

    pub fn type_named(&self, path: &str) -> Result<Arc<TypeDescriptor>> {
        let (group, name) = split_path(path)?;
        self.groups
            .get(group)
            .and_then(|g| g.types.get(name))
            .cloned()
            .ok_or_else(|| Error::NotInCatalog(path.to_string()))
    }

    pub fn enum_named(&self, path: &str) -> Result<Arc<Enumeration>> {
        let (group, name) = split_path(path)?;
        self.groups
            .get(group)
            .and_then(|g| g.enums.get(name))
            .cloned()
            .ok_or_else(|| Error::NotInCatalog(path.to_string()))
    }

    /// Group names, sorted.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Type names of `group`, sorted.
    pub fn types_in(&self, group: &str) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .groups
            .get(group)
            .map(|g| g.types.keys().map(String::as_str).collect())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Drop every entry. Outstanding `Arc`s stay valid.
    pub fn clear(&mut self) {
        self.groups.clear();
    }
}
