// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # proptype - schema-driven binary property records
//!
//! Runtime-described records (scalars, arrays, structs, unions) with a fixed
//! little-endian on-disk layout, plus per-object storages that keep one record
//! per integer object id.
//!
//! ## Quick Start
//!
//! ```rust
//! use proptype::storage::{DataStorage, StructStorage};
//! use proptype::{Variant, Vec3};
//! use std::io::Cursor;
//!
//! #[derive(Debug, Clone)]
//! struct Actor {
//!     hp: i32,
//!     name: String,
//!     pos: Vec3,
//! }
//!
//! impl Default for Actor {
//!     fn default() -> Self {
//!         Self { hp: 100, name: String::new(), pos: Vec3::ZERO }
//!     }
//! }
//!
//! let mut actors = StructStorage::<Actor>::builder()
//!     .field("hp", |a: &Actor| &a.hp, |a: &mut Actor| &mut a.hp)
//!     .field("name", |a: &Actor| &a.name, |a: &mut Actor| &mut a.name)
//!     .field("pos", |a: &Actor| &a.pos, |a: &mut Actor| &mut a.pos)
//!     .build()?;
//!
//! assert!(actors.create(1));
//! actors.set_field(1, "name", &Variant::from("Ian"))?;
//!
//! let mut file = Cursor::new(Vec::new());
//! actors.write_to(&mut file, 1, true)?;
//! actors.clear();
//!
//! file.set_position(0);
//! assert!(actors.read_from(&mut file, 1, true)?);
//! assert_eq!(actors.get_field(1, "hp")?, Some(Variant::Int(100)));
//! # Ok::<(), proptype::Error>(())
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Variant`] | Tagged value moved in and out of records by field name |
//! | [`Enumeration`] | Named symbols over one variant kind, optionally a bitfield |
//! | [`TypeDescriptor`] | Byte layout of a record: simple, array, struct or union nodes |
//! | [`storage::DataStorage`] | Object-id indexed record container |
//! | [`TypeCatalog`] | Grouped registry of named descriptors and enumerations |
//!
//! ## Record format
//!
//! ```text
//! [u32 record length]            present when written with a size prefix
//! <field 1><field 2>...<field N> declared field order
//! ```

pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod enumeration;
pub mod error;
pub mod serializer;
pub mod storage;
pub mod variant;

pub use catalog::TypeCatalog;
pub use config::{SizeMismatchPolicy, StorageConfig};
pub use descriptor::{FieldDef, TypeDescriptor};
pub use enumeration::{EnumField, Enumeration};
pub use error::{Error, Result};
pub use variant::{FromVariant, Variant, VariantKind};

/// Vector and rotation types carried by [`Variant`].
pub use glam::{Quat, Vec3};

/// Integer identifier of a stored object.
pub type ObjectId = i32;
