// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::*;
use glam::Vec3;

fn int(name: &str) -> TypeDescriptor {
    TypeDescriptor::simple(name, VariantKind::Int, 4).expect("int leaf")
}

fn float(name: &str) -> TypeDescriptor {
    TypeDescriptor::simple(name, VariantKind::Float, 4).expect("float leaf")
}

fn vec3(name: &str) -> TypeDescriptor {
    TypeDescriptor::simple(name, VariantKind::Vector, 12).expect("vector leaf")
}

#[test]
fn test_struct_offsets_accumulate() {
    let mut s = TypeDescriptor::structure("S", vec![int("a"), vec3("b"), float("c")]).expect("struct");
    s.build().expect("build");
    assert_eq!(s.size(), 20);
    let offsets: Vec<(&str, usize)> = s
        .fields()
        .expect("fields")
        .iter()
        .map(|f| (f.name(), f.offset()))
        .collect();
    assert_eq!(offsets, vec![("a", 0), ("b", 4), ("c", 16)]);
    assert!(s.is_struct());
    assert!(!s.is_union());
    assert_eq!(s.kind(), VariantKind::Invalid);
}

#[test]
fn test_defaults_populate_record() {
    let hp = int("hp").with_default(42).expect("default");
    let slots = TypeDescriptor::array(float("slot").with_default(0.0f32).expect("default"), 3)
        .expect("array");
    let mut s = TypeDescriptor::structure("Actor", vec![hp, slots]).expect("struct");
    s.build().expect("build");

    let mut record = vec![0xFFu8; s.size()];
    s.to_defaults(&mut record).expect("defaults");
    assert_eq!(s.get(&record, "hp").expect("hp"), Variant::Int(42));
    for i in 0..3 {
        let name = format!("slot[{}]", i);
        assert_eq!(s.get(&record, &name).expect("slot"), Variant::Float(0.0));
    }
}

#[test]
fn test_union_members_alias_offset_zero() {
    let small = TypeDescriptor::simple("small", VariantKind::UInt, 2).expect("small");
    let big = TypeDescriptor::simple("big", VariantKind::UInt, 4).expect("big");
    let mut u = TypeDescriptor::union("U", vec![small, big]).expect("union");
    u.build().expect("build");

    assert!(u.is_union());
    assert_eq!(u.size(), 4);
    assert_eq!(u.field_def("small").expect("small").offset(), 0);
    assert_eq!(u.field_def("big").expect("big").offset(), 0);

    let mut record = u.default_record().expect("record");
    u.set(&mut record, "big", &Variant::UInt(0x1234_5678)).expect("set big");
    assert_eq!(u.get(&record, "small").expect("small"), Variant::UInt(0x5678));
}

#[test]
fn test_nested_names() {
    let pos = TypeDescriptor::structure("pos", vec![float("x"), float("y")]).expect("pos");
    let waypoints = TypeDescriptor::array(pos.alias("wp"), 2).expect("array");
    let tags = TypeDescriptor::array(int("tag"), 2).expect("tags");
    let mut root = TypeDescriptor::structure("Root", vec![pos, waypoints, tags]).expect("root");
    root.build().expect("build");

    let names: Vec<&str> = root.fields().expect("fields").iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        vec!["pos.x", "pos.y", "wp[0].x", "wp[0].y", "wp[1].x", "wp[1].y", "tag[0]", "tag[1]"]
    );
    assert_eq!(root.field_def("wp[1].y").expect("wp").offset(), 20);
    assert_eq!(root.field_def("tag[1]").expect("tag").offset(), 28);
}

#[test]
fn test_duplicate_flattened_name_rejected() {
    let err = TypeDescriptor::structure("Dup", vec![int("a"), float("a")]).expect_err("duplicate");
    assert!(matches!(err, Error::InvalidDefinition { .. }));
}

#[test]
fn test_get_before_build_fails_fast() {
    let s = TypeDescriptor::structure("S", vec![int("a")]).expect("struct");
    let record = vec![0u8; s.size()];
    assert!(matches!(s.get(&record, "a"), Err(Error::NotBuilt(_))));
    assert!(matches!(s.to_defaults(&mut vec![0u8; 4]), Err(Error::NotBuilt(_))));
}

#[test]
fn test_unknown_field() {
    let s = TypeDescriptor::structure("S", vec![int("a")])
        .and_then(TypeDescriptor::built)
        .expect("struct");
    let record = s.default_record().expect("record");
    assert!(matches!(s.get(&record, "b"), Err(Error::FieldNotFound(_))));
}

#[test]
fn test_set_coerces_then_mismatches() {
    let s = TypeDescriptor::structure("S", vec![int("a"), vec3("v")])
        .and_then(TypeDescriptor::built)
        .expect("struct");
    let mut record = s.default_record().expect("record");

    s.set(&mut record, "a", &Variant::from("17")).expect("string coerces to int");
    assert_eq!(s.get(&record, "a").expect("a"), Variant::Int(17));

    s.set(&mut record, "v", &Variant::from("1, 2, 3")).expect("string coerces to vector");
    assert_eq!(s.get(&record, "v").expect("v"), Variant::Vector(Vec3::new(1.0, 2.0, 3.0)));

    let err = s
        .set(&mut record, "a", &Variant::Vector(Vec3::ONE))
        .expect_err("vector is not an int");
    assert!(matches!(
        err,
        Error::TypeMismatch {
            expected: VariantKind::Int,
            found: VariantKind::Vector
        }
    ));
}

#[test]
fn test_short_buffer_is_size_mismatch() {
    let s = TypeDescriptor::structure("S", vec![int("a"), int("b")])
        .and_then(TypeDescriptor::built)
        .expect("struct");
    let record = vec![0u8; 4];
    assert!(matches!(
        s.get(&record, "a"),
        Err(Error::SizeMismatch { expected: 8, found: 4 })
    ));
}

#[test]
fn test_default_locked_after_build() {
    let mut leaf = int("a");
    leaf.set_default(5).expect("before build");
    leaf.build().expect("build");
    assert!(matches!(leaf.set_default(6), Err(Error::AlreadyBuilt(_))));

    let mut s = TypeDescriptor::structure("S", vec![int("b")]).expect("struct");
    assert!(matches!(s.set_default(1), Err(Error::InvalidDefinition { .. })));
}

#[test]
fn test_alias_shares_shape_keeps_own_default() {
    let base = int("base").with_default(1).expect("default");
    let alias = base.alias("renamed").with_default(2).expect("alias default");
    assert_eq!(alias.name(), "renamed");
    assert_eq!(alias.size(), base.size());
    assert_eq!(base.default_value(), Some(&Variant::Int(1)));
    assert_eq!(alias.default_value(), Some(&Variant::Int(2)));
    assert!(!alias.is_built());
}

#[test]
fn test_simple_root_accepts_empty_name() {
    let leaf = float("speed")
        .with_default(3.5f32)
        .and_then(TypeDescriptor::built)
        .expect("leaf");
    let record = leaf.default_record().expect("record");
    assert_eq!(leaf.get(&record, "").expect("empty name"), Variant::Float(3.5));
    assert_eq!(leaf.get(&record, "speed").expect("own name"), Variant::Float(3.5));
}

#[test]
fn test_enumerated_leaf() {
    let flags = Arc::new(
        Enumeration::bitfield("Flags")
            .with("A", 1u32)
            .and_then(|e| e.with("B", 2u32))
            .expect("flags"),
    );
    let leaf = TypeDescriptor::enumerated("flags", Arc::clone(&flags), 4).expect("leaf");
    assert!(leaf.is_enumerated());
    assert_eq!(leaf.kind(), VariantKind::UInt);
    assert_eq!(leaf.enumeration().map(|e| e.name()), Some("Flags"));

    let bad = TypeDescriptor::enumerated("flags", flags, 12);
    assert!(bad.is_err());
}

#[test]
fn test_invalid_shapes() {
    assert!(TypeDescriptor::array(int("a"), 0).is_err());
    assert!(TypeDescriptor::structure("Empty", vec![]).is_err());
    assert!(TypeDescriptor::simple("f", VariantKind::Float, 3).is_err());
}
