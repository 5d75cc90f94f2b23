// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

use super::*;

#[test]
fn test_kind_tags() {
    assert_eq!(Variant::default().kind(), VariantKind::Invalid);
    assert_eq!(Variant::from(true).kind(), VariantKind::Bool);
    assert_eq!(Variant::from(1.5f32).kind(), VariantKind::Float);
    assert_eq!(Variant::from(-3i32).kind(), VariantKind::Int);
    assert_eq!(Variant::from(3u32).kind(), VariantKind::UInt);
    assert_eq!(Variant::from("abc").kind(), VariantKind::String);
    assert_eq!(Variant::from(Vec3::ONE).kind(), VariantKind::Vector);
    assert_eq!(Variant::from(Quat::IDENTITY).kind(), VariantKind::Quaternion);
    assert_eq!(Variant::from(7u8).kind(), VariantKind::UInt);
    assert_eq!(Variant::from(-7i16).kind(), VariantKind::Int);
}

#[test]
fn test_numeric_conversions() {
    let f = Variant::Float(-2.75);
    assert_eq!(f.to_int().expect("float to int"), -2);
    assert!(f.to_bool().expect("float to bool"));

    let u = Variant::UInt(u32::MAX);
    assert_eq!(u.to_int().expect("uint to int"), -1);
    assert_eq!(Variant::Int(-1).to_uint().expect("int to uint"), u32::MAX);

    assert_eq!(Variant::Bool(true).to_float().expect("bool to float"), 1.0);
    assert_eq!(Variant::Int(0).to_bool().expect("int to bool"), false);
    assert_eq!(Variant::from("0x20").to_int().expect("hex string"), 32);
}

#[test]
fn test_invalid_conversions() {
    let v = Variant::Vector(Vec3::new(1.0, 2.0, 3.0));
    assert!(matches!(
        v.to_int(),
        Err(Error::InvalidConversion {
            from: VariantKind::Vector,
            to: VariantKind::Int
        })
    ));
    assert!(v.to_bool().is_err());
    assert!(Variant::Int(3).to_vector().is_err());
    assert!(Variant::Float(1.0).to_quaternion().is_err());
    assert!(Variant::Invalid.to_text().is_err());
    assert!(matches!(
        Variant::from("nope").to_float(),
        Err(Error::Parse { kind: VariantKind::Float, .. })
    ));
}

#[test]
fn test_text_round_trip() {
    let values = [
        Variant::Bool(false),
        Variant::Float(0.1),
        Variant::Int(-12345),
        Variant::UInt(4_000_000_000),
        Variant::from("plain text"),
        Variant::Vector(Vec3::new(1.5, -2.0, 1e-3)),
        Variant::Quaternion(Quat::from_xyzw(0.1, 0.2, 0.3, 0.9)),
    ];
    for value in values {
        let text = value.to_text().expect("to_text");
        let back = Variant::from_text(value.kind(), &text).expect("from_text");
        assert_eq!(back.kind(), value.kind());
        assert_eq!(back, value, "round trip of {}", text);
    }
}

#[test]
fn test_text_formats() {
    assert_eq!(Variant::Bool(true).to_string(), "true");
    assert_eq!(Variant::Vector(Vec3::new(1.0, 2.0, 3.0)).to_string(), "1, 2, 3");
    assert_eq!(Variant::Quaternion(Quat::IDENTITY).to_string(), "1, 0, 0, 0");
    assert_eq!(Variant::Invalid.to_string(), "<invalid>");
}

#[test]
fn test_from_text_errors() {
    assert!(Variant::from_text(VariantKind::Vector, "1, 2").is_err());
    assert!(Variant::from_text(VariantKind::Bool, "True").is_err());
    assert!(Variant::from_text(VariantKind::Int, "ten").is_err());
    assert!(Variant::from_text(VariantKind::Invalid, "x").is_err());
}

#[test]
fn test_compare_same_kind() {
    assert_eq!(Variant::Int(5), Variant::Int(5));
    assert_ne!(Variant::Int(5), Variant::Int(6));
    assert_eq!(Variant::Invalid, Variant::Invalid);
    assert_ne!(Variant::Invalid, Variant::Int(0));
}

#[test]
fn test_compare_is_asymmetric() {
    // Bool coerces the other side to bool
    assert_eq!(Variant::Bool(true), Variant::Int(7));
    // ...but Int converts both sides to int
    assert_ne!(Variant::Int(7), Variant::Bool(true));

    // Float truncation only happens when int is on the left
    assert_eq!(Variant::Int(2), Variant::Float(2.9));
    assert_ne!(Variant::Float(2.9), Variant::Int(2));

    // String compares the other side's text
    assert_eq!(Variant::from("3"), Variant::UInt(3));
    assert_eq!(Variant::UInt(3), Variant::from("3"));
    assert_ne!(Variant::from("03"), Variant::UInt(3));
    assert_eq!(Variant::UInt(3), Variant::from("03"));

    // Failed conversion compares unequal
    assert_ne!(Variant::Int(1), Variant::Vector(Vec3::X));
    assert_eq!(
        Variant::Vector(Vec3::new(1.0, 2.0, 3.0)),
        Variant::from("1, 2, 3")
    );
}

#[test]
fn test_convert() {
    let v = Variant::from("12").convert(VariantKind::UInt).expect("convert");
    assert!(matches!(v, Variant::UInt(12)));

    let v = Variant::Int(1).convert(VariantKind::String).expect("convert");
    assert!(matches!(v, Variant::String(ref s) if &**s == "1"));

    assert!(Variant::Quaternion(Quat::IDENTITY)
        .convert(VariantKind::Float)
        .is_err());
}

#[test]
fn test_get_native() {
    let v = Variant::from("0x10");
    assert_eq!(v.get::<u32>().expect("u32"), 16);
    assert_eq!(v.get::<u8>().expect("u8"), 16);
    assert_eq!(Variant::Float(1.25).get::<f64>().expect("f64"), 1.25);
    assert_eq!(Variant::Int(9).get::<String>().expect("string"), "9");
    assert!(Variant::Int(9).get::<Vec3>().is_err());
}

#[test]
fn test_assignment_replaces_payload() {
    let mut v = Variant::from("shared");
    let copy = v.clone();
    v = Variant::Int(3);
    assert_eq!(v.kind(), VariantKind::Int);
    assert_eq!(copy.to_text().expect("text"), "shared");
}
