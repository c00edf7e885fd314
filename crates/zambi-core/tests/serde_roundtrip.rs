#![cfg(feature = "serde")]

use zambi_core::{Rect, Vec2};

#[test]
fn geometry_roundtrips_via_serde() {
    let p = Vec2::new(12.5, -3.25);
    let json = serde_json::to_string(&p).expect("serialize vec2");
    assert_eq!(json, r#"{"x":12.5,"y":-3.25}"#);
    let back: Vec2 = serde_json::from_str(&json).expect("deserialize vec2");
    assert_eq!(back, p);

    let r = Rect::new(4, 8, 15, 16);
    let json = serde_json::to_string(&r).expect("serialize rect");
    let back: Rect = serde_json::from_str(&json).expect("deserialize rect");
    assert_eq!(back, r);
}
