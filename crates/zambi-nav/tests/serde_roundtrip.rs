#![cfg(feature = "serde")]

use zambi_nav::{NavMesh, OrientedRect, Rect, Triad, Vec2, WorldConfig};

fn strip_mesh() -> NavMesh {
    let points = [
        Vec2::new(0.0, 0.0),
        Vec2::new(40.0, 0.0),
        Vec2::new(40.0, 30.0),
        Vec2::new(0.0, 30.0),
        Vec2::new(80.0, 0.0),
        Vec2::new(80.0, 30.0),
    ];
    NavMesh::from_triads(
        &points,
        &[
            Triad::new(0, 1, 2),
            Triad::new(0, 2, 3),
            Triad::new(1, 4, 5),
            Triad::new(1, 5, 2),
        ],
    )
}

#[test]
fn nav_mesh_roundtrips_via_serde() {
    let mesh = strip_mesh();

    let json = serde_json::to_string(&mesh).expect("serialize navmesh");
    let mesh2: NavMesh = serde_json::from_str(&json).expect("deserialize navmesh");

    assert_eq!(mesh.vertices(), mesh2.vertices());
    assert_eq!(mesh.triads(), mesh2.triads());
    assert_eq!(mesh.edges(), mesh2.edges());

    let start = Vec2::new(0.0, 30.0);
    let goal = Vec2::new(78.0, 28.0);
    let path1 = mesh.find_path(start, goal).expect("path");
    let path2 = mesh2.find_path(start, goal).expect("path");
    assert_eq!(path1, path2);
}

#[test]
fn oriented_rect_rebuilds_corners_on_deserialize() {
    let rect = OrientedRect::new(Rect::new(12, 34, 20, 11), 1.25);

    let json = serde_json::to_string(&rect).expect("serialize rect");
    assert!(!json.contains("corners"), "derived corners are not stored: {json}");

    let back: OrientedRect = serde_json::from_str(&json).expect("deserialize rect");
    assert_eq!(back, rect);

    let bad = r#"{"base":{"x":0,"y":0,"width":0,"height":5},"rotation":0.0}"#;
    assert!(serde_json::from_str::<OrientedRect>(bad).is_err());
}

#[test]
fn world_config_fills_missing_fields_with_defaults() {
    let config: WorldConfig =
        serde_json::from_str(r#"{"width":320,"seed":9}"#).expect("partial config");
    assert_eq!(config.width, 320);
    assert_eq!(config.seed, 9);
    assert_eq!(config.height, WorldConfig::default().height);
    assert_eq!(config.obstacle_count, WorldConfig::default().obstacle_count);

    let json = serde_json::to_string(&config).expect("serialize config");
    let back: WorldConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(back, config);
}
