use zambi_nav::{NavError, NavMesh, Triad, Vec2};

const A: Vec2 = Vec2::new(0.0, 0.0);
const B: Vec2 = Vec2::new(100.0, 0.0);
const C: Vec2 = Vec2::new(100.0, 100.0);
const D: Vec2 = Vec2::new(0.0, 100.0);

fn two_triangle_mesh() -> NavMesh {
    NavMesh::from_triads(&[A, B, C, D], &[Triad::new(0, 1, 2), Triad::new(0, 2, 3)])
}

fn disconnected_mesh() -> NavMesh {
    let points = [
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(0.0, 10.0),
        Vec2::new(100.0, 100.0),
        Vec2::new(110.0, 100.0),
        Vec2::new(100.0, 110.0),
    ];
    NavMesh::from_triads(&points, &[Triad::new(0, 1, 2), Triad::new(3, 4, 5)])
}

#[test]
fn nav_mesh_edges_close_over_vertices() {
    let mesh = two_triangle_mesh();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.triangle_count(), 2);
    // The shared diagonal is stored once.
    assert_eq!(mesh.edge_count(), 5);
    assert!(mesh.edge_count() <= 3 * mesh.triangle_count());

    for e in mesh.edges() {
        assert!(mesh.contains_vertex(e.start), "dangling start {:?}", e.start);
        assert!(mesh.contains_vertex(e.end), "dangling end {:?}", e.end);
    }

    let mids = mesh.edge_midpoints();
    assert_eq!(mids.len(), mesh.edge_count());
    assert!(mids.contains(&Vec2::new(50.0, 50.0)));
}

#[test]
fn nav_mesh_keeps_only_referenced_points() {
    let stray = Vec2::new(42.0, 17.0);
    let mesh = NavMesh::from_triads(&[A, stray, B, C, A], &[Triad::new(0, 2, 3), Triad::new(4, 2, 3)]);

    assert!(!mesh.contains_vertex(stray));
    // The repeated `A` collapses into one vertex.
    assert_eq!(mesh.vertices(), &[A, B, C]);
    assert_eq!(mesh.edge_count(), 3);
}

#[test]
fn nav_mesh_dedups_nearly_coincident_edges() {
    let c_jitter = Vec2::new(100.4, 100.3);
    let mesh = NavMesh::from_triads(
        &[A, B, C, c_jitter, D],
        &[Triad::new(0, 1, 2), Triad::new(0, 3, 4)],
    );

    assert_eq!(mesh.vertex_count(), 5);
    // A-C and A-C' snap to the same key.
    assert_eq!(mesh.edge_count(), 5);
    for e in mesh.edges() {
        assert!(mesh.contains_vertex(e.start) && mesh.contains_vertex(e.end));
    }
}

#[test]
fn nav_mesh_nearest_vertex_of_a_vertex_is_itself() {
    let mesh = two_triangle_mesh();
    for v in mesh.vertices() {
        assert_eq!(mesh.nearest_vertex(*v), Some(*v));
    }
    assert_eq!(mesh.nearest_vertex(Vec2::new(90.0, 20.0)), Some(B));

    // Equidistant from A and B: the first vertex in scan order wins.
    assert_eq!(mesh.nearest_vertex(Vec2::new(50.0, -10.0)), Some(A));

    let empty = NavMesh::from_triads(&[A, B, C], &[]);
    assert!(empty.is_empty());
    assert_eq!(empty.nearest_vertex(A), None);
}

#[test]
fn nav_mesh_adjacency_requires_exact_vertex() {
    let mesh = two_triangle_mesh();

    let around_b = mesh.adjacent_vertices(B).expect("B is a vertex");
    assert_eq!(around_b, vec![A, C]);

    let around_a = mesh.adjacent_vertices(A).expect("A is a vertex");
    assert_eq!(around_a.len(), 3);

    let err = mesh
        .adjacent_vertices(Vec2::new(50.0, 50.0))
        .expect_err("midpoint is not a vertex");
    assert!(matches!(err, NavError::VertexNotFound { .. }), "unexpected: {err}");
}

#[test]
fn nav_mesh_path_crosses_shared_edge() {
    let mesh = two_triangle_mesh();
    let end = Vec2::new(5.0, 95.0);

    let mut path = mesh.find_path(B, end).expect("connected mesh");
    assert_eq!(path.len(), 3);
    assert_eq!(path.as_stack()[0], end);
    assert_eq!(path.as_stack()[1], D);

    let first = path.pop().expect("non-empty");
    assert!(first == A || first == C, "unexpected first hop {first:?}");
    assert_eq!(path.pop(), Some(D));
    assert_eq!(path.pop(), Some(end));
    assert!(path.is_empty());
}

#[test]
fn nav_mesh_path_to_own_vertex_is_just_the_goal() {
    let mesh = two_triangle_mesh();
    let end = Vec2::new(2.0, 97.0);

    let path = mesh.find_path(D, end).expect("start is the target vertex");
    assert_eq!(path.into_travel_order(), vec![end]);
}

#[test]
fn nav_mesh_path_is_deterministic() {
    let mesh = two_triangle_mesh();
    let end = Vec2::new(5.0, 95.0);
    let a = mesh.find_path(B, end).expect("path");
    let b = mesh.find_path(B, end).expect("path");
    assert_eq!(a, b);
}

#[test]
fn nav_mesh_reports_unreachable_target() {
    let mesh = disconnected_mesh();
    let err = mesh
        .find_path(Vec2::new(0.0, 0.0), Vec2::new(105.0, 105.0))
        .expect_err("islands are not connected");
    assert!(matches!(err, NavError::NoPath { .. }), "unexpected: {err}");
}

#[test]
fn nav_mesh_path_rejects_off_mesh_start() {
    let mesh = two_triangle_mesh();
    let err = mesh
        .find_path(Vec2::new(1.0, 1.0), C)
        .expect_err("start must be a vertex");
    assert!(matches!(err, NavError::VertexNotFound { .. }), "unexpected: {err}");
}

#[test]
fn nav_mesh_keeps_neighbours_of_vertices_sharing_a_grid_cell() {
    // P and P2 snap to the same edge-key cell but are distinct vertices.
    let p = Vec2::new(9.2, 50.0);
    let q = Vec2::new(100.0, 0.0);
    let r = Vec2::new(100.0, 100.0);
    let p2 = Vec2::new(10.7, 50.0);
    let mesh = NavMesh::from_triads(&[p, q, r, p2], &[Triad::new(0, 1, 2), Triad::new(3, 1, 2)]);

    assert_eq!(mesh.vertex_count(), 4);
    // Stored edges are still deduplicated by key.
    assert_eq!(mesh.edge_count(), 3);

    let around_p2 = mesh.adjacent_vertices(p2).expect("P2 is a vertex");
    assert_eq!(around_p2, vec![q, r]);
    let around_q = mesh.adjacent_vertices(q).expect("Q is a vertex");
    assert!(around_q.contains(&p) && around_q.contains(&p2) && around_q.contains(&r));

    let path = mesh.find_path(q, p2).expect("P2's triangle survived");
    assert_eq!(path.into_travel_order(), vec![p2, p2]);
}

#[test]
fn nav_mesh_empty_path_query_reports_missing_start() {
    let empty = NavMesh::from_triads(&[A, B, C], &[]);
    let err = empty.find_path(A, C).expect_err("no vertices");
    assert!(matches!(err, NavError::VertexNotFound { .. }), "unexpected: {err}");
}
