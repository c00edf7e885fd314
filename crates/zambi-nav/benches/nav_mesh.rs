use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zambi_nav::{NavMesh, Triad, Vec2, World, WorldConfig};

fn grid_mesh(width: usize, height: usize, cell: f32) -> NavMesh {
    let stride = width + 1;
    let mut points = Vec::with_capacity(stride * (height + 1));
    for y in 0..=height {
        for x in 0..=width {
            points.push(Vec2::new(x as f32 * cell, y as f32 * cell));
        }
    }

    let mut triads = Vec::with_capacity(width * height * 2);
    for y in 0..height {
        for x in 0..width {
            let i0 = y * stride + x;
            let i1 = i0 + 1;
            let i2 = i0 + stride + 1;
            let i3 = i0 + stride;
            triads.push(Triad::new(i0, i1, i2));
            triads.push(Triad::new(i0, i2, i3));
        }
    }
    NavMesh::from_triads(&points, &triads)
}

fn bench_nav_mesh(c: &mut Criterion) {
    let mesh = grid_mesh(64, 64, 10.0);
    let start = Vec2::new(0.0, 0.0);
    let goal = Vec2::new(637.0, 638.0);

    let mut group = c.benchmark_group("zambi-nav/navmesh");

    group.bench_function("find_path_grid", |b| {
        b.iter(|| {
            let path = mesh.find_path(start, goal).expect("path");
            black_box(path.len());
        })
    });

    group.bench_function("nearest_vertex_scan", |b| {
        b.iter(|| black_box(mesh.nearest_vertex(black_box(Vec2::new(321.5, 222.5)))))
    });

    group.finish();
}

fn bench_world(c: &mut Criterion) {
    let config = WorldConfig::default().with_seed(11);
    let world = World::generate(&config).expect("world");
    let from = Vec2::new(5.0, 5.0);
    let to = Vec2::new(790.0, 590.0);

    let mut group = c.benchmark_group("zambi-nav/world");

    group.bench_function("generate_default", |b| {
        b.iter(|| {
            let world = World::generate(black_box(&config)).expect("world");
            black_box(world.mesh().edge_count());
        })
    });

    group.bench_function("nearest_vertex_quadtree", |b| {
        b.iter(|| black_box(world.nearest_vertex(black_box(Vec2::new(400.0, 300.0)))))
    });

    // Generated worlds may leave the far corner unreachable; only the attempt is timed.
    group.bench_function("find_path_default", |b| {
        b.iter(|| black_box(world.find_path(from, to).map(|p| p.len())))
    });

    group.finish();
}

criterion_group!(benches, bench_nav_mesh, bench_world);
criterion_main!(benches);
