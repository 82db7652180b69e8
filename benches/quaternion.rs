use criterion::{Criterion, black_box, criterion_group, criterion_main};
use nalgebra::Vector3;
use rigid_rotation::{EulerOrder, Quaternion};

fn oblique_rotation(angle: f64) -> Quaternion<f64> {
    Quaternion::from_axis_angle(&Vector3::new(2.0, 3.0, -6.0).normalize(), angle)
}

pub fn bench_quaternion_product(c: &mut Criterion) {
    let a = oblique_rotation(0.7);
    let b = oblique_rotation(-2.1);
    c.bench_function("quaternion_product", |bencher| {
        bencher.iter(|| black_box(black_box(a) * black_box(b)))
    });
}

pub fn bench_rotate_vector(c: &mut Criterion) {
    let quat = oblique_rotation(1.3);
    let v = Vector3::new(0.5, -1.0, 2.0);
    c.bench_function("rotate_vector", |b| {
        b.iter(|| black_box(quat).rotate(black_box(&v)))
    });
}

pub fn bench_rotation_matrix_round_trip(c: &mut Criterion) {
    let quat = oblique_rotation(2.8);
    c.bench_function("rotation_matrix_round_trip", |b| {
        b.iter(|| Quaternion::from_rotation_matrix(&black_box(quat).to_rotation_matrix()))
    });
}

pub fn bench_from_euler(c: &mut Criterion) {
    let angles = Vector3::new(0.3, -1.1, 2.2);
    c.bench_function("from_euler", |b| {
        b.iter(|| Quaternion::from_euler(black_box(&angles), EulerOrder::ZYX))
    });
}

pub fn bench_slerp(c: &mut Criterion) {
    let a = oblique_rotation(0.2);
    let b = oblique_rotation(2.4);
    c.bench_function("slerp", |bencher| {
        bencher.iter(|| {
            for step in 0..100 {
                let t = f64::from(step) / 100.0;
                black_box(Quaternion::slerp(&a, &b, black_box(t), true));
            }
        })
    });
}

pub fn bench_angular_displacement(c: &mut Criterion) {
    let a = oblique_rotation(0.9);
    let b = oblique_rotation(-0.4);
    c.bench_function("angular_displacement", |bencher| {
        bencher.iter(|| Quaternion::angular_displacement(black_box(&a), black_box(&b)))
    });
}

criterion_group!(
    benches,
    bench_quaternion_product,
    bench_rotate_vector,
    bench_rotation_matrix_round_trip,
    bench_from_euler,
    bench_slerp,
    bench_angular_displacement
);
criterion_main!(benches);
