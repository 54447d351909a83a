//! Benchmarks for insphere implementations.
//!
//! Compares the plain determinant, the adaptive cascade, the exact expansion
//! evaluation and the geometry-predicates crate on random and nearly
//! cospherical inputs.

use adaptive_predicates::{Coord3, Sign, insphere, insphere_exact, insphere_fast};
use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const LCG_A: u64 = 6364136223846793005;
const LCG_C: u64 = 1;

type TestCases = Vec<[Coord3; 5]>;

fn gp_insphere(p: &[Coord3; 5]) -> i8 {
    let raw = |c: &Coord3| [c.x, c.y, c.z];
    let det = geometry_predicates::insphere(
        raw(&p[0]),
        raw(&p[1]),
        raw(&p[2]),
        raw(&p[3]),
        raw(&p[4]),
    );
    Sign::of(det).as_i32() as i8
}

fn adaptive_insphere(p: &[Coord3; 5]) -> i8 {
    Sign::of(insphere(&p[0], &p[1], &p[2], &p[3], &p[4])).as_i32() as i8
}

fn exact_insphere(p: &[Coord3; 5]) -> i8 {
    Sign::of(insphere_exact(&p[0], &p[1], &p[2], &p[3], &p[4])).as_i32() as i8
}

fn naive_insphere(p: &[Coord3; 5]) -> i8 {
    Sign::of(insphere_fast(&p[0], &p[1], &p[2], &p[3], &p[4])).as_i32() as i8
}

fn generate_random_cases(count: usize) -> TestCases {
    let mut state = 0x0fed_cba9_8765_4321u64;
    (0..count)
        .map(|_| {
            std::array::from_fn(|_| Coord3::new(lcg(&mut state), lcg(&mut state), lcg(&mut state)))
        })
        .collect()
}

/// Points on a sphere of radius 100, with the query point nudged off it.
fn generate_near_cospherical_cases(count: usize) -> TestCases {
    let centre = Coord3::new(13.5, -7.25, 2.125);
    let on_sphere =
        |x: f64, y: f64, z: f64| Coord3::new(centre.x + x, centre.y + y, centre.z + z);
    (0..count)
        .map(|i| {
            let eps = 1e-13 * (i as f64 + 1.0);
            [
                on_sphere(100.0, 0.0, 0.0),
                on_sphere(0.0, 100.0, 0.0),
                on_sphere(0.0, 0.0, 100.0),
                on_sphere(-100.0, 0.0, 0.0),
                on_sphere(eps, -100.0 + eps, eps),
            ]
        })
        .collect()
}

fn bench_insphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("insphere");
    let batch_size = BatchSize::SmallInput;

    let random_cases = generate_random_cases(100);
    let near_cospherical_cases = generate_near_cospherical_cases(100);

    let make_setup = |cases: TestCases| {
        let mut idx = 0usize;
        move || {
            let sample = cases[idx % cases.len()];
            idx = idx.wrapping_add(1);
            sample
        }
    };

    let contenders: [(&str, fn(&[Coord3; 5]) -> i8); 4] = [
        ("naive_f64", naive_insphere),
        ("adaptive", adaptive_insphere),
        ("exact", exact_insphere),
        ("geometry_predicates", gp_insphere),
    ];

    for (name, predicate) in contenders {
        group.bench_function(format!("{name}_random"), |bencher| {
            bencher.iter_batched(
                make_setup(random_cases.clone()),
                |points| black_box(predicate(&points)),
                batch_size,
            )
        });
        group.bench_function(format!("{name}_near_cospherical"), |bencher| {
            bencher.iter_batched(
                make_setup(near_cospherical_cases.clone()),
                |points| black_box(predicate(&points)),
                batch_size,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insphere);
criterion_main!(benches);

fn lcg(state: &mut u64) -> f64 {
    *state = state.wrapping_mul(LCG_A).wrapping_add(LCG_C);
    let val = ((*state >> 32) as f64) / (u32::MAX as f64);
    (val * 2000.0) - 1000.0
}
