use activeflow::{ActiveFlow2D, Parameters};
use criterion::Criterion;
use criterion::{criterion_group, criterion_main};

const SIZES: [usize; 3] = [64, 128, 256];
const SCHEMES: [&str; 3] = ["Euler Semi-Implicit", "RK3", "IMEX Runge-Kutta"];

fn params(n: usize, scheme: &str) -> Parameters {
    Parameters {
        domain_length: std::f64::consts::PI,
        collocation_points: n,
        time_stepping_scheme: scheme.to_string(),
        courant: 0.1,
        tau: 1e-7,
        iterations: 10,
        k_min: 5.0,
        k_max: 10.0,
        v_0: 1.0,
        v_ratio: 2.0,
        seed: Some(0),
    }
}

pub fn bench_stepping(c: &mut Criterion) {
    let mut group = c.benchmark_group("ActiveFlow2D");
    group.significance_level(0.1).sample_size(10);
    for n in SIZES.iter() {
        for scheme in SCHEMES.iter() {
            let mut flow = ActiveFlow2D::new(&params(*n, scheme)).unwrap();
            let name = format!("{} {}", scheme, n);
            group.bench_function(&name, |b| b.iter(|| flow.step().unwrap()));
        }
    }
    group.finish();
}

criterion_group!(benches, bench_stepping);
criterion_main!(benches);
