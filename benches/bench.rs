use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dpll_sat::sat::cnf::Cnf;
use dpll_sat::sat::dpll::Dpll;
use dpll_sat::sat::solver::{Solver, SolverConfig};
use std::hint::black_box;
use std::time::Duration;

/// Uniform random 3-SAT with distinct variables per clause.
fn random_3sat(rng: &mut fastrand::Rng, num_vars: usize, num_clauses: usize) -> Cnf {
    let clauses: Vec<Vec<i32>> = (0..num_clauses)
        .map(|_| {
            let mut vars: Vec<i32> = Vec::with_capacity(3);
            while vars.len() < 3 {
                let v = rng.i32(1..=num_vars as i32);
                if !vars.contains(&v) {
                    vars.push(v);
                }
            }
            vars.into_iter()
                .map(|v| if rng.bool() { v } else { -v })
                .collect()
        })
        .collect();
    Cnf::from_dimacs(num_vars, &clauses)
}

/// `holes + 1` pigeons into `holes` holes; always unsatisfiable.
fn pigeonhole(holes: usize) -> Cnf {
    let pigeons = holes + 1;
    let var = |p: usize, h: usize| (p * holes + h + 1) as i32;
    let mut clauses = Vec::new();

    for p in 0..pigeons {
        clauses.push((0..holes).map(|h| var(p, h)).collect());
    }
    for h in 0..holes {
        for p in 0..pigeons {
            for q in p + 1..pigeons {
                clauses.push(vec![-var(p, h), -var(q, h)]);
            }
        }
    }
    Cnf::from_dimacs(pigeons * holes, &clauses)
}

fn solve(cnf: &Cnf) {
    let mut solver = Dpll::new(cnf.clone(), SolverConfig::default());
    black_box(solver.solve().expect("model verification failed"));
}

fn bench_random_3sat(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_3sat");
    group.measurement_time(Duration::from_secs(10));

    for &num_vars in &[20_usize, 50, 75] {
        // Ratio near the satisfiability threshold.
        let num_clauses = num_vars * 426 / 100;
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        let instances: Vec<Cnf> = (0..8)
            .map(|_| random_3sat(&mut rng, num_vars, num_clauses))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(num_vars), &instances, |b, instances| {
            b.iter(|| instances.iter().for_each(solve));
        });
    }
    group.finish();
}

fn bench_pigeonhole(c: &mut Criterion) {
    let mut group = c.benchmark_group("pigeonhole");
    group.sample_size(10);

    for holes in 4..=6 {
        let cnf = pigeonhole(holes);
        group.bench_with_input(BenchmarkId::from_parameter(holes), &cnf, |b, cnf| {
            b.iter(|| solve(cnf));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_random_3sat, bench_pigeonhole);
criterion_main!(benches);
