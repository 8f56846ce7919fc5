//! Benchmarks for consistency enforcement and full solves.
//!
//! The puzzles are the samples under `data/`.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench solver
//! ```

use std::hint;

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use crossfill_core::{Crossword, Structure, Vocabulary};
use crossfill_solver::{
    CrosswordSolver, DomainStore, SearchConfig,
    consistency::{
        ConsistencyEngine, NodeConsistency, Propagator as _, ac3, enforce_node_consistency,
    },
};

const PUZZLES: [(&str, &str, &str); 2] = [
    (
        "structure0",
        include_str!("../../../data/structure0.txt"),
        include_str!("../../../data/words0.txt"),
    ),
    (
        "structure1",
        include_str!("../../../data/structure1.txt"),
        include_str!("../../../data/words1.txt"),
    ),
];

fn crosswords() -> Vec<(&'static str, Crossword)> {
    PUZZLES
        .iter()
        .map(|&(name, structure, words)| {
            let structure = structure.parse::<Structure>().unwrap();
            (name, Crossword::new(structure, Vocabulary::parse(words)))
        })
        .collect()
}

fn bench_node_consistency(c: &mut Criterion) {
    let propagator = NodeConsistency::new();
    for (param, crossword) in crosswords() {
        c.bench_with_input(
            BenchmarkId::new("node_consistency", param),
            &crossword,
            |b, crossword| {
                b.iter_batched_ref(
                    || DomainStore::new(crossword),
                    |store| hint::black_box(propagator.apply(store).unwrap()),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_ac3(c: &mut Criterion) {
    for (param, crossword) in crosswords() {
        c.bench_with_input(BenchmarkId::new("ac3", param), &crossword, |b, crossword| {
            b.iter_batched_ref(
                || {
                    let mut store = DomainStore::new(crossword);
                    enforce_node_consistency(&mut store);
                    store
                },
                |store| hint::black_box(ac3(store, None).unwrap()),
                BatchSize::SmallInput,
            );
        });
    }
}

fn bench_solve(c: &mut Criterion) {
    let solvers = [
        ("plain", CrosswordSolver::default()),
        (
            "mac",
            CrosswordSolver::new(
                ConsistencyEngine::with_all_propagators(),
                SearchConfig::new().with_maintain_arc_consistency(true),
            ),
        ),
    ];
    for (param, crossword) in crosswords() {
        for (variant, solver) in &solvers {
            c.bench_with_input(
                BenchmarkId::new(format!("solve_{variant}"), param),
                &crossword,
                |b, crossword| {
                    b.iter(|| {
                        let solution = solver.solve(hint::black_box(crossword)).unwrap();
                        hint::black_box(solution.is_solved())
                    });
                },
            );
        }
    }
}

criterion_group!(benches, bench_node_consistency, bench_ac3, bench_solve);
criterion_main!(benches);
