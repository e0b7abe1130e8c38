//! Benchmarks for Instantiator::instantiate
//!
//! These isolate the walker on representative workloads:
//! - plain substitution into terms of growing width and depth
//! - glob splicing
//! - Put beta-reduction followed by function execution
//! - quoted terms (walk without substitution)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use atomese_instantiator::backend::{AtomSpace, Handle, Instantiator, Type, VariableMap};
use std::time::Duration;

fn var(name: &str) -> Handle {
    Handle::variable(name)
}

fn list(outgoing: Vec<Handle>) -> Handle {
    Handle::link(Type::ListLink, outgoing)
}

fn bindings(count: usize) -> VariableMap {
    (0..count)
        .map(|i| (var(&format!("$v{}", i)), Handle::concept(format!("c{}", i))))
        .collect()
}

/// Nested ListLinks `depth` deep, each level holding `$v0`.
fn nested(depth: usize) -> Handle {
    let mut term = var("$v0");
    for _ in 0..depth {
        term = list(vec![var("$v0"), term]);
    }
    term
}

/// Benchmark 1: Substitution Width
///
/// Term: (List $v0 $v1 ... $vN)
fn bench_substitution_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitution_width");
    group.measurement_time(Duration::from_secs(5));
    for count in [1usize, 4, 8, 16] {
        let vars = bindings(count);
        let expr = list((0..count).map(|i| var(&format!("$v{}", i))).collect());
        let inst = Instantiator::new(AtomSpace::new());
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| black_box(inst.instantiate(black_box(&expr), &vars)))
        });
    }
    group.finish();
}

/// Benchmark 2: Nesting Depth
fn bench_nesting_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("nesting_depth");
    group.measurement_time(Duration::from_secs(5));
    let vars = bindings(1);
    for depth in [2usize, 8, 32] {
        let expr = nested(depth);
        let inst = Instantiator::new(AtomSpace::new());
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(inst.instantiate(black_box(&expr), &vars)))
        });
    }
    group.finish();
}

/// Benchmark 3: Glob Splicing
fn bench_glob_splice(c: &mut Criterion) {
    let g = Handle::glob("$g");
    let mut vars = VariableMap::new();
    vars.insert(
        g.clone(),
        list((0..16).map(|i| Handle::concept(format!("m{}", i))).collect()),
    );
    let expr = list(vec![Handle::concept("pre"), g, Handle::concept("post")]);
    let inst = Instantiator::new(AtomSpace::new());

    c.bench_function("glob_splice", |b| {
        b.iter(|| black_box(inst.instantiate(black_box(&expr), &vars)))
    });
}

/// Benchmark 4: Put + Fold
///
/// (Put (Lambda $x (Plus $x $x 1)) (List 20))
fn bench_put_fold(c: &mut Criterion) {
    let x = var("$x");
    let lambda = Handle::link(
        Type::LambdaLink,
        vec![
            x.clone(),
            Handle::link(Type::PlusLink, vec![x.clone(), x, Handle::number(1.0)]),
        ],
    );
    let expr = Handle::link(Type::PutLink, vec![lambda, list(vec![Handle::number(20.0)])]);
    let inst = Instantiator::new(AtomSpace::new());
    let vars = VariableMap::new();

    c.bench_function("put_fold", |b| {
        b.iter(|| black_box(inst.instantiate(black_box(&expr), &vars)))
    });
}

/// Benchmark 5: Quoted Terms
fn bench_quoted(c: &mut Criterion) {
    let vars = bindings(1);
    let expr = Handle::link(Type::QuoteLink, vec![nested(16)]);
    let inst = Instantiator::new(AtomSpace::new());

    c.bench_function("quoted", |b| {
        b.iter(|| black_box(inst.instantiate(black_box(&expr), &vars)))
    });
}

criterion_group!(
    benches,
    bench_substitution_width,
    bench_nesting_depth,
    bench_glob_splice,
    bench_put_fold,
    bench_quoted,
);

criterion_main!(benches);
