//! Benchmarks for the Lyra lexer and parser.
//!
//! Run with: `cargo bench --package lyra-parser`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use lyra_parser::parse;
use lyra_source::DiagnosticSink;

const SIMPLE_EXPRESSION: &str = "println(1 + 2 * 3 - 4 / 2);";

const FACTORIAL: &str = r"
fun factorial(n) {
    if n <= 1 {
        return 1;
    }
    return n * factorial(n - 1);
}
println(factorial(10));
";

const MANY_DECLARATIONS: &str = r"
let a = 1;
let b = 2;
let c = 3;
fun add(x: Int, y: Int) -> Int {
    return x + y;
}
println(add(a, add(b, c)));
";

fn bench_simple_expression(c: &mut Criterion) {
    c.bench_function("parse simple expression", |b| {
        b.iter(|| {
            let mut diagnostics = DiagnosticSink::new();
            black_box(parse(black_box(SIMPLE_EXPRESSION), &mut diagnostics));
        });
    });
}

fn bench_recursive_function(c: &mut Criterion) {
    c.bench_function("parse recursive function", |b| {
        b.iter(|| {
            let mut diagnostics = DiagnosticSink::new();
            black_box(parse(black_box(FACTORIAL), &mut diagnostics));
        });
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse scaling");
    for repeats in [1usize, 10, 100] {
        let source = MANY_DECLARATIONS.repeat(repeats);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeats), &source, |b, source| {
            b.iter(|| {
                let mut diagnostics = DiagnosticSink::new();
                black_box(parse(black_box(source), &mut diagnostics));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_simple_expression, bench_recursive_function, bench_scaling);
criterion_main!(benches);
