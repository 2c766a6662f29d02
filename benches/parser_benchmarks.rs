//! Performance benchmarks for the Opal front end.
//!
//! The suite measures three axes:
//! - Tokenization alone, on operator-dense and literal-dense input
//! - Full parsing across generated program sizes
//! - Parsing shapes: wide (many declarations) vs deep (nested blocks)

use bumpalo::Bump;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use opal::{Lexer, Parser};
use std::fmt::Write;
use std::hint::black_box;

/// A program of `n` functions, each with a loop over labels and jumps.
fn generate_program(n: usize) -> String {
    let mut source = String::new();
    source.push_str("var total: int = 0;\n");
    for i in 0..n {
        write!(
            source,
            "func step{i}(n: int, limit: int = 255): int {{\n\
             \x20   var acc: int = n * 2 + 1;\n\
             \x20   .again:\n\
             \x20   if (acc < limit) {{\n\
             \x20       acc++;\n\
             \x20       jump again;\n\
             \x20   }}\n\
             \x20   total += acc;\n\
             \x20   return acc;\n\
             }}\n"
        )
        .unwrap();
    }
    source
}

/// One expression statement nested inside `depth` blocks.
fn generate_nested(depth: usize) -> String {
    let mut source = String::new();
    source.push_str("func deep(): int {\n");
    for _ in 0..depth {
        source.push_str("{\n");
    }
    source.push_str("total += 1;\n");
    for _ in 0..depth {
        source.push_str("}\n");
    }
    source.push_str("return total;\n}\n");
    source
}

fn lexer_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    // Operator-dense: exercises the greedy longest-match probe.
    let operators = "a <<<<= b; c >>> d; e <= f && g != h; i <<< j;\n".repeat(200);
    group.throughput(Throughput::Bytes(operators.len() as u64));
    group.bench_function("operator_dense", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let (tokens, _) = Lexer::tokenize(black_box(&operators), &arena);
            black_box(tokens.len())
        });
    });

    // Literal-dense: exercises the number and string scanners.
    let literals = "x = 1_000 + 0xFF + 2.5(25); s = \"He\" 'l' \"lo\";\n".repeat(200);
    group.throughput(Throughput::Bytes(literals.len() as u64));
    group.bench_function("literal_dense", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let (tokens, _) = Lexer::tokenize(black_box(&literals), &arena);
            black_box(tokens.len())
        });
    });

    group.finish();
}

fn size_based_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/program_sizes");

    for (name, functions) in [("small_10_funcs", 10), ("medium_100_funcs", 100), ("large_500_funcs", 500)] {
        let source = generate_program(functions);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let arena = Bump::new();
                let (program, _) = Parser::parse_lenient(black_box(&source), &arena);
                black_box(program.stmts().len())
            });
        });
    }

    group.finish();
}

fn complexity_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/complexity");

    // Wide: many independent top-level declarations.
    let wide = generate_program(200);
    group.bench_function("wide_many_items", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let (program, _) = Parser::parse_lenient(black_box(&wide), &arena);
            black_box(program.stmts().len())
        });
    });

    // Deep: nested blocks stress the recursive descent.
    let deep = generate_nested(64);
    group.bench_function("deep_nesting", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let (program, _) = Parser::parse_lenient(black_box(&deep), &arena);
            black_box(program.stmts().len())
        });
    });

    // Error recovery: every other statement is malformed.
    let broken = "var x: int = ;\nnop;\nsignal;\nhalt;\n".repeat(100);
    group.bench_function("error_recovery", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let (program, diagnostics) = Parser::parse_lenient(black_box(&broken), &arena);
            black_box((program.stmts().len(), diagnostics.len()))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    lexer_benchmarks,
    size_based_benchmarks,
    complexity_benchmarks
);

criterion_main!(benches);
