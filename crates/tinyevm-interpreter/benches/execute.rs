//! Benchmarks for straight-line program execution.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tinyevm_interpreter::{execute_with_config, Bytecode, ExecutionConfig, ExecutionContext};

fn config() -> ExecutionConfig {
    ExecutionConfig::default()
        .with_gas_limit(10_000_000)
        .with_step_limit(10_000)
}

/// PUSH1 1, then `n` rounds of PUSH1 3, MUL, PUSH1 7, ADD
fn arithmetic_program(n: usize) -> Bytecode {
    let mut code = vec![0x60, 0x01];
    for _ in 0..n {
        code.extend([0x60, 0x03, 0x02, 0x60, 0x07, 0x01]);
    }
    code.push(0xF3);
    Bytecode::from(code)
}

/// `n` rounds of hashing the first memory word back into it
fn hashing_program(n: usize) -> Bytecode {
    let mut code = Vec::new();
    for _ in 0..n {
        // PUSH1 32, PUSH1 0, KECCAK256, PUSH1 0, MSTORE
        code.extend([0x60, 0x20, 0x60, 0x00, 0x20, 0x60, 0x00, 0x52]);
    }
    code.extend([0x60, 0x00, 0x51, 0xF3]);
    Bytecode::from(code)
}

fn bench_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("tinyevm_arithmetic");
    let ctx = ExecutionContext::default();
    let config = config();

    for rounds in [10usize, 100, 1000] {
        let code = arithmetic_program(rounds);
        group.bench_function(BenchmarkId::from_parameter(rounds), |b| {
            b.iter(|| execute_with_config(black_box(code.clone()), &config, &ctx))
        });
    }

    group.finish();
}

fn bench_hashing(c: &mut Criterion) {
    let mut group = c.benchmark_group("tinyevm_keccak");
    let ctx = ExecutionContext::default();
    let config = config();

    for rounds in [10usize, 100, 1000] {
        let code = hashing_program(rounds);
        group.bench_function(BenchmarkId::from_parameter(rounds), |b| {
            b.iter(|| execute_with_config(black_box(code.clone()), &config, &ctx))
        });
    }

    group.finish();
}

fn bench_disassemble(c: &mut Criterion) {
    let code = arithmetic_program(1000);
    c.bench_function("tinyevm_disassemble", |b| b.iter(|| black_box(&code).disassemble()));
}

criterion_group!(benches, bench_arithmetic, bench_hashing, bench_disassemble);
criterion_main!(benches);
