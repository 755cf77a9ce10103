//! Benchmarks for circuit construction and depth.
//!
//! Run with: cargo bench -p qplay-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qplay_ir::{Circuit, CircuitData, GateData};

/// Layered H + CNOT-ladder description over `n` qubits.
fn ladder(n: i64, layers: usize) -> CircuitData {
    let mut gates = Vec::new();
    for _ in 0..layers {
        for q in 0..n {
            gates.push(GateData::new("H", [q]));
        }
        for q in 0..n - 1 {
            gates.push(GateData::new("CNOT", [q, q + 1]));
        }
    }
    CircuitData { qubits: n, gates }
}

fn bench_from_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_data");

    for num_qubits in &[2i64, 5, 10, 20] {
        let data = ladder(*num_qubits, 10);
        group.bench_with_input(BenchmarkId::new("ladder", num_qubits), &data, |b, data| {
            b.iter(|| Circuit::from_data(black_box(data)).unwrap());
        });
    }

    group.finish();
}

fn bench_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth");

    for num_qubits in &[5i64, 10, 20] {
        let circuit = Circuit::from_data(&ladder(*num_qubits, 20)).unwrap();
        group.bench_with_input(
            BenchmarkId::new("ladder", num_qubits),
            &circuit,
            |b, circuit| {
                b.iter(|| black_box(circuit).depth());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_from_data, bench_depth);
criterion_main!(benches);
