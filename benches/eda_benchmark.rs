//! EDA Benchmarks
//!
//! CSV loading, table summaries and correlation on generated tables.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use pandrs_eda::config::CsvOptions;
use pandrs_eda::io::read_csv_bytes;
use pandrs_eda::stats;
use pandrs_eda::vis::ChartSelector;

/// Generate a CSV with `n_numeric` float columns and one categorical column
fn generate_csv(n_rows: usize, n_numeric: usize) -> Vec<u8> {
    // Simple LCG random generator for reproducibility
    let mut rng_state: u64 = 42;
    let mut rand_f64 = || -> f64 {
        rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (rng_state >> 33) as f64 / (u32::MAX as f64)
    };

    let mut out = String::new();
    let header: Vec<String> = (0..n_numeric)
        .map(|i| format!("f{}", i))
        .chain(std::iter::once("category".to_string()))
        .collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for row in 0..n_rows {
        for _ in 0..n_numeric {
            let v = rand_f64();
            // Leave roughly one cell in fifty empty
            if v < 0.02 {
                out.push(',');
            } else {
                out.push_str(&format!("{:.4},", v * 100.0));
            }
        }
        out.push_str(&format!("cat_{}\n", row % 7));
    }
    out.into_bytes()
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_csv_bytes");
    for &rows in &[1_000usize, 10_000] {
        let bytes = generate_csv(rows, 8);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &bytes, |b, bytes| {
            b.iter(|| read_csv_bytes(bytes, &CsvOptions::default()).unwrap())
        });
    }
    group.finish();
}

fn bench_summaries(c: &mut Criterion) {
    let df = read_csv_bytes(&generate_csv(10_000, 8), &CsvOptions::default()).unwrap();

    c.bench_function("summarize_10k_x9", |b| b.iter(|| stats::summarize(&df)));
    c.bench_function("correlation_10k_x8", |b| {
        b.iter(|| stats::correlation_matrix(&df))
    });
    c.bench_function("univariate_numeric_10k", |b| {
        let selector = ChartSelector::default();
        b.iter(|| selector.univariate(&df, "f0").unwrap())
    });
}

criterion_group!(benches, bench_load, bench_summaries);
criterion_main!(benches);
