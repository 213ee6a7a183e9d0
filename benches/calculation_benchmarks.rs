//! Performance benchmarks for the tax computation engine.
//!
//! This benchmark suite verifies that the engine meets performance targets:
//! - Pure bracket resolution + base tax: < 10μs mean
//! - Single calculation through the HTTP surface: < 1ms mean
//! - Multi-year comparison (5 years): < 2ms mean
//! - Batch of 100 calculations: < 100ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::str::FromStr;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_decimal::Decimal;

use tax_engine::api::{create_router, AppState};
use tax_engine::calculation::{apply_adjustments, compute_base_tax, resolve_bracket, TaxEngine};
use tax_engine::config::ConfigLoader;
use tax_engine::data::StaticTaxData;
use tax_engine::models::TaxBracket;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with the shipped bracket tables loaded.
fn create_test_state() -> AppState {
    let tables = ConfigLoader::load("./config/tax_tables").expect("Failed to load tax tables");
    let source = Arc::new(StaticTaxData::new(tables));
    AppState::new(TaxEngine::new(source))
}

fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("invalid decimal literal")
}

/// The 2024-25 resident bracket table, built directly for the pure-function benchmarks.
fn bracket_table() -> Vec<TaxBracket> {
    let row = |order: u32, min: &str, max: Option<&str>, rate: &str, fixed: &str| TaxBracket {
        financial_year: "2024-25".to_string(),
        min_income: dec(min),
        max_income: max.map(dec),
        tax_rate: dec(rate),
        fixed_amount: dec(fixed),
        bracket_order: order,
        is_active: true,
    };
    vec![
        row(1, "0", Some("18200"), "0", "0"),
        row(2, "18201", Some("45000"), "0.16", "0"),
        row(3, "45001", Some("135000"), "0.30", "4288"),
        row(4, "135001", Some("190000"), "0.37", "31288"),
        row(5, "190001", None, "0.45", "51638"),
    ]
}

fn calculate_body(income: &str, year: &str) -> String {
    serde_json::json!({
        "taxable_income": income,
        "financial_year": year,
    })
    .to_string()
}

/// Benchmark: the pure calculation pipeline, no I/O or serialization.
///
/// Target: < 10μs mean
fn bench_pure_pipeline(c: &mut Criterion) {
    let brackets = bracket_table();
    let income = dec("87000");

    c.bench_function("pure_pipeline", |b| {
        b.iter(|| {
            let bracket = resolve_bracket(black_box(income), &brackets)
                .expect("bracket resolution failed");
            let gross = compute_base_tax(income, bracket);
            black_box(apply_adjustments(gross, income, &[], &[]))
        })
    });
}

/// Benchmark: single calculation through the full HTTP surface.
///
/// Target: < 1ms mean
fn bench_single_calculation(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();
    let router = create_router(state);
    let body = calculate_body("87000", "2024-25");

    c.bench_function("single_calculation", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/api/tax/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: comparing one income across five financial years.
///
/// Target: < 2ms mean
fn bench_compare_five_years(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();
    let router = create_router(state);
    let uri = "/api/tax/compare?income=87000&years=2020-21,2021-22,2022-23,2023-24,2024-25";

    c.bench_function("compare_five_years", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("GET")
                        .uri(uri)
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: batch of 100 calculations across varying incomes and years.
///
/// Target: < 100ms mean
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();
    let router = create_router(state);

    let years = ["2021-22", "2022-23", "2023-24", "2024-25"];
    let bodies: Vec<String> = (0..100)
        .map(|i| {
            let income = format!("{}", 20_000 + i * 2_500);
            calculate_body(&income, years[i % years.len()])
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &bodies {
                let router = router.clone();
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/api/tax/calculate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_pure_pipeline,
    bench_single_calculation,
    bench_compare_five_years,
    bench_batch_100
);
criterion_main!(benches);
