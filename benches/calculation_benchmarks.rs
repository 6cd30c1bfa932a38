//! Performance benchmarks for the Payroll Calculation Engine.
//!
//! Covers the engine directly and through the HTTP API:
//! - One month for one employee, called directly
//! - One month for one employee over HTTP
//! - A batch of 100 employees over HTTP
//! - Scaling with the number of shifts in the month
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::calculate_pay;
use payroll_engine::config::{ConfigLoader, PayrollRules};
use payroll_engine::models::{
    Contract, Employee, EmploymentType, PayBasis, PayPeriod, ProbationPeriod, Shift,
};

use axum::{Router, body::Body, http::Request};
use tower::ServiceExt;

/// Creates a router with the response memo disabled so every call computes.
fn create_uncached_router() -> Router {
    let config = ConfigLoader::load("./config/kr_payroll").expect("Failed to load config");
    create_router(AppState::with_cache(config, Duration::ZERO, 0))
}

/// Creates `count` 8-hour shifts spread over January 2025 weekdays.
fn create_shifts(count: usize) -> Vec<Shift> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let weekdays: Vec<NaiveDate> = start
        .iter_days()
        .take(31)
        .filter(|d| d.weekday().number_from_monday() <= 5)
        .collect();

    weekdays
        .into_iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(i, date)| Shift {
            id: format!("shift_{:03}", i + 1),
            employee_id: "emp_bench_001".to_string(),
            date,
            site_id: format!("site_{}", i % 3),
            site_name: format!("Site {}", i % 3),
            worked_hours: Decimal::new(8, 0),
        })
        .collect()
}

fn create_employee() -> Employee {
    Employee {
        id: "emp_bench_001".to_string(),
        name: "Bench Worker".to_string(),
        employment_type: EmploymentType::WageEarner,
        probation: Some(ProbationPeriod {
            start: NaiveDate::from_ymd_opt(2024, 11, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
        }),
        weekly_holiday_included: false,
        weekly_contract_hours: None,
    }
}

fn create_contract() -> Contract {
    Contract {
        id: "contract_bench".to_string(),
        employee_id: "emp_bench_001".to_string(),
        employment_type: EmploymentType::WageEarner,
        pay_basis: PayBasis::Hourly,
        amount: Decimal::new(10_030, 0),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: None,
        weekly_contract_hours: None,
        weekly_holiday_included: None,
    }
}

/// Creates an API request body for one employee.
fn create_request_json(employee_id: &str, shift_count: usize) -> serde_json::Value {
    let shifts: Vec<serde_json::Value> = create_shifts(shift_count)
        .into_iter()
        .map(|s| {
            serde_json::json!({
                "id": s.id,
                "date": s.date,
                "site_id": s.site_id,
                "site_name": s.site_name,
                "worked_hours": s.worked_hours
            })
        })
        .collect();

    serde_json::json!({
        "employee": {
            "id": employee_id,
            "name": "Bench Worker",
            "probation": { "start": "2024-11-01", "end": "2025-01-15" }
        },
        "contracts": [{
            "id": "contract_bench",
            "employment_type": "wage_earner",
            "pay_basis": "hourly",
            "amount": "10030",
            "start_date": "2024-01-01"
        }],
        "period": { "year": 2025, "month": 1 },
        "shifts": shifts
    })
}

fn post(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Benchmark: one employee-month, engine only.
fn bench_engine_month(c: &mut Criterion) {
    let employee = create_employee();
    let contract = create_contract();
    let shifts = create_shifts(22);
    let period = PayPeriod::month(2025, 1).unwrap();
    let rules = PayrollRules::default();

    c.bench_function("engine_month_22_shifts", |b| {
        b.iter(|| {
            calculate_pay(
                black_box(&employee),
                Some(black_box(&contract)),
                black_box(&shifts),
                &period,
                &rules,
            )
        })
    });
}

/// Benchmark: one employee-month over HTTP.
fn bench_http_single(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_uncached_router();
    let body = create_request_json("emp_bench_001", 22).to_string();

    c.bench_function("http_single_month", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(post("/calculate", body.clone()))
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: batch of 100 employees over HTTP.
fn bench_http_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_uncached_router();
    let requests: Vec<serde_json::Value> = (0..100)
        .map(|i| create_request_json(&format!("emp_bench_{:03}", i), 22))
        .collect();
    let body = serde_json::json!({ "requests": requests }).to_string();

    let mut group = c.benchmark_group("batch");
    group.throughput(Throughput::Elements(100));
    group.sample_size(20);
    group.bench_function("http_batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router
                .clone()
                .oneshot(post("/calculate/batch", body.clone()))
                .await
                .unwrap();
            black_box(response)
        })
    });
    group.finish();
}

/// Benchmark: engine scaling with shift count.
fn bench_scaling(c: &mut Criterion) {
    let employee = create_employee();
    let contract = create_contract();
    let period = PayPeriod::month(2025, 1).unwrap();
    let rules = PayrollRules::default();

    let mut group = c.benchmark_group("scaling");
    for count in [1usize, 10, 50, 200] {
        let shifts = create_shifts(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &shifts, |b, shifts| {
            b.iter(|| calculate_pay(&employee, Some(&contract), black_box(shifts), &period, &rules))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_engine_month,
    bench_http_single,
    bench_http_batch_100,
    bench_scaling,
);
criterion_main!(benches);
