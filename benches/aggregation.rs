use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use smartspend::{
    config::Settings,
    core::{
        services::{GoalAllocator, ScoreService, TotalsService},
        Dashboard, FinanceData,
    },
    domain::{
        ExpenseCategory, ExpenseRecord, GoalRecord, IncomeRecord, InvestmentRecord,
        InvestmentType,
    },
    storage::{CsvStorage, RecordStorage, Snapshot},
};
use tempfile::tempdir;

fn build_sample_data(count: usize) -> FinanceData {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut data = FinanceData::default();
    for idx in 0..count {
        let date = Some(start + Duration::days((idx % 365) as i64));
        let category = ExpenseCategory::KNOWN[idx % ExpenseCategory::KNOWN.len()].clone();
        data.expenses.push(ExpenseRecord::new(
            date,
            category,
            "Sample",
            10.0 + (idx % 90) as f64,
        ));
        if idx % 4 == 0 {
            data.incomes.push(IncomeRecord::new(date, "Salary", 1500.0));
        }
        if idx % 20 == 0 {
            data.investments.push(InvestmentRecord::new(
                date,
                InvestmentType::Stocks,
                200.0,
                (idx % 40 == 0).then_some(260.0),
            ));
        }
    }
    for idx in 0..10 {
        data.goals
            .push(GoalRecord::new(format!("Goal {idx}"), 5000.0, 100.0 * idx as f64, None));
    }
    data
}

fn bench_aggregation(c: &mut Criterion) {
    let data = build_sample_data(black_box(10_000));
    let settings = Settings {
        monthly_budget: 3000.0,
        ..Settings::default()
    };
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    c.bench_function("totals_and_score_10k", |b| {
        b.iter(|| {
            let totals = TotalsService::compute(&data.incomes, &data.expenses, &data.investments);
            black_box(ScoreService::smart_score(&totals, settings.monthly_budget, &data.goals));
        })
    });

    c.bench_function("dashboard_build_10k", |b| {
        b.iter(|| black_box(Dashboard::build(&data, &settings, today)))
    });

    c.bench_function("allocate_batch_100", |b| {
        let totals = TotalsService::compute(&data.incomes, &data.expenses, &data.investments);
        let allocator = GoalAllocator::from_totals(&totals);
        b.iter(|| {
            let mut goals = data.goals.clone();
            for idx in 0..100 {
                black_box(allocator.allocate(&mut goals, &format!("Goal {}", idx % 10), 25.0));
            }
        })
    });
}

fn bench_csv_io(c: &mut Criterion) {
    let data = build_sample_data(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let storage = CsvStorage::new(Some(dir.path().to_path_buf()), Some(1)).expect("storage");

    c.bench_function("expenses_save_10k", |b| {
        b.iter(|| {
            storage.save_expenses(&data.expenses, None).expect("save expenses");
        })
    });

    storage.save_incomes(&data.incomes, None).expect("seed incomes");
    storage.save_investments(&data.investments, None).expect("seed investments");
    storage.save_goals(&data.goals, None).expect("seed goals");

    c.bench_function("snapshot_load_10k", |b| {
        b.iter(|| black_box(Snapshot::load(&storage).expect("load snapshot")))
    });
}

criterion_group!(benches, bench_aggregation, bench_csv_io);
criterion_main!(benches);
