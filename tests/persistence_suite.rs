mod common;

use common::{date, setup_test_env};
use smartspend::{
    config::Settings,
    core::services::{GoalAllocator, RecordService, TotalsService},
    currency::Currency,
    domain::{ExpenseCategory, InvestmentType},
    storage::{PersistenceError, RecordStorage, Snapshot, TableKind},
};

#[test]
fn snapshot_reflects_saved_tables() {
    let (storage, _) = setup_test_env();

    let income = RecordService::new_income(Some(date(2024, 1, 1)), "Salary", 5000.0).unwrap();
    let expense = RecordService::new_expense(
        Some(date(2024, 1, 3)),
        ExpenseCategory::Bills,
        "Rent",
        2000.0,
    )
    .unwrap();
    let investment =
        RecordService::new_investment(None, InvestmentType::Stocks, 500.0, Some(650.0)).unwrap();
    storage.save_incomes(&[income], None).unwrap();
    storage.save_expenses(&[expense], None).unwrap();
    storage.save_investments(&[investment], None).unwrap();

    let snapshot = Snapshot::load(&storage).unwrap();
    let data = &snapshot.data;
    let totals = TotalsService::compute(&data.incomes, &data.expenses, &data.investments);
    assert_eq!(totals.total_income, 5000.0);
    assert_eq!(totals.total_expenses, 2000.0);
    assert_eq!(totals.total_investment_value, 650.0);
    assert_eq!(totals.total_savings, 2350.0);
}

#[test]
fn allocation_persists_and_detects_concurrent_writes() {
    let (storage, _) = setup_test_env();
    let income = RecordService::new_income(None, "Salary", 1000.0).unwrap();
    storage.save_incomes(&[income], None).unwrap();
    let mut goals = Vec::new();
    RecordService::upsert_goal(&mut goals, "Laptop", 1500.0, 700.0, None).unwrap();
    storage.save_goals(&goals, None).unwrap();

    let mut snapshot = Snapshot::load(&storage).unwrap();
    let totals = TotalsService::compute(
        &snapshot.data.incomes,
        &snapshot.data.expenses,
        &snapshot.data.investments,
    );
    let allocator = GoalAllocator::from_totals(&totals);
    assert!(!allocator.allocate(&mut snapshot.data.goals, "Laptop", 400.0).accepted);
    let result = allocator.allocate(&mut snapshot.data.goals, "Laptop", 300.0);
    assert!(result.accepted);
    assert_eq!(result.remaining_savings, 0.0);

    // another session rewrites goals before this one saves
    let mut other = storage.load_goals().unwrap();
    other.rows[0].saved_so_far = 0.0;
    storage.save_goals(&other.rows, Some(other.revision)).unwrap();

    let err = storage
        .save_goals(&snapshot.data.goals, Some(snapshot.revisions.goals))
        .unwrap_err();
    assert!(matches!(err, PersistenceError::Conflict { .. }));

    let reloaded = storage.load_goals().unwrap();
    assert_eq!(reloaded.rows[0].saved_so_far, 0.0);
}

#[test]
fn every_save_keeps_a_bounded_backup_trail() {
    let (storage, _) = setup_test_env();
    let mut rows = Vec::new();
    for amount in [10.0, 20.0, 30.0, 40.0, 50.0] {
        let snack = RecordService::new_expense(None, ExpenseCategory::Food, "Snack", amount);
        rows.push(snack.unwrap());
        storage.save_expenses(&rows, None).unwrap();
    }
    let backups = storage.list_backups(TableKind::Expenses).unwrap();
    assert!(!backups.is_empty());
    assert!(backups.len() <= 3);
    assert_eq!(storage.load_expenses().unwrap().rows.len(), 5);
}

#[test]
fn settings_round_trip_and_restore() {
    let (_, manager) = setup_test_env();
    assert_eq!(manager.load().unwrap(), Settings::default());

    let mut settings = Settings::default();
    settings.currency = Currency::Eur;
    settings.set_monthly_budget(1200.0).unwrap();
    manager.save(&settings).unwrap();
    assert_eq!(manager.load().unwrap(), settings);

    let backup = manager.backup(&settings, Some("before trip")).unwrap();
    assert!(backup.ends_with("_before-trip.json"));

    let mut changed = settings.clone();
    changed.currency = Currency::Usd;
    manager.save(&changed).unwrap();

    let restored = manager.restore(&backup).unwrap();
    assert_eq!(restored.currency, Currency::Eur);
    assert_eq!(manager.load().unwrap().currency, Currency::Eur);
    assert_eq!(manager.list_backups().unwrap(), vec![backup]);
    assert!(manager.restore("settings_missing.json").is_err());
}
