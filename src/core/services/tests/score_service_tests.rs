use crate::core::services::{ScoreService, Totals};
use crate::domain::GoalRecord;

#[test]
fn neutral_defaults_score() {
    // 0.45 * 0 + 0.30 * 1.0 + 0.25 * 0.5 = 0.425 -> 42.5 -> 42 (half to even)
    let totals = Totals::from_parts(0.0, 0.0, 0.0);
    let breakdown = ScoreService::breakdown(&totals, 0.0, &[]);
    assert_eq!(breakdown.savings_rate, 0.0);
    assert_eq!(breakdown.budget_score, 1.0);
    assert_eq!(breakdown.goal_score, 0.5);
    assert_eq!(breakdown.score, 42);
}

#[test]
fn budget_overspend_is_penalised_proportionally() {
    assert!((ScoreService::budget_score(1200.0, 1000.0) - 0.8).abs() < 1e-12);
    assert_eq!(ScoreService::budget_score(800.0, 1000.0), 1.0);
    assert_eq!(ScoreService::budget_score(5000.0, 1000.0), 0.0);
    assert_eq!(ScoreService::budget_score(5000.0, 0.0), 1.0);
}

#[test]
fn goal_progress_saturates_at_one() {
    let goals = [GoalRecord::new("Overfunded", 100.0, 400.0, None)];
    assert_eq!(ScoreService::goal_score(&goals), 1.0);

    let mixed = [
        GoalRecord::new("Done", 100.0, 400.0, None),
        GoalRecord::new("Half", 200.0, 100.0, None),
        GoalRecord::new("Free", 0.0, 0.0, None),
    ];
    let expected = (1.0 + 0.5 + 1.0) / 3.0;
    assert!((ScoreService::goal_score(&mixed) - expected).abs() < 1e-12);
}

#[test]
fn savings_rate_guards_zero_income() {
    let broke = Totals::from_parts(0.0, 500.0, 0.0);
    assert_eq!(ScoreService::savings_rate(&broke), 0.0);

    let overspent = Totals::from_parts(1000.0, 1500.0, 0.0);
    assert_eq!(ScoreService::savings_rate(&overspent), 0.0);

    let healthy = Totals::from_parts(5000.0, 2000.0, 0.0);
    assert!((ScoreService::savings_rate(&healthy) - 0.6).abs() < 1e-12);
}

#[test]
fn combined_score_matches_weights() {
    // savings 0.6, budget unset, no goals: (0.27 + 0.30 + 0.125) * 100 = 69.5 -> 70
    let totals = Totals::from_parts(5000.0, 2000.0, 0.0);
    assert_eq!(ScoreService::smart_score(&totals, 0.0, &[]), 70);

    // everything maxed out
    let rich = Totals::from_parts(10_000.0, 0.0, 0.0);
    let goals = [GoalRecord::new("Car", 1000.0, 1000.0, None)];
    assert_eq!(ScoreService::smart_score(&rich, 500.0, &goals), 100);
}

#[test]
fn score_is_bounded_for_extreme_inputs() {
    let cases = [
        Totals::from_parts(0.0, 0.0, 0.0),
        Totals::from_parts(1.0, 1e12, 1e12),
        Totals::from_parts(1e12, 0.0, 0.0),
    ];
    for totals in cases {
        for budget in [0.0, 1.0, 1e9] {
            let score = ScoreService::smart_score(&totals, budget, &[]);
            assert!(score <= 100, "score {score} out of range");
        }
    }
}
