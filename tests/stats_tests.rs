//! Aggregation correctness tests

use betpool_core::models::{Address, BetEvent, PayoutEvent, PoolRef, PoolStatus};
use betpool_core::stats::{aggregate, UserStats};

fn user() -> Address {
    Address::parse("0xabcdef0000000000000000000000000000000001").unwrap()
}

fn bet(id: &str, amount: &str, status: PoolStatus, is_withdrawn: bool) -> BetEvent {
    BetEvent {
        id: id.to_string(),
        user: user(),
        amount: amount.to_string(),
        token_type: None,
        is_withdrawn,
        created_at: None,
        pool: PoolRef {
            id: "pool-1".to_string(),
            question: "Will Tariffs increase?".to_string(),
            options: vec!["Yes".to_string(), "No".to_string()],
            status,
        },
    }
}

fn payout(id: &str) -> PayoutEvent {
    PayoutEvent {
        id: id.to_string(),
        user: user(),
        amount: "10".to_string(),
        bet: None,
        pool: None,
    }
}

#[test]
fn worked_example_with_malformed_amount() {
    let bets = vec![
        bet("b-1", "10", PoolStatus::Pending, false),
        bet("b-2", "bad", PoolStatus::Graded, false),
        bet("b-3", "5", PoolStatus::Pending, false),
    ];

    let stats = aggregate(&bets, &[]);
    assert_eq!(stats.total_bets, 3);
    assert_eq!(stats.total_volume, 15.0);
    assert_eq!(stats.active_volume, 15.0);
    assert_eq!(stats.won_bets, 0);
    assert_eq!(stats.win_rate, 0.0);
    assert_eq!(stats.avg_bet_size, 5.0);
    assert_eq!(stats.win_rate_display(), "0.0");
    assert_eq!(stats.avg_bet_size_display(), "5");
}

#[test]
fn empty_inputs_yield_all_zero_stats() {
    let stats = aggregate(&[], &[]);
    assert_eq!(stats, UserStats::default());
    assert_eq!(stats.win_rate_display(), "0.0");
    assert_eq!(stats.avg_bet_size_display(), "0");
}

#[test]
fn outcome_counts_by_pool_status() {
    let bets = vec![
        bet("b-1", "10", PoolStatus::Pending, false),
        bet("b-2", "10", PoolStatus::Pending, false),
        bet("b-3", "10", PoolStatus::Graded, false), // lost
        bet("b-4", "10", PoolStatus::Graded, true),  // settled and withdrawn
        bet("b-5", "10", PoolStatus::Regraded, false),
    ];
    let payouts = vec![payout("p-1"), payout("p-2")];

    let stats = aggregate(&bets, &payouts);
    assert_eq!(stats.total_bets, 5);
    assert_eq!(stats.won_bets, 2);
    assert_eq!(stats.lost_bets, 1);
    assert_eq!(stats.pending_bets, 2);
    assert_eq!(stats.total_volume, 50.0);
    assert_eq!(stats.active_volume, 20.0);
    assert_eq!(stats.win_rate, 40.0);
    assert_eq!(stats.avg_bet_size, 10.0);
}

#[test]
fn rounding_applies_only_at_display_time() {
    let bets = vec![
        bet("b-1", "10", PoolStatus::Pending, false),
        bet("b-2", "10", PoolStatus::Pending, false),
        bet("b-3", "10", PoolStatus::Pending, false),
    ];
    let payouts = vec![payout("p-1")];

    let stats = aggregate(&bets, &payouts);
    assert!((stats.win_rate - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(stats.win_rate_display(), "33.3");
    assert!((stats.avg_bet_size - 10.0).abs() < 1e-9);
    assert_eq!(stats.avg_bet_size_display(), "10");
}

#[test]
fn unparsable_amounts_still_count_toward_totals() {
    let bets = vec![
        bet("b-1", "not-a-number", PoolStatus::Pending, false),
        bet("b-2", "10", PoolStatus::Pending, false),
    ];

    let stats = aggregate(&bets, &[]);
    assert_eq!(stats.total_bets, 2);
    assert_eq!(stats.total_volume, 10.0);
    // the malformed bet still sits in the average's denominator
    assert_eq!(stats.avg_bet_size, 5.0);
}

#[test]
fn withdrawn_graded_bets_are_not_counted_as_lost() {
    let bets = vec![bet("b-1", "10", PoolStatus::Graded, true)];
    let stats = aggregate(&bets, &[]);
    assert_eq!(stats.lost_bets, 0);
    assert_eq!(stats.pending_bets, 0);
}
