//! Property tests for position sizing invariants.
//!
//! Uses proptest to verify:
//! 1. Determinism: the same input always yields the same metrics
//! 2. Cost accounting: cost of trade is entry price times share count
//! 3. Profit accounting: profit target is per-share gain times share count
//! 4. Share count: shares are the rounded quotient of budget over loss
//! 5. Degenerate stops: a stop at the entry is always rejected

// Allow unwrap in tests - tests should panic on unexpected errors
#![allow(clippy::unwrap_used, clippy::expect_used)]

use proptest::prelude::*;
use rust_decimal::Decimal;

use position_sizer::sizing::{
    FormulaMode, PositionSizingEngine, TradeInput, evaluate, round0, round2,
};

// ── Strategies (proptest) ────────────────────────────────────────────

fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

/// A long trade with entry 1.00..1000.00, a stop strictly below the entry
/// and any target.
fn arb_trade() -> impl Strategy<Value = TradeInput> {
    (100_i64..=100_000)
        .prop_flat_map(|entry| {
            (
                1_i64..=10_000_000,
                0_i64..=10_000,
                Just(entry),
                1_i64..entry,
                1_i64..=200_000,
            )
        })
        .prop_map(|(portfolio, max_loss_bp, entry, loss, target)| TradeInput {
            portfolio_size: Decimal::from(portfolio),
            symbol_name: "SPY".to_string(),
            max_percent_loss: cents(max_loss_bp),
            entry_price: cents(entry),
            stop_exit_price: cents(entry - loss),
            target_price: cents(target),
        })
}

fn arb_mode() -> impl Strategy<Value = FormulaMode> {
    prop_oneof![Just(FormulaMode::Legacy), Just(FormulaMode::Corrected)]
}

// ── 1. Determinism ───────────────────────────────────────────────────

proptest! {
    /// Evaluating twice gives identical metrics.
    #[test]
    fn evaluation_is_deterministic(input in arb_trade(), mode in arb_mode()) {
        let engine = PositionSizingEngine::new(mode);
        let first = engine.evaluate(&input);
        let second = engine.evaluate(&input);
        prop_assert_eq!(first, second);
    }

    /// The symbol never changes the numbers.
    #[test]
    fn symbol_is_advisory(input in arb_trade(), symbol in "[A-Z]{1,5}") {
        let mut renamed = input.clone();
        renamed.symbol_name = symbol;
        prop_assert_eq!(evaluate(&input), evaluate(&renamed));
    }
}

// ── 2-4. Accounting identities ───────────────────────────────────────

proptest! {
    /// Cost of trade is exactly entry price times share count.
    #[test]
    fn cost_is_entry_times_shares(input in arb_trade(), mode in arb_mode()) {
        let metrics = PositionSizingEngine::new(mode).evaluate(&input).unwrap();
        prop_assert_eq!(
            metrics.cost_of_trade,
            input.entry_price * Decimal::from(metrics.share_count)
        );
    }

    /// Profit target is exactly per-share gain times share count.
    #[test]
    fn profit_is_gain_times_shares(input in arb_trade(), mode in arb_mode()) {
        let metrics = PositionSizingEngine::new(mode).evaluate(&input).unwrap();
        prop_assert_eq!(
            metrics.profit_target,
            metrics.per_share_gain * Decimal::from(metrics.share_count)
        );
    }

    /// Share count is the risk budget over the per-share loss, rounded half
    /// away from zero.
    #[test]
    fn shares_are_rounded_budget_over_loss(input in arb_trade(), mode in arb_mode()) {
        let metrics = PositionSizingEngine::new(mode).evaluate(&input).unwrap();

        prop_assert!(metrics.per_share_loss > Decimal::ZERO);
        prop_assert_eq!(
            Decimal::from(metrics.share_count),
            round0(metrics.risk_budget / metrics.per_share_loss)
        );
        prop_assert_eq!(
            metrics.per_share_loss,
            round2(input.entry_price - input.stop_exit_price)
        );
    }

    /// The legacy budget is the corrected budget divided by 100.
    #[test]
    fn legacy_budget_is_hundredth_of_corrected(input in arb_trade()) {
        let legacy = PositionSizingEngine::new(FormulaMode::Legacy).evaluate(&input).unwrap();
        let corrected = PositionSizingEngine::new(FormulaMode::Corrected).evaluate(&input).unwrap();

        prop_assert_eq!(legacy.risk_budget * Decimal::ONE_HUNDRED, corrected.risk_budget);
        prop_assert_eq!(legacy.per_share_gain, corrected.per_share_gain);
        prop_assert_eq!(legacy.profit_target_percent, corrected.profit_target_percent);
    }

    /// A zero loss tolerance sizes no position at all.
    #[test]
    fn zero_tolerance_sizes_nothing(mut input in arb_trade(), mode in arb_mode()) {
        input.max_percent_loss = Decimal::ZERO;
        let metrics = PositionSizingEngine::new(mode).evaluate(&input).unwrap();

        prop_assert_eq!(metrics.share_count, 0);
        prop_assert_eq!(metrics.cost_of_trade, Decimal::ZERO);
        prop_assert_eq!(metrics.profit_target, Decimal::ZERO);
    }
}

// ── 5. Degenerate stops ──────────────────────────────────────────────

proptest! {
    /// A stop equal to the entry always fails with a stop field error.
    #[test]
    fn stop_at_entry_is_rejected(mut input in arb_trade(), mode in arb_mode()) {
        input.stop_exit_price = input.entry_price;
        let err = PositionSizingEngine::new(mode).evaluate(&input).unwrap_err();
        prop_assert_eq!(err.field(), "stopExitPrice");
    }

    /// A stop above the entry is rejected for a long trade.
    #[test]
    fn stop_above_entry_is_rejected(mut input in arb_trade(), above in 1_i64..=10_000) {
        input.stop_exit_price = input.entry_price + cents(above);
        prop_assert!(evaluate(&input).is_err());
    }
}
