//! Core position sizing logic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::SizingError;
use super::recompute::{DownstreamInputs, recompute_downstream};
use super::rounding::{HUNDRED, round2};
use super::types::{TradeInput, TradeMetrics};

/// Which formulas the engine applies for the risk budget and the loss
/// percentage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaMode {
    /// Reproduces the calculator's established outputs:
    /// `riskBudget = maxPercentLoss / 100 * portfolioSize / 100` and
    /// `lossPercentOfEntry` computed from the per-share gain.
    #[default]
    Legacy,
    /// `riskBudget = maxPercentLoss / 100 * portfolioSize` and
    /// `lossPercentOfEntry` computed from the per-share loss.
    Corrected,
}

impl FormulaMode {
    /// Config/wire name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Corrected => "corrected",
        }
    }
}

/// Stateless position sizing engine.
///
/// Holds only its formula mode; every call to [`evaluate`](Self::evaluate)
/// is independent and the engine can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionSizingEngine {
    mode: FormulaMode,
}

impl PositionSizingEngine {
    /// Create an engine using the given formula mode.
    #[must_use]
    pub const fn new(mode: FormulaMode) -> Self {
        Self { mode }
    }

    /// Formula mode in use.
    #[must_use]
    pub const fn mode(&self) -> FormulaMode {
        self.mode
    }

    /// Evaluate a trade.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if:
    /// - portfolio size or entry price is zero or negative
    /// - max percent loss is negative
    /// - per-share loss rounds to zero (division by zero)
    /// - the stop is above the entry
    /// - an intermediate value overflows
    pub fn evaluate(&self, input: &TradeInput) -> Result<TradeMetrics, SizingError> {
        let downstream = self.downstream_inputs(input)?;
        let size = recompute_downstream(&downstream)?;
        let shares = Decimal::from(size.share_count);

        let price_move = checked(
            input.target_price.checked_sub(input.entry_price),
            "targetPrice",
        )?;
        let per_share_gain = round2(price_move);

        let loss_basis = match self.mode {
            FormulaMode::Legacy => per_share_gain,
            FormulaMode::Corrected => downstream.per_share_loss,
        };
        let loss_percent_of_entry = round2(percent_of(loss_basis, input.entry_price)?);

        let profit_target = checked(per_share_gain.checked_mul(shares), "targetPrice")?;
        let profit_target_percent = round2(percent_of(price_move, input.entry_price)?);

        tracing::debug!(
            symbol = %input.symbol_name,
            mode = self.mode.as_str(),
            risk_budget = %downstream.risk_budget,
            per_share_loss = %downstream.per_share_loss,
            share_count = size.share_count,
            "Trade evaluated"
        );

        Ok(TradeMetrics {
            risk_budget: downstream.risk_budget,
            per_share_loss: downstream.per_share_loss,
            per_share_gain,
            loss_percent_of_entry,
            share_count: size.share_count,
            cost_of_trade: size.cost_of_trade,
            profit_target,
            profit_target_percent,
        })
    }

    /// Validate the input and derive the values the share count depends on.
    ///
    /// Used by full evaluations and by downstream recomputation after an edit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for non-positive portfolio size or entry price,
    /// a negative max percent loss, or an out-of-range stop.
    pub fn downstream_inputs(&self, input: &TradeInput) -> Result<DownstreamInputs, SizingError> {
        validate_input(input)?;

        let risk_budget = self.risk_budget(input.portfolio_size, input.max_percent_loss)?;
        let per_share_loss = round2(checked(
            input.entry_price.checked_sub(input.stop_exit_price),
            "stopExitPrice",
        )?);

        Ok(DownstreamInputs {
            risk_budget,
            per_share_loss,
            entry_price: input.entry_price,
        })
    }

    /// Currency amount the trader accepts losing.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the product overflows.
    pub fn risk_budget(
        &self,
        portfolio_size: Decimal,
        max_percent_loss: Decimal,
    ) -> Result<Decimal, SizingError> {
        let budget = (max_percent_loss / HUNDRED)
            .checked_mul(portfolio_size)
            .ok_or_else(|| SizingError::invalid("portfolioSize", "Risk budget is out of range"))?;

        Ok(match self.mode {
            FormulaMode::Legacy => budget / HUNDRED,
            FormulaMode::Corrected => budget,
        })
    }
}

/// Evaluate a trade with the legacy formulas.
///
/// Equivalent to `PositionSizingEngine::default().evaluate(input)`.
///
/// # Errors
///
/// See [`PositionSizingEngine::evaluate`].
pub fn evaluate(input: &TradeInput) -> Result<TradeMetrics, SizingError> {
    PositionSizingEngine::default().evaluate(input)
}

fn validate_input(input: &TradeInput) -> Result<(), SizingError> {
    if input.portfolio_size <= Decimal::ZERO {
        return Err(SizingError::invalid(
            "portfolioSize",
            "Portfolio size must be positive",
        ));
    }

    if input.entry_price <= Decimal::ZERO {
        return Err(SizingError::invalid(
            "entryPrice",
            "Entry price must be positive",
        ));
    }

    if input.max_percent_loss < Decimal::ZERO {
        return Err(SizingError::invalid(
            "maxPercentLoss",
            "Max percent loss cannot be negative",
        ));
    }

    Ok(())
}

/// `value / base * 100`; `base` has already been validated as positive.
fn percent_of(value: Decimal, base: Decimal) -> Result<Decimal, SizingError> {
    checked(
        value.checked_div(base).and_then(|ratio| ratio.checked_mul(HUNDRED)),
        "entryPrice",
    )
}

fn checked(value: Option<Decimal>, field: &'static str) -> Result<Decimal, SizingError> {
    value.ok_or_else(|| SizingError::invalid(field, "Value is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn default_input() -> TradeInput {
        TradeInput {
            portfolio_size: dec!(150000),
            symbol_name: "AC".to_string(),
            max_percent_loss: dec!(9),
            entry_price: dec!(115.54),
            stop_exit_price: dec!(88.10),
            target_price: dec!(150),
        }
    }

    #[test]
    fn test_worked_example() {
        let metrics = evaluate(&default_input()).expect("should evaluate");

        assert_eq!(metrics.risk_budget, dec!(135));
        assert_eq!(metrics.per_share_loss, dec!(27.44));
        assert_eq!(metrics.share_count, 5);
        assert_eq!(metrics.cost_of_trade, dec!(577.70));
        assert_eq!(metrics.per_share_gain, dec!(34.46));
        assert_eq!(metrics.loss_percent_of_entry, dec!(29.83));
        assert_eq!(metrics.profit_target, dec!(172.30));
        assert_eq!(metrics.profit_target_percent, dec!(29.83));
    }

    #[test]
    fn test_corrected_formulas() {
        let engine = PositionSizingEngine::new(FormulaMode::Corrected);
        let metrics = engine.evaluate(&default_input()).expect("should evaluate");

        // 9% of 150000 = 13500; 13500 / 27.44 = 491.98
        assert_eq!(metrics.risk_budget, dec!(13500));
        assert_eq!(metrics.share_count, 492);
        assert_eq!(metrics.cost_of_trade, dec!(56845.68));
        // 27.44 / 115.54 = 23.749...%
        assert_eq!(metrics.loss_percent_of_entry, dec!(23.75));
        assert_eq!(metrics.profit_target_percent, dec!(29.83));
    }

    #[test]
    fn test_stop_equal_to_entry_is_invalid() {
        let mut input = default_input();
        input.entry_price = dec!(100);
        input.stop_exit_price = dec!(100);

        let result = evaluate(&input);
        assert!(matches!(
            result,
            Err(SizingError::InvalidInput { field: "stopExitPrice", .. })
        ));
    }

    #[test]
    fn test_stop_within_half_cent_is_invalid() {
        let mut input = default_input();
        input.entry_price = dec!(100);
        input.stop_exit_price = dec!(99.996);

        assert!(evaluate(&input).is_err());
    }

    #[test]
    fn test_stop_above_entry_is_invalid() {
        let mut input = default_input();
        input.stop_exit_price = dec!(120);

        let err = evaluate(&input).expect_err("stop above entry must fail");
        assert_eq!(err.field(), "stopExitPrice");
    }

    #[test]
    fn test_zero_max_percent_loss() {
        let mut input = default_input();
        input.max_percent_loss = Decimal::ZERO;

        let metrics = evaluate(&input).expect("should evaluate");
        assert_eq!(metrics.risk_budget, Decimal::ZERO);
        assert_eq!(metrics.share_count, 0);
        assert_eq!(metrics.cost_of_trade, Decimal::ZERO);
        assert_eq!(metrics.profit_target, Decimal::ZERO);
    }

    #[test]
    fn test_negative_max_percent_loss_is_invalid() {
        let mut input = default_input();
        input.max_percent_loss = dec!(-1);

        let err = evaluate(&input).expect_err("negative loss percent must fail");
        assert_eq!(err.field(), "maxPercentLoss");
    }

    #[test]
    fn test_zero_entry_price_is_invalid() {
        let mut input = default_input();
        input.entry_price = Decimal::ZERO;

        let err = evaluate(&input).expect_err("zero entry must fail");
        assert_eq!(err.field(), "entryPrice");
    }

    #[test]
    fn test_negative_portfolio_is_invalid() {
        let mut input = default_input();
        input.portfolio_size = dec!(-5000);

        let err = evaluate(&input).expect_err("negative portfolio must fail");
        assert_eq!(err.field(), "portfolioSize");
    }

    #[test]
    fn test_target_below_entry_gives_negative_gain() {
        let mut input = default_input();
        input.target_price = dec!(110);

        let metrics = evaluate(&input).expect("should evaluate");
        assert_eq!(metrics.per_share_gain, dec!(-5.54));
        assert_eq!(metrics.profit_target, dec!(-27.70));
        assert_eq!(metrics.profit_target_percent, dec!(-4.79));
    }

    #[test]
    fn test_symbol_does_not_affect_metrics() {
        let mut other = default_input();
        other.symbol_name = "XYZ".to_string();

        assert_eq!(evaluate(&default_input()), evaluate(&other));
    }

    #[test]
    fn test_overflow_is_reported_not_panicked() {
        let mut input = default_input();
        input.portfolio_size = Decimal::MAX;
        input.max_percent_loss = dec!(1000);

        assert!(evaluate(&input).is_err());
    }
}
