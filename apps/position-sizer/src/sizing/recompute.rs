//! Share count and cost derivation.
//!
//! Shared by full evaluations and by the explicit "recalculate downstream"
//! step that runs when the risk budget, per-share loss or entry price change
//! after an evaluation.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use super::error::SizingError;
use super::rounding::round0;
use super::types::TradeMetrics;

/// Latest upstream values the share count depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownstreamInputs {
    /// Currency amount the trader is willing to lose.
    pub risk_budget: Decimal,
    /// Entry minus stop, already rounded to 2 dp.
    pub per_share_loss: Decimal,
    /// Planned entry price.
    pub entry_price: Decimal,
}

/// Share count and the cost of buying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSize {
    /// Whole shares to buy.
    pub share_count: u64,
    /// Entry price times share count.
    pub cost_of_trade: Decimal,
}

/// Recompute share count and cost from the latest upstream values.
///
/// `shareCount = round0(riskBudget / perShareLoss)` and
/// `costOfTrade = entryPrice * shareCount`.
///
/// # Errors
///
/// Returns `InvalidInput` if the entry price is not positive, the per-share
/// loss is zero or negative, the risk budget is negative, or the result
/// overflows.
pub fn recompute_downstream(inputs: &DownstreamInputs) -> Result<PositionSize, SizingError> {
    if inputs.entry_price <= Decimal::ZERO {
        return Err(SizingError::invalid(
            "entryPrice",
            "Entry price must be positive",
        ));
    }

    if inputs.per_share_loss == Decimal::ZERO {
        return Err(SizingError::invalid(
            "stopExitPrice",
            "Stop exit price must differ from entry price (per-share loss is zero)",
        ));
    }

    if inputs.per_share_loss < Decimal::ZERO {
        return Err(SizingError::invalid(
            "stopExitPrice",
            "Stop exit price must be below entry price for a long position",
        ));
    }

    if inputs.risk_budget < Decimal::ZERO {
        return Err(SizingError::invalid(
            "maxPercentLoss",
            "Risk budget cannot be negative",
        ));
    }

    let share_count = inputs
        .risk_budget
        .checked_div(inputs.per_share_loss)
        .map(round0)
        .and_then(|shares| shares.to_u64())
        .ok_or_else(|| SizingError::invalid("portfolioSize", "Share count is out of range"))?;

    let cost_of_trade = inputs
        .entry_price
        .checked_mul(Decimal::from(share_count))
        .ok_or_else(|| SizingError::invalid("entryPrice", "Cost of trade is out of range"))?;

    Ok(PositionSize {
        share_count,
        cost_of_trade,
    })
}

impl TradeMetrics {
    /// Apply a downstream recomputation, returning a new record.
    ///
    /// `riskBudget`, `perShareLoss`, `shareCount` and `costOfTrade` take the
    /// new values; every other field is carried over unchanged.
    pub fn with_downstream(&self, inputs: &DownstreamInputs) -> Result<Self, SizingError> {
        let size = recompute_downstream(inputs)?;
        Ok(Self {
            risk_budget: inputs.risk_budget,
            per_share_loss: inputs.per_share_loss,
            share_count: size.share_count,
            cost_of_trade: size.cost_of_trade,
            ..self.clone()
        })
    }
}
