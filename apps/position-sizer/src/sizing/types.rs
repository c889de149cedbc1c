//! Core types for trade evaluation.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use super::error::SizingError;
use super::rounding::round2;

/// A field of the trade form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    /// Account equity.
    PortfolioSize,
    /// Ticker, advisory only.
    SymbolName,
    /// Percent of the portfolio the trader accepts losing.
    MaxPercentLoss,
    /// Planned entry price.
    EntryPrice,
    /// Stop-loss exit price.
    StopExitPrice,
    /// Profit target price.
    TargetPrice,
}

impl FormField {
    /// All fields, in form order.
    pub const ALL: [Self; 6] = [
        Self::PortfolioSize,
        Self::SymbolName,
        Self::MaxPercentLoss,
        Self::EntryPrice,
        Self::StopExitPrice,
        Self::TargetPrice,
    ];

    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PortfolioSize => "portfolioSize",
            Self::SymbolName => "symbolName",
            Self::MaxPercentLoss => "maxPercentLoss",
            Self::EntryPrice => "entryPrice",
            Self::StopExitPrice => "stopExitPrice",
            Self::TargetPrice => "targetPrice",
        }
    }

    /// Whether the field feeds `riskBudget`, `perShareLoss` or the cost of
    /// the trade, and so triggers a downstream recomputation when edited.
    #[must_use]
    pub const fn feeds_position_size(&self) -> bool {
        matches!(
            self,
            Self::PortfolioSize | Self::MaxPercentLoss | Self::EntryPrice | Self::StopExitPrice
        )
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormField {
    type Err = SizingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| SizingError::invalid("field", format!("Unknown form field '{s}'")))
    }
}

/// Trade form values exactly as entered, before numeric validation.
///
/// Accepts JSON/YAML numbers as well as strings for every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTradeInput {
    /// Account equity.
    #[serde(deserialize_with = "string_or_number")]
    pub portfolio_size: String,
    /// Ticker, advisory only.
    #[serde(default, deserialize_with = "string_or_number")]
    pub symbol_name: String,
    /// Percent of the portfolio the trader accepts losing.
    #[serde(deserialize_with = "string_or_number")]
    pub max_percent_loss: String,
    /// Planned entry price.
    #[serde(deserialize_with = "string_or_number")]
    pub entry_price: String,
    /// Stop-loss exit price.
    #[serde(deserialize_with = "string_or_number")]
    pub stop_exit_price: String,
    /// Profit target price.
    #[serde(deserialize_with = "string_or_number")]
    pub target_price: String,
}

impl RawTradeInput {
    /// Current value of a field.
    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::PortfolioSize => &self.portfolio_size,
            FormField::SymbolName => &self.symbol_name,
            FormField::MaxPercentLoss => &self.max_percent_loss,
            FormField::EntryPrice => &self.entry_price,
            FormField::StopExitPrice => &self.stop_exit_price,
            FormField::TargetPrice => &self.target_price,
        }
    }

    /// Replace a field's value.
    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::PortfolioSize => &mut self.portfolio_size,
            FormField::SymbolName => &mut self.symbol_name,
            FormField::MaxPercentLoss => &mut self.max_percent_loss,
            FormField::EntryPrice => &mut self.entry_price,
            FormField::StopExitPrice => &mut self.stop_exit_price,
            FormField::TargetPrice => &mut self.target_price,
        };
        *slot = value;
    }
}

/// Validated input for a single trade evaluation.
///
/// Only numeric parsing happens here; range checks belong to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeInput {
    /// Account equity in currency units.
    pub portfolio_size: Decimal,
    /// Ticker, advisory only.
    #[serde(default)]
    pub symbol_name: String,
    /// Percent of the portfolio the trader accepts losing.
    pub max_percent_loss: Decimal,
    /// Planned entry price.
    pub entry_price: Decimal,
    /// Stop-loss exit price (below entry for a long).
    pub stop_exit_price: Decimal,
    /// Profit target price (above entry for a long).
    pub target_price: Decimal,
}

impl TryFrom<RawTradeInput> for TradeInput {
    type Error = SizingError;

    fn try_from(raw: RawTradeInput) -> Result<Self, Self::Error> {
        Ok(Self {
            portfolio_size: parse_decimal(FormField::PortfolioSize, &raw.portfolio_size)?,
            max_percent_loss: parse_decimal(FormField::MaxPercentLoss, &raw.max_percent_loss)?,
            entry_price: parse_decimal(FormField::EntryPrice, &raw.entry_price)?,
            stop_exit_price: parse_decimal(FormField::StopExitPrice, &raw.stop_exit_price)?,
            target_price: parse_decimal(FormField::TargetPrice, &raw.target_price)?,
            symbol_name: raw.symbol_name.trim().to_string(),
        })
    }
}

fn parse_decimal(field: FormField, value: &str) -> Result<Decimal, SizingError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SizingError::invalid(field.as_str(), "Value is required"));
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|_| SizingError::invalid(field.as_str(), format!("'{trimmed}' is not a number")))
}

/// Metrics derived from one evaluation.
///
/// Always produced whole; a new evaluation replaces the previous record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeMetrics {
    /// Currency amount the trader is willing to lose.
    pub risk_budget: Decimal,
    /// Entry minus stop, 2 dp.
    pub per_share_loss: Decimal,
    /// Target minus entry, 2 dp.
    pub per_share_gain: Decimal,
    /// Loss as percent of entry, 2 dp.
    pub loss_percent_of_entry: Decimal,
    /// Whole shares to buy.
    pub share_count: u64,
    /// Entry price times share count.
    pub cost_of_trade: Decimal,
    /// Per-share gain times share count.
    pub profit_target: Decimal,
    /// Target move as percent of entry, 2 dp.
    pub profit_target_percent: Decimal,
}

impl TradeMetrics {
    /// Per-share gain over per-share loss, 2 dp.
    ///
    /// `None` when the per-share loss is zero.
    #[must_use]
    pub fn reward_to_risk(&self) -> Option<Decimal> {
        self.per_share_gain
            .checked_div(self.per_share_loss)
            .map(round2)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrNumber;

    impl Visitor<'_> for StringOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or a number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}
