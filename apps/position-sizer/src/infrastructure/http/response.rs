//! HTTP response DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::sizing::{ChartSlice, FormulaMode, TradeMetrics};

/// Response from a trade evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateResponse {
    /// Symbol echoed from the request.
    pub symbol_name: String,
    /// Formulas used.
    pub formula_mode: FormulaMode,
    /// Derived metrics.
    pub metrics: TradeMetrics,
    /// Max-loss / max-gain slices, when both are positive.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub chart: Option<[ChartSlice; 2]>,
    /// Per-share gain over per-share loss.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub reward_to_risk: Option<Decimal>,
}

/// Response from a downstream recomputation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecomputeResponse {
    /// Whole shares to buy.
    pub share_count: u64,
    /// Entry price times share count.
    pub cost_of_trade: Decimal,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}
