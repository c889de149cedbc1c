//! HTTP request DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::sizing::{DownstreamInputs, RawTradeInput};

/// Request to evaluate a trade from form values.
///
/// Field values may be JSON strings or numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvaluateRequest {
    /// Form values as entered.
    pub form: RawTradeInput,
}

/// Request to recompute share count and cost from upstream values.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RecomputeRequest {
    /// Latest risk budget.
    pub risk_budget: Decimal,
    /// Latest per-share loss.
    pub per_share_loss: Decimal,
    /// Latest entry price.
    pub entry_price: Decimal,
}

impl From<RecomputeRequest> for DownstreamInputs {
    fn from(request: RecomputeRequest) -> Self {
        Self {
            risk_budget: request.risk_budget,
            per_share_loss: request.per_share_loss,
            entry_price: request.entry_price,
        }
    }
}
