//! Max-loss vs. max-gain chart data.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::TradeMetrics;

/// Label of the loss slice.
pub const MAX_LOSS_LABEL: &str = "Max loss";
/// Label of the gain slice.
pub const MAX_GAIN_LABEL: &str = "Max gain";

/// One slice of the two-slice donut chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlice {
    /// Display label.
    pub label: String,
    /// Slice magnitude.
    pub value: Decimal,
}

/// Loss and gain slices for a donut chart, in that order.
///
/// Returns `None` unless both the per-share loss and the per-share gain are
/// strictly positive; there is nothing meaningful to draw otherwise.
#[must_use]
pub fn chart_slices(metrics: &TradeMetrics) -> Option<[ChartSlice; 2]> {
    if metrics.per_share_loss <= Decimal::ZERO || metrics.per_share_gain <= Decimal::ZERO {
        return None;
    }

    Some([
        ChartSlice {
            label: MAX_LOSS_LABEL.to_string(),
            value: metrics.per_share_loss,
        },
        ChartSlice {
            label: MAX_GAIN_LABEL.to_string(),
            value: metrics.per_share_gain,
        },
    ])
}
