//! Position sizing for a single long equity trade.
//!
//! Given a portfolio size, a maximum tolerable loss percentage, an entry, a
//! stop and a target, derives:
//! - the risk budget and the share count that keeps a stop-out within it
//! - the cost of the trade
//! - per-share loss and gain, and the aggregate profit target
//! - loss and profit-target percentages of the entry price
//!
//! The engine is a pure function block: the same [`TradeInput`] always
//! yields the same [`TradeMetrics`].
//!
//! # Example
//!
//! ```rust,ignore
//! use position_sizer::sizing::{TradeInput, evaluate};
//! use rust_decimal_macros::dec;
//!
//! let input = TradeInput {
//!     portfolio_size: dec!(150000),
//!     symbol_name: "AC".to_string(),
//!     max_percent_loss: dec!(9),
//!     entry_price: dec!(115.54),
//!     stop_exit_price: dec!(88.10),
//!     target_price: dec!(150),
//! };
//!
//! let metrics = evaluate(&input)?;
//! assert_eq!(metrics.share_count, 5);
//! assert_eq!(metrics.cost_of_trade, dec!(577.70));
//! ```

mod chart;
mod engine;
mod error;
mod recompute;
mod rounding;
mod types;

pub use chart::{ChartSlice, MAX_GAIN_LABEL, MAX_LOSS_LABEL, chart_slices};
pub use engine::{FormulaMode, PositionSizingEngine, evaluate};
pub use error::SizingError;
pub use recompute::{DownstreamInputs, PositionSize, recompute_downstream};
pub use rounding::{round0, round2};
pub use types::{FormField, RawTradeInput, TradeInput, TradeMetrics};
