// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp))]

//! Position Sizer - Rust Core Library
//!
//! Deterministic position sizing for a single discretionary equity trade.
//!
//! # Layout
//!
//! - [`sizing`]: the Position Sizing Engine. Pure, stateless, no I/O.
//! - [`calculator`]: explicit presentation-side state (form values and the
//!   last computed metrics) with the "recalculate downstream" step.
//! - [`infrastructure`]: HTTP adapter and Prometheus metrics.
//! - [`config`], [`error`], [`telemetry`]: service plumbing.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod calculator;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod sizing;
pub mod telemetry;

pub use calculator::CalculatorState;
pub use error::{ApiError, ErrorCode};
pub use infrastructure::http::{AppState, create_router};
pub use sizing::{
    FormulaMode, PositionSizingEngine, SizingError, TradeInput, TradeMetrics, evaluate,
};
