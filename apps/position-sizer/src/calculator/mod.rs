//! Presentation-side calculator state.
//!
//! Holds form values and the last computed metrics in one explicit object,
//! and runs the "recalculate downstream" step when an edit changes the risk
//! budget, the per-share loss or the entry price.

mod state;

pub use state::CalculatorState;
