//! Calculator state owned by the presentation layer.

use crate::sizing::{
    ChartSlice, FormField, PositionSizingEngine, RawTradeInput, SizingError, TradeInput,
    TradeMetrics, chart_slices,
};

/// Form values plus the last computed metrics.
///
/// The engine never sees this object; inputs are handed to it by value on
/// every submit or edit.
#[derive(Debug, Clone)]
pub struct CalculatorState {
    form: RawTradeInput,
    metrics: Option<TradeMetrics>,
}

impl CalculatorState {
    /// Start with a pre-filled form and no metrics.
    #[must_use]
    pub const fn new(form: RawTradeInput) -> Self {
        Self {
            form,
            metrics: None,
        }
    }

    /// Current form values.
    #[must_use]
    pub const fn form(&self) -> &RawTradeInput {
        &self.form
    }

    /// Metrics from the last successful evaluation or recomputation.
    #[must_use]
    pub const fn metrics(&self) -> Option<&TradeMetrics> {
        self.metrics.as_ref()
    }

    /// Chart data for the current metrics.
    #[must_use]
    pub fn chart_slices(&self) -> Option<[ChartSlice; 2]> {
        self.metrics.as_ref().and_then(chart_slices)
    }

    /// Evaluate the current form, replacing the metrics wholesale.
    ///
    /// On error the previous metrics are kept.
    pub fn submit(&mut self, engine: &PositionSizingEngine) -> Result<&TradeMetrics, SizingError> {
        let input = TradeInput::try_from(self.form.clone())?;
        let metrics = engine.evaluate(&input)?;

        tracing::debug!(symbol = %input.symbol_name, "Calculator metrics replaced");
        Ok(self.metrics.insert(metrics))
    }

    /// Edit one form field.
    ///
    /// After a first evaluation, edits to a field that feeds the share count
    /// recalculate `riskBudget`, `perShareLoss`, `shareCount` and
    /// `costOfTrade` from the edited form. Other metrics wait for the next
    /// submit.
    ///
    /// The edit itself is always kept. If the edited form is invalid the
    /// error is returned and the previous metrics stay in place.
    pub fn set_field(
        &mut self,
        engine: &PositionSizingEngine,
        field: FormField,
        value: impl Into<String>,
    ) -> Result<Option<&TradeMetrics>, SizingError> {
        self.form.set(field, value.into());

        if self.metrics.is_none() {
            return Ok(None);
        }
        if !field.feeds_position_size() {
            return Ok(self.metrics.as_ref());
        }

        let input = TradeInput::try_from(self.form.clone())?;
        let downstream = engine.downstream_inputs(&input)?;
        let Some(current) = self.metrics.as_ref() else {
            return Ok(None);
        };
        let next = current.with_downstream(&downstream)?;

        tracing::debug!(
            field = field.as_str(),
            share_count = next.share_count,
            "Downstream metrics recalculated"
        );
        Ok(Some(self.metrics.insert(next)))
    }

    /// Drop the current metrics, keeping the form.
    pub fn clear(&mut self) {
        self.metrics = None;
    }
}
