// State classifier - Picks the threshold state that applies to a data point
use crate::domain::settings::{Calculate, Comparison, VisualSettings};
use crate::domain::view_model::{DataPoint, ThresholdState};

/// Inputs of one classification, detached from the data point they came from
#[derive(Debug, Clone, Copy)]
pub struct Reading<'a> {
    pub state_value: f64,
    pub target: Option<f64>,
    pub are_percentages: bool,
    pub states: &'a [ThresholdState],
}

impl Reading<'_> {
    /// Quantity compared against each boundary for the given calculate mode
    pub fn quantity(&self, calculate: Calculate) -> f64 {
        // A zero target counts as no target
        let target = self.target.filter(|t| *t != 0.0);
        let diff = target.map_or(0.0, |t| self.state_value - t);
        let variance = match target {
            Some(_) if self.are_percentages => diff,
            Some(t) => diff / t,
            None => 0.0,
        };

        match calculate {
            Calculate::Absolute => self.state_value,
            Calculate::Modifier => diff,
            Calculate::Percentage => variance,
        }
    }
}

/// Index of the first state whose boundary the reading satisfies
pub fn classify_reading(
    reading: &Reading<'_>,
    comparison: Comparison,
    calculate: Calculate,
) -> Option<usize> {
    let quantity = reading.quantity(calculate);
    reading
        .states
        .iter()
        .position(|state| comparison.holds(quantity, state.value))
}

/// Classify a data point built with `settings`. Points without a value never match.
pub fn classify(point: &DataPoint, settings: &VisualSettings) -> Option<usize> {
    let reading = Reading {
        state_value: point.comparison_value()?,
        target: point.target,
        are_percentages: point.is_percentage(),
        states: &point.states,
    };
    classify_reading(&reading, settings.comparison, settings.calculate)
}
