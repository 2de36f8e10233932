// View model domain - data points and their threshold states
use super::data_view::CategoryValue;
use super::settings::VisualSettings;
use serde::Serialize;

/// One configured or computed boundary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdState {
    pub value: f64,
    pub color: Option<String>,
    pub text: Option<String>,
    pub icon: Option<String>,
    pub is_target: bool,
    pub source_position: usize,
}

impl ThresholdState {
    pub fn new(value: f64, source_position: usize) -> Self {
        Self {
            value,
            color: None,
            text: None,
            icon: None,
            is_target: false,
            source_position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub category: Option<CategoryValue>,
    pub display_name: String,
    pub value: Option<f64>,
    pub state_value: Option<f64>,
    pub target: Option<f64>,
    pub target_display_name: Option<String>,
    pub states: Vec<ThresholdState>,
    pub format: Option<String>,
}

impl DataPoint {
    /// Value compared against thresholds: the state measure, falling back to the primary one
    pub fn comparison_value(&self) -> Option<f64> {
        self.state_value.or(self.value)
    }

    pub fn is_percentage(&self) -> bool {
        self.format.as_deref().is_some_and(|f| f.contains('%'))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub data_points: Vec<DataPoint>,
    pub total_value: Option<f64>,
    pub total_state_value: Option<f64>,
    pub total_target: Option<f64>,
    /// Settings snapshot the model was built with, after any calculate downgrade
    pub settings: VisualSettings,
}

impl ViewModel {
    pub fn empty(settings: VisualSettings) -> Self {
        Self {
            data_points: Vec::new(),
            total_value: None,
            total_state_value: None,
            total_target: None,
            settings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data_points.is_empty()
    }

    /// Single point standing for the whole column, used by `sum` aggregation
    pub fn aggregate_point(&self) -> Option<DataPoint> {
        let first = self.data_points.first()?;
        let value = self.total_value?;
        Some(DataPoint {
            category: None,
            display_name: first.display_name.clone(),
            value: Some(value),
            state_value: Some(self.total_state_value.unwrap_or(value)),
            target: self.total_target,
            target_display_name: first.target_display_name.clone(),
            states: first.states.clone(),
            format: first.format.clone(),
        })
    }
}
