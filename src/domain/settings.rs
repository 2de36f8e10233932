// Visual settings domain model
use serde::{Deserialize, Serialize};

pub const MIN_PRECISION: i32 = 0;
pub const MAX_PRECISION: i32 = 5;
pub const MIN_FONT_SIZE: f64 = 8.0;
pub const MAX_FONT_SIZE: f64 = 72.0;
pub const MANUAL_SLOTS: usize = 5;

/// Operator used to test a value against each threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Comparison {
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterOrEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessOrEqual,
    #[serde(rename = "=")]
    Equal,
}

/// How a state list is ordered before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOrder {
    Ascending,
    Descending,
    Source,
}

impl Comparison {
    /// `quantity <op> boundary`. Equality is exact, without tolerance.
    pub fn holds(self, quantity: f64, boundary: f64) -> bool {
        match self {
            Comparison::Greater => quantity > boundary,
            Comparison::GreaterOrEqual => quantity >= boundary,
            Comparison::Less => quantity < boundary,
            Comparison::LessOrEqual => quantity <= boundary,
            Comparison::Equal => quantity == boundary,
        }
    }

    pub fn state_order(self) -> StateOrder {
        match self {
            Comparison::Less | Comparison::LessOrEqual => StateOrder::Ascending,
            Comparison::Greater | Comparison::GreaterOrEqual => StateOrder::Descending,
            Comparison::Equal => StateOrder::Source,
        }
    }
}

/// Quantity compared against the thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calculate {
    /// The state value itself
    Absolute,
    /// Difference from target
    Modifier,
    /// Difference from target as a fraction of target
    Percentage,
}

impl Calculate {
    pub fn needs_target(self) -> bool {
        !matches!(self, Calculate::Absolute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Classify every row
    None,
    /// Classify one point built from the column totals
    Sum,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ManualThreshold {
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl ManualThreshold {
    pub fn new(value: f64, color: &str) -> Self {
        Self {
            value: Some(value),
            color: Some(color.to_string()),
            text: None,
            icon: None,
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }

    /// A slot takes part only when both its value and its fill color are set
    pub fn is_configured(&self) -> bool {
        self.value.is_some() && self.color.is_some()
    }
}

/// The five manual slots, kept as named fields so layered overrides can address one slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManualThresholds {
    pub slot1: ManualThreshold,
    pub slot2: ManualThreshold,
    pub slot3: ManualThreshold,
    pub slot4: ManualThreshold,
    pub slot5: ManualThreshold,
}

impl ManualThresholds {
    pub fn from_slots(slots: [ManualThreshold; MANUAL_SLOTS]) -> Self {
        let [slot1, slot2, slot3, slot4, slot5] = slots;
        Self {
            slot1,
            slot2,
            slot3,
            slot4,
            slot5,
        }
    }

    pub fn slots(&self) -> [&ManualThreshold; MANUAL_SLOTS] {
        [&self.slot1, &self.slot2, &self.slot3, &self.slot4, &self.slot5]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisualSettings {
    pub comparison: Comparison,
    pub calculate: Calculate,
    pub aggregate: Aggregation,
    pub precision: i32,
    pub font_size: f64,
    pub baseline_color: String,
    pub label: Option<String>,
    pub thresholds: ManualThresholds,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            comparison: Comparison::Greater,
            calculate: Calculate::Absolute,
            aggregate: Aggregation::None,
            precision: 0,
            font_size: 12.0,
            baseline_color: "#333333".to_string(),
            label: None,
            thresholds: ManualThresholds::default(),
        }
    }
}

impl VisualSettings {
    /// Bring out-of-range numeric settings back into their valid range
    pub fn clamped(mut self) -> Self {
        self.precision = self.precision.clamp(MIN_PRECISION, MAX_PRECISION);
        self.font_size = if self.font_size.is_nan() {
            Self::default().font_size
        } else {
            self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
        };
        self
    }
}
