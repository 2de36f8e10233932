// Visual domain model
use super::settings::{Calculate, Comparison, VisualSettings};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisualKind {
    Card,
    CardWithStates,
}

impl VisualKind {
    pub fn default_settings(self) -> VisualSettings {
        match self {
            VisualKind::Card => VisualSettings::default(),
            VisualKind::CardWithStates => VisualSettings {
                comparison: Comparison::GreaterOrEqual,
                calculate: Calculate::Percentage,
                precision: 2,
                font_size: 16.0,
                ..VisualSettings::default()
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Visual {
    pub id: String,
    pub name: String,
    pub kind: VisualKind,
}

impl Visual {
    pub fn new(id: String, kind: VisualKind) -> Self {
        let name = Self::format_name(&id);
        Self { id, name, kind }
    }

    /// "margin_vs-goal" -> "Margin vs goal"
    fn format_name(id: &str) -> String {
        let words: Vec<&str> = id.split(['_', '-']).filter(|w| !w.is_empty()).collect();
        let name = words.join(" ");
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => id.to_string(),
        }
    }
}
