// Data view domain model - the tabular snapshot a visual is rendered from
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Semantic role of a measure column, resolved once when the view is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Values")]
    Value,
    #[serde(rename = "TargetValue")]
    StateValue,
    #[serde(rename = "target")]
    Target,
    #[serde(rename = "states")]
    States,
    /// Any role this service does not know; the column takes part in nothing
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataView {
    #[serde(default)]
    pub categorical: Option<Categorical>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Categorical {
    #[serde(default)]
    pub categories: Option<CategoryColumn>,
    #[serde(default)]
    pub values: Vec<MeasureColumn>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryColumn {
    pub display_name: String,
    #[serde(default)]
    pub values: Vec<CategoryValue>,
}

/// A category label. Dates are tried before plain text so RFC 3339 strings keep their type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryValue {
    Number(f64),
    Date(DateTime<Utc>),
    Text(String),
}

/// Presentation overrides attached to a bound threshold column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateOverride {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasureColumn {
    pub display_name: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub overrides: Option<StateOverride>,
    #[serde(default, deserialize_with = "numeric_cells")]
    pub values: Vec<Option<f64>>,
}

/// Cells that are not numbers read as null
fn numeric_cells<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let cells = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(cells.iter().map(serde_json::Value::as_f64).collect())
}

impl MeasureColumn {
    pub fn new(display_name: &str, roles: &[Role], values: Vec<Option<f64>>) -> Self {
        Self {
            display_name: display_name.to_string(),
            roles: roles.to_vec(),
            format: None,
            overrides: None,
            values,
        }
    }

    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    pub fn with_overrides(mut self, overrides: StateOverride) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Cell `row`, treating rows past the end of a short column as null
    pub fn cell(&self, row: usize) -> Option<f64> {
        self.values.get(row).copied().flatten()
    }
}

impl DataView {
    pub fn categorical(categories: Option<CategoryColumn>, values: Vec<MeasureColumn>) -> Self {
        Self {
            categorical: Some(Categorical { categories, values }),
        }
    }
}

impl Categorical {
    /// Rows come from the category column; without one, from the longest measure column
    pub fn row_count(&self) -> usize {
        match &self.categories {
            Some(categories) => categories.values.len(),
            None => self.values.iter().map(|c| c.values.len()).max().unwrap_or(0),
        }
    }

    pub fn category(&self, row: usize) -> Option<CategoryValue> {
        self.categories
            .as_ref()
            .and_then(|c| c.values.get(row).cloned())
    }

    pub fn has_column_with(&self, role: Role) -> bool {
        self.values.iter().any(|c| c.has_role(role))
    }
}
