// Visual service - Use case for rendering a configured visual from a data view
use crate::application::error::VisualError;
use crate::application::state_classifier::classify;
use crate::application::view_model_builder::build;
use crate::application::visual_repository::VisualRepository;
use crate::domain::data_view::{CategoryValue, DataView};
use crate::domain::settings::{Aggregation, VisualSettings};
use crate::domain::view_model::{DataPoint, ViewModel};
use crate::domain::visual::Visual;
use crate::infrastructure::config::layer_settings;
use serde::Serialize;
use std::sync::Arc;

/// One classified point, ready for a renderer to draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCard {
    pub category: Option<CategoryValue>,
    pub display_name: String,
    pub value: Option<f64>,
    pub target: Option<f64>,
    pub format: Option<String>,
    pub state_index: Option<usize>,
    pub color: String,
    pub text: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedVisual {
    pub visual: Visual,
    pub settings: VisualSettings,
    pub cards: Vec<RenderedCard>,
    pub total_value: Option<f64>,
    pub total_target: Option<f64>,
}

#[derive(Clone)]
pub struct VisualService {
    repository: Arc<dyn VisualRepository>,
}

impl VisualService {
    pub fn new(repository: Arc<dyn VisualRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_visuals(&self) -> anyhow::Result<Vec<Visual>> {
        self.repository.list_visuals().await
    }

    /// Run one update: layer request settings, build the view model and classify it
    pub async fn render(
        &self,
        id: &str,
        data_view: &DataView,
        overrides: Option<&serde_json::Value>,
    ) -> Result<RenderedVisual, VisualError> {
        let configured = self
            .repository
            .find_visual(id)
            .await?
            .ok_or_else(|| VisualError::UnknownVisual(id.to_string()))?;

        let settings = match overrides {
            Some(overrides) => layer_settings(&configured.settings, &[overrides])?,
            None => configured.settings,
        };

        let model = build(data_view, &settings);
        let cards = render_cards(&model);

        tracing::debug!(
            "Rendered visual {}: {} data points, {} cards",
            id,
            model.data_points.len(),
            cards.len()
        );

        Ok(RenderedVisual {
            visual: configured.visual,
            cards,
            total_value: model.total_value,
            total_target: model.total_target,
            settings: model.settings,
        })
    }
}

/// Classify every point, or the single totals point in `sum` mode
pub fn render_cards(model: &ViewModel) -> Vec<RenderedCard> {
    match model.settings.aggregate {
        Aggregation::None => model
            .data_points
            .iter()
            .map(|point| render_card(point, &model.settings))
            .collect(),
        Aggregation::Sum => model
            .aggregate_point()
            .map(|point| render_card(&point, &model.settings))
            .into_iter()
            .collect(),
    }
}

fn render_card(point: &DataPoint, settings: &VisualSettings) -> RenderedCard {
    let state_index = classify(point, settings);
    let state = state_index.and_then(|i| point.states.get(i));

    RenderedCard {
        category: point.category.clone(),
        display_name: point.display_name.clone(),
        value: point.value,
        target: point.target,
        format: point.format.clone(),
        state_index,
        color: state
            .and_then(|s| s.color.clone())
            .unwrap_or_else(|| settings.baseline_color.clone()),
        text: state.and_then(|s| s.text.clone()),
        icon: state.and_then(|s| s.icon.clone()),
    }
}
