// Config-backed visual catalog
use crate::application::visual_repository::{ConfiguredVisual, VisualRepository};
use crate::domain::visual::Visual;
use crate::infrastructure::config::{layer_settings, VisualsConfig};
use anyhow::{Context, Result};
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct ConfigVisualRepository {
    config: VisualsConfig,
}

impl ConfigVisualRepository {
    pub fn new(config: VisualsConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl VisualRepository for ConfigVisualRepository {
    async fn list_visuals(&self) -> Result<Vec<Visual>> {
        Ok(self
            .config
            .visuals
            .iter()
            .map(|(id, entry)| Visual::new(id.clone(), entry.kind))
            .collect())
    }

    async fn find_visual(&self, id: &str) -> Result<Option<ConfiguredVisual>> {
        let Some(entry) = self.config.visuals.get(id) else {
            return Ok(None);
        };

        let defaults = entry.kind.default_settings();
        let settings = match &entry.settings {
            Some(overrides) => layer_settings(&defaults, &[overrides])
                .with_context(|| format!("Invalid settings for visual {}", id))?,
            None => defaults,
        };

        Ok(Some(ConfiguredVisual {
            visual: Visual::new(id.to_string(), entry.kind),
            settings,
        }))
    }
}
