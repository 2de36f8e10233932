// Repository trait for visual catalog access
use crate::domain::settings::VisualSettings;
use crate::domain::visual::Visual;
use async_trait::async_trait;

/// A catalog entry with its stored settings, before any per-request overrides
#[derive(Debug, Clone)]
pub struct ConfiguredVisual {
    pub visual: Visual,
    pub settings: VisualSettings,
}

#[async_trait]
pub trait VisualRepository: Send + Sync {
    /// List all configured visuals
    async fn list_visuals(&self) -> anyhow::Result<Vec<Visual>>;

    /// Look up one visual and its stored settings
    async fn find_visual(&self, id: &str) -> anyhow::Result<Option<ConfiguredVisual>>;
}
