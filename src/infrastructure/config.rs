use crate::domain::settings::VisualSettings;
use crate::domain::visual::VisualKind;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct VisualsConfig {
    #[serde(default)]
    pub visuals: BTreeMap<String, VisualEntry>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VisualEntry {
    pub kind: VisualKind,
    /// Partial settings layered over the kind's defaults
    #[serde(default)]
    pub settings: Option<serde_json::Value>,
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/server").required(false))
        .add_source(config::Environment::with_prefix("VISUALS").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_visuals_config() -> anyhow::Result<VisualsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/visuals"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn parse_visuals_config(toml: &str) -> anyhow::Result<VisualsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Layer partial settings objects over `base`, later layers winning, then clamp.
///
/// Only the fields present in a layer are replaced; nested tables such as the manual
/// threshold slots merge key by key.
pub fn layer_settings(
    base: &VisualSettings,
    layers: &[&serde_json::Value],
) -> Result<VisualSettings, config::ConfigError> {
    let mut builder = config::Config::builder().add_source(config::Config::try_from(base)?);
    for layer in layers {
        if layer.is_null() {
            continue;
        }
        builder = builder.add_source(config::Config::try_from(*layer)?);
    }

    let settings: VisualSettings = builder.build()?.try_deserialize()?;
    Ok(settings.clamped())
}
