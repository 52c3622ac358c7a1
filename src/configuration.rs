use config::Config;
use serde::Deserialize;
use std::{path::PathBuf, time::Duration};
use tracing::*;

use crate::{sink::EndpointConfig, velocity::SpeedLimits};

#[derive(Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub endpoint: EndpointConfig,
    #[serde(default)]
    pub limits: SpeedLimits,
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl AppConfig {
    pub fn load_config(config: &Option<PathBuf>) -> anyhow::Result<Self> {
        let settings = if let Some(config) = config {
            info!("Using configuration from {:?}", config);
            Config::builder()
                .add_source(config::File::with_name(
                    config
                        .to_str()
                        .ok_or_else(|| anyhow::anyhow!("Failed to convert path"))?,
                ))
                .add_source(config::Environment::with_prefix("APP").separator("__"))
                .build()?
        } else {
            info!("Using dev configuration");
            Config::builder()
                .add_source(config::File::with_name("config/settings"))
                .add_source(config::File::with_name("config/dev_settings").required(false))
                .add_source(config::Environment::with_prefix("APP").separator("__"))
                .build()?
        };

        Ok(settings.try_deserialize()?)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct DispatchConfig {
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

fn default_min_interval_ms() -> u64 {
    100
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

impl DispatchConfig {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}
