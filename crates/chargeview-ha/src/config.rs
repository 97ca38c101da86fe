// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of ChargeView.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::Path;

use chargeview_core::CardConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub widget: WidgetSettings,
    #[serde(default)]
    pub ha: HaSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WidgetSettings {
    /// Primary diagnostics entity; the only required setting.
    #[serde(default)]
    pub entity: String,
    /// Prefix shared by the integration's companion entities.
    #[serde(default = "default_entity_prefix")]
    pub entity_prefix: String,
    #[serde(default = "default_title")]
    pub title: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HaSettings {
    /// Base URL of Home Assistant; HA_BASE_URL overrides when unset.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Long-lived access token; prefer the HA_TOKEN environment variable
    /// over storing it in the config file.
    #[serde(default)]
    pub token: Option<String>,
}

fn default_entity_prefix() -> String {
    "gw_smart_charging".to_owned()
}

fn default_title() -> String {
    "⚡ Smart Charging".to_owned()
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(Path::new(path))
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: Self =
            toml::from_str(&content).with_context(|| "Failed to parse config TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.widget.entity.trim().is_empty() {
            bail!("widget.entity must be set (e.g. sensor.gw_smart_charging_diagnostics)");
        }
        Ok(())
    }

    /// Card configuration handed to the core widget.
    pub fn card_config(&self) -> CardConfig {
        CardConfig {
            entity: self.widget.entity.clone(),
            title: self.widget.title.clone(),
        }
    }
}
