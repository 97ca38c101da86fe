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

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use chargeview_types::{DisplayModel, RawStateBundle};

use crate::builder;
use crate::error::{CardError, CardResult};
use crate::render::{self, ViewTree};

/// Card configuration as provided by the host.
///
/// `entity` is the only required field: the identifier of the primary
/// diagnostics source. A missing or blank entity fails setup before any
/// rendering is attempted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CardConfig {
    #[serde(default)]
    pub entity: String,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    "⚡ Smart Charging".to_owned()
}

impl CardConfig {
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            title: default_title(),
        }
    }

    /// Parse and validate a host-supplied configuration object.
    pub fn from_value(value: &Value) -> CardResult<Self> {
        let config: Self = serde_json::from_value(value.clone())
            .map_err(|e| CardError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CardResult<()> {
        if self.entity.trim().is_empty() {
            return Err(CardError::MissingEntity);
        }
        Ok(())
    }
}

/// The widget instance driven by the host: `configure` once, then any
/// number of `update_state` / `render` cycles.
///
/// The only retained state is the last display model, overwritten wholesale
/// on each update; `render` rebuilds the view tree only when the model
/// actually changed since the previous render.
#[derive(Debug, Default)]
pub struct CardWidget {
    config: Option<CardConfig>,
    model: Option<DisplayModel>,
    rendered_for: Option<DisplayModel>,
    tree: Option<ViewTree>,
}

impl CardWidget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply host configuration. Fatal on a missing `entity`; not retried.
    pub fn configure(&mut self, config: CardConfig) -> CardResult<()> {
        config.validate()?;
        info!("🗂️ [CARD] Configured for entity: {}", config.entity);
        self.config = Some(config);
        // Title or entity may have changed; force the next render
        self.rendered_for = None;
        self.tree = None;
        Ok(())
    }

    /// Ingest a freshly pushed state bundle and re-derive the display model.
    pub fn update_state(&mut self, bundle: &RawStateBundle) {
        let slots = bundle.schedule_slots();
        self.model = Some(builder::build(bundle, &slots));
    }

    /// Produce the visual tree for the current model.
    ///
    /// Returns `None` until both configuration and a first state bundle have
    /// arrived. Re-invoking without a state change returns the cached tree.
    pub fn render(&mut self) -> Option<&ViewTree> {
        let config = self.config.as_ref()?;
        let model = self.model.as_ref()?;

        if self.rendered_for.as_ref() != Some(model) {
            debug!("🖼️ [CARD] Model changed, rebuilding view tree");
            self.tree = Some(render::build_view(config, model));
            self.rendered_for = Some(model.clone());
        }
        self.tree.as_ref()
    }

    /// Last derived display model, if any state has been pushed yet.
    pub fn model(&self) -> Option<&DisplayModel> {
        self.model.as_ref()
    }

    pub fn config(&self) -> Option<&CardConfig> {
        self.config.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargeview_types::EntitySnapshot;
    use serde_json::json;

    #[test]
    fn test_config_requires_entity() {
        assert!(matches!(
            CardConfig::from_value(&json!({})),
            Err(CardError::MissingEntity)
        ));
        assert!(matches!(
            CardConfig::from_value(&json!({ "entity": "  " })),
            Err(CardError::MissingEntity)
        ));
    }

    #[test]
    fn test_config_accepts_entity_and_defaults_title() {
        let config = CardConfig::from_value(&json!({ "entity": "sensor.diag" })).unwrap();
        assert_eq!(config.entity, "sensor.diag");
        assert_eq!(config.title, "⚡ Smart Charging");
    }

    #[test]
    fn test_config_rejects_non_object() {
        assert!(matches!(
            CardConfig::from_value(&json!("sensor.diag")),
            Err(CardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_render_requires_config_and_state() {
        let mut widget = CardWidget::new();
        assert!(widget.render().is_none());

        widget.configure(CardConfig::new("sensor.diag")).unwrap();
        assert!(widget.render().is_none());

        widget.update_state(&RawStateBundle::default());
        assert!(widget.render().is_some());
    }

    #[test]
    fn test_unconfigured_widget_can_still_ingest_state() {
        let mut widget = CardWidget::new();
        widget.update_state(&RawStateBundle::default());
        assert!(widget.model().is_some());
        assert!(widget.render().is_none());
    }

    #[test]
    fn test_render_caches_until_model_changes() {
        let mut widget = CardWidget::new();
        widget.configure(CardConfig::new("sensor.diag")).unwrap();

        let bundle = RawStateBundle::with_primary(EntitySnapshot::new(
            json!("ok"),
            [("battery_soc_pct".to_owned(), json!(50.0))],
        ));
        widget.update_state(&bundle);
        let first = widget.render().cloned().unwrap();

        // Same bundle again: the tree is identical
        widget.update_state(&bundle);
        assert_eq!(widget.render(), Some(&first));

        // Changed SOC: the tree must be rebuilt
        let changed = RawStateBundle::with_primary(EntitySnapshot::new(
            json!("ok"),
            [("battery_soc_pct".to_owned(), json!(51.0))],
        ));
        widget.update_state(&changed);
        assert_ne!(widget.render(), Some(&first));
    }

    #[test]
    fn test_missing_primary_renders_not_found() {
        let mut widget = CardWidget::new();
        widget.configure(CardConfig::new("sensor.diag")).unwrap();
        widget.update_state(&RawStateBundle::default());

        assert!(matches!(
            widget.render(),
            Some(ViewTree::NotFound { entity }) if entity == "sensor.diag"
        ));
    }
}
