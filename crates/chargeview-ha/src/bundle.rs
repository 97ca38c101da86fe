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

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

use chargeview_types::{EntitySnapshot, RawStateBundle};

use crate::client::HomeAssistantClient;
use crate::error::{HaError, HaResult};

/// Concrete entity ids for the seven logical state sources.
///
/// Non-primary sources follow the integration's fixed naming scheme under a
/// configurable prefix; the primary diagnostics entity comes straight from
/// the card configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntities {
    pub primary: String,
    pub forecast: String,
    pub schedule: String,
    pub soc: String,
    pub battery_power: String,
    pub daily_stats: String,
    pub switch: String,
}

impl SourceEntities {
    /// Derive the non-primary entity ids from an integration prefix, e.g.
    /// `gw_smart_charging` → `sensor.gw_smart_charging_forecast`.
    pub fn with_prefix(primary: impl Into<String>, prefix: &str) -> Self {
        Self {
            primary: primary.into(),
            forecast: format!("sensor.{prefix}_forecast"),
            schedule: format!("sensor.{prefix}_schedule"),
            soc: format!("sensor.{prefix}_soc_forecast"),
            battery_power: format!("sensor.{prefix}_battery_power"),
            daily_stats: format!("sensor.{prefix}_daily_statistics"),
            switch: format!("switch.{prefix}_auto_charging"),
        }
    }
}

/// Anything that can produce a full state bundle for one update cycle.
/// Seam for exercising the widget without a live Home Assistant.
#[async_trait]
pub trait StateSource: Send + Sync {
    async fn fetch_bundle(&self) -> HaResult<RawStateBundle>;

    fn name(&self) -> &str;
}

/// Fetches all card sources from Home Assistant in one pass.
///
/// A missing entity yields `None` for that source; the aggregator turns
/// absence into documented defaults. Only transport and auth failures
/// propagate as errors.
pub struct BundleFetcher {
    client: Arc<HomeAssistantClient>,
    entities: SourceEntities,
}

impl std::fmt::Debug for BundleFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BundleFetcher")
            .field("entities", &self.entities)
            .finish_non_exhaustive()
    }
}

impl BundleFetcher {
    pub fn new(client: Arc<HomeAssistantClient>, entities: SourceEntities) -> Self {
        Self { client, entities }
    }

    pub fn entities(&self) -> &SourceEntities {
        &self.entities
    }

    async fn read_optional(&self, entity_id: &str) -> HaResult<Option<EntitySnapshot>> {
        match self.client.get_state(entity_id).await {
            Ok(state) => Ok(Some(state.into())),
            Err(HaError::EntityNotFound(_)) => {
                debug!("📦 [FETCH] Source absent: {}", entity_id);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl StateSource for BundleFetcher {
    async fn fetch_bundle(&self) -> HaResult<RawStateBundle> {
        info!("📦 [FETCH] Reading card sources for: {}", self.entities.primary);

        let bundle = RawStateBundle {
            primary: self.read_optional(&self.entities.primary).await?,
            forecast: self.read_optional(&self.entities.forecast).await?,
            schedule: self.read_optional(&self.entities.schedule).await?,
            soc: self.read_optional(&self.entities.soc).await?,
            battery_power: self.read_optional(&self.entities.battery_power).await?,
            daily_stats: self.read_optional(&self.entities.daily_stats).await?,
            switch: self.read_optional(&self.entities.switch).await?,
        };

        info!(
            "✅ [FETCH] Sources present: primary={} forecast={} schedule={} soc={} battery_power={} daily_stats={} switch={}",
            bundle.primary.is_some(),
            bundle.forecast.is_some(),
            bundle.schedule.is_some(),
            bundle.soc.is_some(),
            bundle.battery_power.is_some(),
            bundle.daily_stats.is_some(),
            bundle.switch.is_some()
        );
        Ok(bundle)
    }

    fn name(&self) -> &str {
        "HomeAssistant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn entity_body(entity_id: &str, state: &str, attributes: serde_json::Value) -> String {
        json!({
            "entity_id": entity_id,
            "state": state,
            "attributes": attributes,
            "last_updated": "2025-11-03T06:15:00Z"
        })
        .to_string()
    }

    #[test]
    fn test_entity_naming_scheme() {
        let entities = SourceEntities::with_prefix("sensor.diag", "gw_smart_charging");

        assert_eq!(entities.primary, "sensor.diag");
        assert_eq!(entities.forecast, "sensor.gw_smart_charging_forecast");
        assert_eq!(entities.soc, "sensor.gw_smart_charging_soc_forecast");
        assert_eq!(entities.daily_stats, "sensor.gw_smart_charging_daily_statistics");
        assert_eq!(entities.switch, "switch.gw_smart_charging_auto_charging");
    }

    #[tokio::test]
    async fn test_fetch_bundle_tolerates_missing_sources() {
        let mut server = Server::new_async().await;

        let primary = server
            .mock("GET", "/api/states/sensor.diag")
            .with_status(200)
            .with_body(entity_body(
                "sensor.diag",
                "ok",
                json!({ "battery_soc_pct": 58.0 }),
            ))
            .create_async()
            .await;

        // Every other source 404s
        let absent = server
            .mock("GET", Matcher::Regex(r"^/api/states/(sensor|switch)\.gw_".to_owned()))
            .with_status(404)
            .expect(6)
            .create_async()
            .await;

        let client =
            Arc::new(HomeAssistantClient::new(server.url(), "test_token").unwrap());
        let fetcher = BundleFetcher::new(
            client,
            SourceEntities::with_prefix("sensor.diag", "gw_smart_charging"),
        );

        let bundle = fetcher.fetch_bundle().await.unwrap();
        assert!(bundle.primary.is_some());
        assert!(bundle.forecast.is_none());
        assert!(bundle.schedule.is_none());
        assert!(bundle.switch.is_none());

        primary.assert_async().await;
        absent.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_bundle_propagates_auth_failure() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/states/sensor.diag")
            .with_status(401)
            .create_async()
            .await;

        let client = Arc::new(HomeAssistantClient::new(server.url(), "bad").unwrap());
        let fetcher = BundleFetcher::new(
            client,
            SourceEntities::with_prefix("sensor.diag", "gw_smart_charging"),
        );

        assert!(matches!(
            fetcher.fetch_bundle().await,
            Err(HaError::AuthenticationFailed)
        ));
        mock.assert_async().await;
    }
}
