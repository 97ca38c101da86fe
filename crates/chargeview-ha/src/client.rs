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

use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::error::{HaError, HaResult};
use crate::types::HaEntityState;

/// Home Assistant REST API client, trimmed to what the card needs: entity
/// state reads, service calls for the switch toggle, and a health ping.
#[derive(Debug, Clone)]
pub struct HomeAssistantClient {
    base_url: String,
    token: String,
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl HomeAssistantClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> HaResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| HaError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: token.into(),
            client,
            max_retries: 3,
            retry_delay: Duration::from_millis(500),
        })
    }

    /// Create a client using the Supervisor API, the standard path for HA
    /// addons.
    pub fn from_supervisor() -> HaResult<Self> {
        let token = std::env::var("SUPERVISOR_TOKEN").map_err(|_| {
            HaError::ConfigError(
                "SUPERVISOR_TOKEN environment variable not set. Are you running as an HA addon?"
                    .to_owned(),
            )
        })?;
        info!("Initializing HA client using Supervisor API");
        Self::new("http://supervisor/core", token)
    }

    /// Create a client from configuration values, falling back to the
    /// HA_BASE_URL / HA_TOKEN environment variables.
    pub fn from_config(base_url: Option<String>, token: Option<String>) -> HaResult<Self> {
        let base_url = base_url
            .or_else(|| std::env::var("HA_BASE_URL").ok())
            .unwrap_or_else(|| "http://localhost:8123".to_owned());

        let token = token
            .or_else(|| std::env::var("HA_TOKEN").ok())
            .ok_or_else(|| {
                HaError::ConfigError(
                    "HA token not found in config or HA_TOKEN environment variable".to_owned(),
                )
            })?;

        info!("Initializing HA client from configuration: {}", base_url);
        Self::new(base_url, token)
    }

    /// Set custom retry configuration
    pub fn with_retry_config(mut self, max_retries: u32, retry_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_delay = retry_delay;
        self
    }

    /// Get the state of a specific entity.
    pub async fn get_state(&self, entity_id: &str) -> HaResult<HaEntityState> {
        let url = format!("{}/api/states/{}", self.base_url, entity_id);
        debug!("🔍 [HA QUERY] Getting state for entity: {}", entity_id);

        let response = self.get_with_retry(&url).await?;
        match response.status() {
            StatusCode::OK => {
                let state = response.json::<HaEntityState>().await?;
                debug!("✅ [HA RESULT] {} = '{}'", entity_id, state.state);
                Ok(state)
            }
            StatusCode::NOT_FOUND => {
                debug!("⚠️ [HA RESULT] Entity not found: {}", entity_id);
                Err(HaError::EntityNotFound(entity_id.to_owned()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!("❌ [HA ERROR] Authentication failed for: {}", entity_id);
                Err(HaError::AuthenticationFailed)
            }
            status => Err(HaError::ApiError {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Call a Home Assistant service, e.g. `switch.turn_on`.
    pub async fn call_service(&self, service: &str, data: Value) -> HaResult<()> {
        let Some((domain, action)) = service.split_once('.') else {
            return Err(HaError::ServiceCallFailed {
                service: service.to_owned(),
                reason: "Invalid service format, expected 'domain.service'".to_owned(),
            });
        };

        let url = format!("{}/api/services/{}/{}", self.base_url, domain, action);
        info!("📞 [HA SERVICE] Calling: {} with {}", service, data);

        let mut attempt = 0;
        let response = loop {
            attempt += 1;
            let result = self
                .client
                .post(&url)
                .bearer_auth(&self.token)
                .json(&data)
                .send()
                .await;
            match result {
                Ok(response) => break response,
                Err(e) if attempt >= self.max_retries => return Err(HaError::HttpError(e)),
                Err(e) => {
                    warn!("Request failed (attempt {}/{}): {}", attempt, self.max_retries, e);
                    tokio::time::sleep(self.retry_delay * attempt).await;
                }
            }
        };

        let status = response.status();
        match status {
            StatusCode::OK => {
                info!("✅ [HA SERVICE] Success: {}", service);
                Ok(())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                error!("❌ [HA SERVICE] Authentication failed for: {}", service);
                Err(HaError::AuthenticationFailed)
            }
            _status => {
                let reason = response.text().await.unwrap_or_default();
                error!("❌ [HA SERVICE] Failed: {} (status: {})", service, status);
                Err(HaError::ServiceCallFailed {
                    service: service.to_owned(),
                    reason,
                })
            }
        }
    }

    /// Health check - ping the HA API. Never errors; unreachable is `false`.
    pub async fn ping(&self) -> bool {
        let url = format!("{}/api/", self.base_url);
        match self.client.get(&url).bearer_auth(&self.token).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("Health check failed: {}", e);
                false
            }
        }
    }

    /// GET with linear backoff on transport errors. HTTP error statuses are
    /// not retried; callers classify them.
    async fn get_with_retry(&self, url: &str) -> HaResult<reqwest::Response> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.client.get(url).bearer_auth(&self.token).send().await {
                Ok(response) => return Ok(response),
                Err(e) if attempt >= self.max_retries => {
                    error!("Request failed after {} attempts: {}", attempt, e);
                    return Err(HaError::HttpError(e));
                }
                Err(e) => {
                    warn!("Request failed (attempt {}/{}): {}", attempt, self.max_retries, e);
                    tokio::time::sleep(self.retry_delay * attempt).await;
                }
            }
        }
    }
}
