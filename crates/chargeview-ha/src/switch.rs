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

use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::client::HomeAssistantClient;
use crate::error::HaResult;

/// Forwards the user's auto-charging toggle to the automation engine.
///
/// Fire-and-forget from the card's perspective: the command is passed
/// through verbatim, no acknowledgement is awaited and no retry happens
/// beyond the client's transport-level retry.
#[derive(Debug, Clone)]
pub struct SwitchCommandIssuer {
    client: Arc<HomeAssistantClient>,
}

impl SwitchCommandIssuer {
    pub fn new(client: Arc<HomeAssistantClient>) -> Self {
        Self { client }
    }

    /// Issue `switch.turn_on` or `switch.turn_off` against the target entity.
    pub async fn set_switch(&self, entity_id: &str, on: bool) -> HaResult<()> {
        let service = if on { "switch.turn_on" } else { "switch.turn_off" };
        info!("🔀 [SWITCH] {} -> {}", entity_id, service);
        self.client
            .call_service(service, json!({ "entity_id": entity_id }))
            .await
    }
}
