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

use serde::{Deserialize, Serialize};
use serde_json::Value;

use chargeview_types::EntitySnapshot;

/// Entity state as returned by the HA REST API. States are always strings
/// on the wire; attributes are arbitrary JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HaEntityState {
    pub entity_id: String,
    pub state: String,
    #[serde(default)]
    pub attributes: Value,
    #[serde(default)]
    pub last_updated: String,
}

impl From<HaEntityState> for EntitySnapshot {
    fn from(state: HaEntityState) -> Self {
        Self {
            state: Value::String(state.state),
            attributes: state.attributes.as_object().cloned().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_conversion() {
        let state = HaEntityState {
            entity_id: "sensor.gw_smart_charging_soc_forecast".to_owned(),
            state: "61.2".to_owned(),
            attributes: json!({ "current_soc_pct": 61.2 }),
            last_updated: "2025-11-03T06:15:00Z".to_owned(),
        };

        let snapshot: EntitySnapshot = state.into();
        assert_eq!(snapshot.state_f64(), Some(61.2));
        assert_eq!(snapshot.attr_f64("current_soc_pct"), Some(61.2));
    }

    #[test]
    fn test_non_object_attributes_become_empty() {
        let state = HaEntityState {
            entity_id: "sensor.x".to_owned(),
            state: "ok".to_owned(),
            attributes: json!(null),
            last_updated: String::new(),
        };

        let snapshot: EntitySnapshot = state.into();
        assert!(snapshot.attributes.is_empty());
    }
}
