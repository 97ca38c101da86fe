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

use crate::bundle::RawStateBundle;

/// One forecasted time-step of the charging schedule: a mode token and the
/// projected SOC at the end of the slot. Slots arrive in chronological order
/// at 15-minute granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    #[serde(default)]
    pub time: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub soc_pct_end: f64,
}

fn default_mode() -> String {
    "idle".to_owned()
}

impl ScheduleSlot {
    pub fn new(time: impl Into<String>, mode: impl Into<String>, soc_pct_end: f64) -> Self {
        Self {
            time: time.into(),
            mode: mode.into(),
            soc_pct_end,
        }
    }

    /// Parse the `schedule` attribute array into slots.
    ///
    /// Tolerant by design: a non-array value yields no slots, non-object
    /// entries are skipped, and missing fields take their defaults
    /// (mode `"idle"`, time empty, SOC `0`).
    pub fn parse_list(value: &Value) -> Vec<Self> {
        let Some(entries) = value.as_array() else {
            return Vec::new();
        };

        entries
            .iter()
            .filter(|entry| entry.is_object())
            .map(|entry| {
                serde_json::from_value(entry.clone()).unwrap_or_else(|_| Self {
                    time: entry
                        .get("time")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_owned(),
                    mode: entry
                        .get("mode")
                        .and_then(Value::as_str)
                        .unwrap_or("idle")
                        .to_owned(),
                    soc_pct_end: entry.get("soc_pct_end").and_then(Value::as_f64).unwrap_or(0.0),
                })
            })
            .collect()
    }
}

impl RawStateBundle {
    /// Extract the ordered schedule slots from the schedule source, if any.
    pub fn schedule_slots(&self) -> Vec<ScheduleSlot> {
        self.schedule
            .as_ref()
            .and_then(|snap| snap.attr("schedule"))
            .map(ScheduleSlot::parse_list)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::EntitySnapshot;
    use serde_json::json;

    #[test]
    fn test_parse_list_full_slots() {
        let slots = ScheduleSlot::parse_list(&json!([
            { "time": "00:00", "mode": "idle", "soc_pct_end": 50.0 },
            { "time": "00:15", "mode": "grid_charge", "soc_pct_end": 55.0 },
        ]));

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1], ScheduleSlot::new("00:15", "grid_charge", 55.0));
    }

    #[test]
    fn test_parse_list_defaults_missing_fields() {
        let slots = ScheduleSlot::parse_list(&json!([{ "time": "06:00" }]));

        assert_eq!(slots[0].mode, "idle");
        assert_eq!(slots[0].soc_pct_end, 0.0);
    }

    #[test]
    fn test_parse_list_skips_non_objects() {
        let slots = ScheduleSlot::parse_list(&json!([
            "bogus",
            { "time": "09:00", "mode": "solar_charge", "soc_pct_end": 70.0 },
            42,
        ]));

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].mode, "solar_charge");
    }

    #[test]
    fn test_parse_list_non_array_is_empty() {
        assert!(ScheduleSlot::parse_list(&json!("not a schedule")).is_empty());
        assert!(ScheduleSlot::parse_list(&Value::Null).is_empty());
    }

    #[test]
    fn test_bundle_schedule_slots() {
        let bundle = RawStateBundle {
            schedule: Some(EntitySnapshot::new(
                json!("scheduled"),
                [(
                    "schedule".to_owned(),
                    json!([{ "time": "12:00", "mode": "discharge", "soc_pct_end": 35.0 }]),
                )],
            )),
            ..RawStateBundle::default()
        };

        let slots = bundle.schedule_slots();
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].time, "12:00");
    }

    #[test]
    fn test_bundle_without_schedule_source() {
        assert!(RawStateBundle::default().schedule_slots().is_empty());
    }
}
