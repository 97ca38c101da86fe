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
use serde_json::{Map, Value};

/// Snapshot of a single external entity: a scalar state plus named attributes
/// of mixed scalar type.
///
/// Home Assistant reports entity states as strings, so numeric accessors
/// accept both JSON numbers and numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub state: Value,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl EntitySnapshot {
    /// Create a snapshot from a scalar state and attribute pairs.
    pub fn new(state: Value, attributes: impl IntoIterator<Item = (String, Value)>) -> Self {
        Self {
            state,
            attributes: attributes.into_iter().collect(),
        }
    }

    /// Attribute value, if present and non-null.
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).filter(|v| !v.is_null())
    }

    /// Attribute as a number. A present but non-numeric attribute is treated
    /// as undefined so resolution can fall through to the next candidate.
    pub fn attr_f64(&self, name: &str) -> Option<f64> {
        self.attr(name).and_then(coerce_f64)
    }

    /// Attribute as a boolean. Only genuine booleans qualify.
    pub fn attr_bool(&self, name: &str) -> Option<bool> {
        self.attr(name).and_then(Value::as_bool)
    }

    /// Attribute as a string token.
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(Value::as_str)
    }

    /// Scalar state as a number, accepting numeric strings.
    pub fn state_f64(&self) -> Option<f64> {
        coerce_f64(&self.state)
    }
}

/// Parse a scalar as f64, accepting both JSON numbers and numeric strings.
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    }
}

/// The full set of independently-optional state sources pushed by the host.
///
/// Absence of any source is a valid, expected condition, not an error: the
/// aggregator substitutes documented defaults per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawStateBundle {
    /// Main diagnostics entity; anchor of the fallback chains.
    #[serde(default)]
    pub primary: Option<EntitySnapshot>,
    /// Solar forecast sensor (state = peak kW).
    #[serde(default)]
    pub forecast: Option<EntitySnapshot>,
    /// Charging schedule sensor (carries the `schedule` slot array).
    #[serde(default)]
    pub schedule: Option<EntitySnapshot>,
    /// SOC forecast sensor.
    #[serde(default)]
    pub soc: Option<EntitySnapshot>,
    /// Battery power sensor.
    #[serde(default)]
    pub battery_power: Option<EntitySnapshot>,
    /// Daily statistics sensor.
    #[serde(default)]
    pub daily_stats: Option<EntitySnapshot>,
    /// Auto-charging switch entity.
    #[serde(default)]
    pub switch: Option<EntitySnapshot>,
}

impl RawStateBundle {
    /// Bundle with only the primary source set.
    pub fn with_primary(primary: EntitySnapshot) -> Self {
        Self {
            primary: Some(primary),
            ..Self::default()
        }
    }
}
