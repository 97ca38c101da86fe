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

/// Category of a significant schedule transition worth surfacing to the user.
///
/// Idle and self-consumption are deliberately absent: they are suppressed by
/// the timeline compactor, never displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineCategory {
    Solar,
    GridCharge,
    Discharge,
}

impl TimelineCategory {
    /// Human-readable action label shown on the timeline row.
    pub fn label(self) -> &'static str {
        match self {
            Self::Solar => "Solar Charging",
            Self::GridCharge => "Grid Charging",
            Self::Discharge => "Battery Discharge",
        }
    }

    /// Icon shown next to the action label.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Solar => "🌞",
            Self::GridCharge => "⚡",
            Self::Discharge => "🔋",
        }
    }

    /// CSS class for the action label in the HTML card.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Solar => "action-solar",
            Self::GridCharge => "action-charge",
            Self::Discharge => "action-discharge",
        }
    }
}

/// One entry of the compacted schedule timeline: a transition into a charge-
/// or discharge-relevant mode, with the SOC the schedule projects for the end
/// of that slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub time: String,
    pub category: TimelineCategory,
    pub target_soc_pct: f64,
}

impl TimelineEvent {
    pub fn new(time: impl Into<String>, category: TimelineCategory, target_soc_pct: f64) -> Self {
        Self {
            time: time.into(),
            category,
            target_soc_pct,
        }
    }
}

/// Immutable display model, re-derived in full on every update cycle.
///
/// Defaults match the degraded "source absent" display: callers must treat a
/// returned model as read-only. SOC values outside [0, 100] pass through
/// unmodified; clamping is the renderer's problem, not the model's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub entity_found: bool,
    pub battery_soc_pct: f64,
    pub battery_status: String,
    pub current_mode: String,
    pub should_charge_now: bool,
    pub peak_forecast_kw: f64,
    pub current_price_czk_kwh: f64,
    pub planned_grid_charge_kwh: f64,
    pub next_charge_time: String,
    pub last_update: String,
    /// State of the auto-charging switch, `None` when the switch source is
    /// absent (the renderer hides the toggle row entirely).
    pub auto_charging: Option<bool>,
    /// Whether the schedule source was present at all; decides between the
    /// "no schedule data" and "no significant actions" empty states.
    pub schedule_found: bool,
    pub timeline: Vec<TimelineEvent>,
}

impl Default for DisplayModel {
    fn default() -> Self {
        Self {
            entity_found: false,
            battery_soc_pct: 0.0,
            battery_status: "unknown".to_owned(),
            current_mode: "unknown".to_owned(),
            should_charge_now: false,
            peak_forecast_kw: 0.0,
            current_price_czk_kwh: 0.0,
            planned_grid_charge_kwh: 0.0,
            next_charge_time: "none".to_owned(),
            last_update: "never".to_owned(),
            auto_charging: None,
            schedule_found: false,
            timeline: Vec::new(),
        }
    }
}

impl DisplayModel {
    /// Degraded model shown when the primary entity is missing.
    pub fn not_found() -> Self {
        Self::default()
    }
}
