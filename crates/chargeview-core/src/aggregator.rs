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

use tracing::debug;

use chargeview_types::{DisplayModel, EntitySnapshot, RawStateBundle};

/// Resolve the display fields (everything except the timeline) from the
/// state bundle, applying a fixed precedence chain per field.
///
/// Per field: first source present, first attribute defined within it,
/// else the literal default. A present attribute of the wrong type counts
/// as undefined and falls through. Missing primary short-circuits to the
/// degraded "not found" model; no other resolution is attempted.
///
/// Pure function of its input; safe to re-invoke any number of times.
pub fn resolve(bundle: &RawStateBundle) -> DisplayModel {
    let Some(primary) = bundle.primary.as_ref() else {
        debug!("🔍 [AGGREGATE] Primary source absent, degraded display");
        return DisplayModel::not_found();
    };

    DisplayModel {
        entity_found: true,
        battery_soc_pct: bundle
            .soc
            .as_ref()
            .and_then(|s| s.attr_f64("current_soc_pct"))
            .or_else(|| primary.attr_f64("battery_soc_pct"))
            .unwrap_or(0.0),
        battery_status: bundle
            .battery_power
            .as_ref()
            .and_then(|s| s.attr_str("status"))
            .or_else(|| primary.attr_str("battery_status"))
            .unwrap_or("unknown")
            .to_owned(),
        current_mode: primary
            .attr_str("current_mode")
            .unwrap_or("unknown")
            .to_owned(),
        should_charge_now: primary.attr_bool("should_charge_now").unwrap_or(false),
        peak_forecast_kw: bundle
            .forecast
            .as_ref()
            .and_then(EntitySnapshot::state_f64)
            .unwrap_or(0.0),
        current_price_czk_kwh: bundle
            .forecast
            .as_ref()
            .and_then(|s| s.attr_f64("current_price_czk_kwh"))
            .unwrap_or(0.0),
        planned_grid_charge_kwh: bundle
            .daily_stats
            .as_ref()
            .and_then(|s| s.attr_f64("planned_grid_charge_kwh"))
            .unwrap_or(0.0),
        next_charge_time: bundle
            .schedule
            .as_ref()
            .and_then(|s| s.attr_str("next_charge_time"))
            .unwrap_or("none")
            .to_owned(),
        last_update: primary
            .attr_str("last_update")
            .unwrap_or("never")
            .to_owned(),
        auto_charging: bundle
            .switch
            .as_ref()
            .map(|s| s.state.as_str() == Some("on")),
        schedule_found: bundle.schedule.is_some(),
        timeline: Vec::new(),
    }
}
