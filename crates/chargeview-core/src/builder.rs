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

use chargeview_types::{DisplayModel, RawStateBundle, ScheduleSlot};

use crate::{aggregator, timeline};

/// Build one complete display model from a state bundle and its schedule.
///
/// Pure composition of [`aggregator::resolve`] and [`timeline::compact`];
/// the two halves stay independently testable. The returned model is owned
/// by the caller and must be treated as read-only.
pub fn build(bundle: &RawStateBundle, schedule: &[ScheduleSlot]) -> DisplayModel {
    let mut model = aggregator::resolve(bundle);
    model.timeline = timeline::compact(schedule);
    debug!(
        "🧩 [BUILD] entity_found={} soc={:.1}% mode={} timeline_events={}",
        model.entity_found,
        model.battery_soc_pct,
        model.current_mode,
        model.timeline.len()
    );
    model
}

#[cfg(test)]
mod tests {
    use super::*;
    use chargeview_types::{EntitySnapshot, TimelineCategory};
    use serde_json::json;

    #[test]
    fn test_build_composes_both_halves() {
        let bundle = RawStateBundle::with_primary(EntitySnapshot::new(
            json!("ok"),
            [("battery_soc_pct".to_owned(), json!(64.0))],
        ));
        let schedule = vec![
            ScheduleSlot::new("00:00", "idle", 64.0),
            ScheduleSlot::new("02:00", "grid_charge", 80.0),
        ];

        let model = build(&bundle, &schedule);

        assert!(model.entity_found);
        assert_eq!(model.battery_soc_pct, 64.0);
        assert_eq!(model.timeline.len(), 1);
        assert_eq!(model.timeline[0].category, TimelineCategory::GridCharge);
    }

    #[test]
    fn test_build_with_missing_primary_still_compacts() {
        let schedule = vec![ScheduleSlot::new("02:00", "grid_charge", 80.0)];
        let model = build(&RawStateBundle::default(), &schedule);

        assert!(!model.entity_found);
        assert_eq!(model.timeline.len(), 1);
    }

    #[test]
    fn test_build_is_idempotent() {
        let bundle = RawStateBundle::default();
        let schedule = vec![ScheduleSlot::new("02:00", "discharge", 40.0)];

        assert_eq!(build(&bundle, &schedule), build(&bundle, &schedule));
    }
}
