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

use chargeview_types::{ScheduleSlot, TimelineCategory, TimelineEvent};

/// Upper bound on surfaced timeline events; once reached the scan stops
/// observing the schedule entirely.
pub const MAX_TIMELINE_EVENTS: usize = 8;

/// Modes that mark a state change but are never surfaced on the timeline.
const SILENT_MODES: [&str; 2] = ["idle", "self_consume"];

/// Scan accumulator threaded through the compaction fold.
#[derive(Debug, Default)]
struct Scan {
    last_mode: Option<String>,
    emitted: Vec<TimelineEvent>,
}

impl Scan {
    fn step(mut self, slot: &ScheduleSlot) -> Self {
        if self.emitted.len() == MAX_TIMELINE_EVENTS {
            return self;
        }

        let mode = if slot.mode.is_empty() { "idle" } else { slot.mode.as_str() };
        if self.last_mode.as_deref() == Some(mode) {
            return self;
        }

        // A transition into idle/self-consume is noted but never surfaced.
        // Any other mode counts as "the current mode" for future transition
        // detection even when it classifies to no category.
        if !SILENT_MODES.contains(&mode)
            && let Some(category) = classify(mode)
        {
            self.emitted.push(TimelineEvent::new(
                slot.time.clone(),
                category,
                slot.soc_pct_end,
            ));
        }
        self.last_mode = Some(mode.to_owned());
        self
    }
}

/// Classify a mode token by substring containment, in fixed priority order.
/// Returns `None` for unclassifiable modes.
fn classify(mode: &str) -> Option<TimelineCategory> {
    if mode.contains("solar_charge") {
        Some(TimelineCategory::Solar)
    } else if mode.contains("grid_charge") {
        Some(TimelineCategory::GridCharge)
    } else if mode.contains("discharge") {
        Some(TimelineCategory::Discharge)
    } else {
        None
    }
}

/// Compress a fine-grained schedule into at most [`MAX_TIMELINE_EVENTS`]
/// mode-transition events, preserving schedule order.
///
/// Deterministic and pure: repeated calls on the same input yield the same
/// output. The result is always an order-preserving filter of the input,
/// never a reordering.
pub fn compact(schedule: &[ScheduleSlot]) -> Vec<TimelineEvent> {
    schedule.iter().fold(Scan::default(), Scan::step).emitted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(time: &str, mode: &str, soc: f64) -> ScheduleSlot {
        ScheduleSlot::new(time, mode, soc)
    }

    #[test]
    fn test_empty_schedule() {
        assert!(compact(&[]).is_empty());
    }

    #[test]
    fn test_spec_example_sequence() {
        let schedule = vec![
            slot("00:00", "idle", 50.0),
            slot("01:00", "grid_charge", 60.0),
            slot("02:00", "grid_charge", 70.0),
            slot("03:00", "self_consume", 68.0),
            slot("04:00", "solar_charge_boost", 75.0),
        ];

        assert_eq!(
            compact(&schedule),
            vec![
                TimelineEvent::new("01:00", TimelineCategory::GridCharge, 60.0),
                TimelineEvent::new("04:00", TimelineCategory::Solar, 75.0),
            ]
        );
    }

    #[test]
    fn test_idle_and_self_consume_never_emitted() {
        let schedule = vec![
            slot("00:00", "idle", 50.0),
            slot("01:00", "self_consume", 49.0),
            slot("02:00", "idle", 48.0),
        ];

        assert!(compact(&schedule).is_empty());
    }

    #[test]
    fn test_uninterrupted_run_emits_once() {
        let schedule = vec![
            slot("00:00", "grid_charge", 55.0),
            slot("00:15", "grid_charge", 60.0),
            slot("00:30", "grid_charge", 65.0),
        ];

        let events = compact(&schedule);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].time, "00:00");
        assert_eq!(events[0].target_soc_pct, 55.0);
    }

    #[test]
    fn test_reentry_after_interruption_emits_again() {
        let schedule = vec![
            slot("00:00", "grid_charge", 55.0),
            slot("01:00", "idle", 55.0),
            slot("02:00", "grid_charge", 65.0),
        ];

        let events = compact(&schedule);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].time, "02:00");
    }

    #[test]
    fn test_substring_classification_with_priority() {
        // "solar_charge" wins over the embedded "charge"; a token containing
        // both solar_charge and grid_charge classifies as solar first
        assert_eq!(classify("solar_charge_boost"), Some(TimelineCategory::Solar));
        assert_eq!(classify("pre_grid_charge"), Some(TimelineCategory::GridCharge));
        assert_eq!(classify("forced_discharge"), Some(TimelineCategory::Discharge));
        assert_eq!(
            classify("solar_charge_then_grid_charge"),
            Some(TimelineCategory::Solar)
        );
        assert_eq!(classify("peak_shaving"), None);
    }

    #[test]
    fn test_unclassifiable_mode_consumes_no_slot_but_resets_last_mode() {
        let schedule = vec![
            slot("00:00", "grid_charge", 55.0),
            slot("01:00", "peak_shaving", 55.0),
            slot("02:00", "grid_charge", 65.0),
        ];

        // peak_shaving emits nothing but breaks the grid_charge run, so the
        // 02:00 slot is a fresh transition
        let events = compact(&schedule);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].time, "00:00");
        assert_eq!(events[1].time, "02:00");
    }

    #[test]
    fn test_transition_out_of_unclassifiable_mode_to_idle_is_silent() {
        let schedule = vec![
            slot("00:00", "peak_shaving", 50.0),
            slot("01:00", "idle", 50.0),
        ];

        assert!(compact(&schedule).is_empty());
    }

    #[test]
    fn test_cap_at_eight_events() {
        let mut schedule = Vec::new();
        for hour in 0..12 {
            schedule.push(slot(&format!("{hour:02}:00"), "grid_charge", 60.0));
            schedule.push(slot(&format!("{hour:02}:30"), "forced_discharge", 40.0));
        }

        let events = compact(&schedule);
        assert_eq!(events.len(), MAX_TIMELINE_EVENTS);
        // Later transitions are ignored even though they would classify
        assert_eq!(events.last().unwrap().time, "03:30");
    }

    #[test]
    fn test_order_preserved() {
        let schedule = vec![
            slot("01:00", "grid_charge", 60.0),
            slot("02:00", "forced_discharge", 40.0),
            slot("03:00", "solar_charge", 70.0),
        ];

        let events = compact(&schedule);
        let times: Vec<&str> = events.iter().map(|e| e.time.as_str()).collect();
        assert_eq!(times, vec!["01:00", "02:00", "03:00"]);
    }

    #[test]
    fn test_empty_mode_string_treated_as_idle() {
        let schedule = vec![slot("00:00", "", 50.0), slot("01:00", "idle", 50.0)];
        assert!(compact(&schedule).is_empty());
    }

    #[test]
    fn test_compact_is_idempotent() {
        let schedule = vec![
            slot("00:00", "idle", 50.0),
            slot("01:00", "grid_charge", 60.0),
            slot("02:00", "solar_charge", 70.0),
        ];

        assert_eq!(compact(&schedule), compact(&schedule));
    }
}
