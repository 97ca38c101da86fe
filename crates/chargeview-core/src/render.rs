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

use serde::Serialize;

use chargeview_types::DisplayModel;

use crate::widget::CardConfig;

/// Abstract visual tree handed to the host.
///
/// Stateless projection of one display model; no business logic. Every
/// model field appears somewhere in the tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ViewTree {
    /// Degraded display when the primary entity is missing.
    NotFound { entity: String },
    Card(CardView),
}

/// The full card layout: header badge, SOC bar, metric grid, info rows,
/// optional switch row and the compacted timeline section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub title: String,
    pub status_badge: String,
    pub soc_bar: SocBar,
    pub metrics: Vec<Metric>,
    pub mode: ModeIndicator,
    pub info_rows: Vec<InfoRow>,
    pub auto_charging: Option<SwitchRow>,
    pub timeline: TimelineSection,
}

/// Battery state-of-charge bar. The fill gap mirrors the card's overlay
/// trick (the overlay covers the uncharged remainder).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocBar {
    pub pct: f64,
    pub fill_gap_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
}

/// Current-mode chip: display text plus the CSS class token derived from
/// the raw mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeIndicator {
    pub text: String,
    pub css_class: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchRow {
    pub label: &'static str,
    pub on: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineSection {
    pub title: &'static str,
    pub items: Vec<TimelineRow>,
    /// Set when there is nothing to show; distinguishes a missing schedule
    /// source from a schedule with no significant actions.
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineRow {
    pub time: String,
    pub icon: &'static str,
    pub action: &'static str,
    pub css_class: &'static str,
    pub target_soc: String,
}

/// Project a display model into the visual tree.
pub fn build_view(config: &CardConfig, model: &DisplayModel) -> ViewTree {
    if !model.entity_found {
        return ViewTree::NotFound {
            entity: config.entity.clone(),
        };
    }

    let items: Vec<TimelineRow> = model
        .timeline
        .iter()
        .map(|event| TimelineRow {
            time: event.time.clone(),
            icon: event.category.icon(),
            action: event.category.label(),
            css_class: event.category.css_class(),
            target_soc: format!("→ {:.0}%", event.target_soc_pct),
        })
        .collect();

    let empty_message = if !model.schedule_found {
        Some("No schedule data available")
    } else if items.is_empty() {
        Some("No significant actions planned")
    } else {
        None
    };

    ViewTree::Card(CardView {
        title: config.title.clone(),
        status_badge: model.battery_status.clone(),
        soc_bar: SocBar {
            pct: model.battery_soc_pct,
            fill_gap_pct: 100.0 - model.battery_soc_pct,
        },
        metrics: vec![
            Metric {
                label: "Solar Forecast Peak",
                value: format!("{:.2}", model.peak_forecast_kw),
                unit: "kW",
            },
            Metric {
                label: "Current Price",
                value: format!("{:.2}", model.current_price_czk_kwh),
                unit: "CZK/kWh",
            },
            Metric {
                label: "Planned Grid Charge",
                value: format!("{:.2}", model.planned_grid_charge_kwh),
                unit: "kWh",
            },
            Metric {
                label: "Next Charge",
                value: model.next_charge_time.clone(),
                unit: "",
            },
        ],
        mode: ModeIndicator {
            text: model.current_mode.replace('_', " "),
            css_class: format!("mode-{}", model.current_mode.replace('_', "-")),
        },
        info_rows: vec![
            InfoRow {
                label: "Should Charge Now",
                value: if model.should_charge_now {
                    "Yes ✓".to_owned()
                } else {
                    "No ✗".to_owned()
                },
            },
            InfoRow {
                label: "Last Update",
                value: model.last_update.clone(),
            },
        ],
        auto_charging: model.auto_charging.map(|on| SwitchRow {
            label: "Automatic Charging",
            on,
        }),
        timeline: TimelineSection {
            title: "📅 Next 24h Plan (updates every 15min)",
            items,
            empty_message,
        },
    })
}
