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

use thiserror::Error;

/// Card error types.
///
/// Only configuration can fail: once a widget is configured, state
/// resolution and timeline compaction substitute documented defaults
/// instead of erroring, and a missing primary entity degrades to a
/// "not found" display.
#[derive(Error, Debug)]
pub enum CardError {
    #[error("Please define an entity (e.g. sensor.gw_smart_charging_diagnostics)")]
    MissingEntity,

    #[error("Invalid card configuration: {0}")]
    InvalidConfig(String),
}

pub type CardResult<T> = Result<T, CardError>;
