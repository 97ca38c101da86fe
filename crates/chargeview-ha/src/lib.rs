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

pub mod bundle;
pub mod client;
pub mod config;
pub mod error;
pub mod switch;
pub mod types;

// Re-export common types for convenience
pub use bundle::{BundleFetcher, SourceEntities, StateSource};
pub use client::HomeAssistantClient;
pub use config::AppConfig;
pub use error::{HaError, HaResult};
pub use switch::SwitchCommandIssuer;
pub use types::HaEntityState;
