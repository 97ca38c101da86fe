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

pub mod aggregator;
pub mod builder;
pub mod error;
pub mod html;
pub mod render;
pub mod timeline;
pub mod widget;

// Re-export common types for convenience
pub use error::{CardError, CardResult};
pub use render::{CardView, ViewTree};
pub use timeline::MAX_TIMELINE_EVENTS;
pub use widget::{CardConfig, CardWidget};
