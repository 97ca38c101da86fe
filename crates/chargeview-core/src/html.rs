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

use askama::Template;
use tracing::error;

use crate::render::{CardView, ViewTree};

#[derive(Debug, Template)]
#[template(path = "card.html")]
struct CardTemplate<'a> {
    view: &'a CardView,
}

#[derive(Debug, Template)]
#[template(path = "not_found.html")]
struct NotFoundTemplate<'a> {
    entity: &'a str,
}

/// Render the visual tree as the HTML card.
pub fn render_html(tree: &ViewTree) -> Result<String, askama::Error> {
    match tree {
        ViewTree::NotFound { entity } => NotFoundTemplate { entity }.render(),
        ViewTree::Card(view) => CardTemplate { view }.render(),
    }
}

/// Infallible variant for host surfaces that cannot propagate errors; falls
/// back to an inline error page, as the server dashboard does.
pub fn render_html_or_error(tree: &ViewTree) -> String {
    match render_html(tree) {
        Ok(html) => html,
        Err(e) => {
            error!(error = %e, "Template render error");
            format!("<h1>Error rendering card: {e}</h1>")
        }
    }
}
