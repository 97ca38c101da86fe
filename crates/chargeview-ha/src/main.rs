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

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use chargeview_core::{CardWidget, html};
use chargeview_ha::bundle::{BundleFetcher, SourceEntities, StateSource};
use chargeview_ha::client::HomeAssistantClient;
use chargeview_ha::config::AppConfig;
use chargeview_ha::switch::SwitchCommandIssuer;

/// Render the smart-charging card from live Home Assistant state.
#[derive(Debug, Parser)]
#[command(name = "chargeview", version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "chargeview.toml")]
    config: String,

    /// Emit the rendered card as HTML instead of a text summary
    #[arg(long)]
    html: bool,

    /// Toggle the auto-charging switch ("on" or "off") and exit
    #[arg(long, value_name = "on|off")]
    set_switch: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let args = Args::parse();
    let config = AppConfig::from_file(&args.config)?;

    // Configuration problems must surface before any network traffic
    let mut widget = CardWidget::new();
    widget.configure(config.card_config())?;

    let client = if std::env::var("SUPERVISOR_TOKEN").is_ok() {
        info!("🏠 Initializing HA client using Supervisor API...");
        Arc::new(HomeAssistantClient::from_supervisor()?)
    } else {
        info!("🏠 Initializing HA client from configuration...");
        Arc::new(HomeAssistantClient::from_config(
            config.ha.base_url.clone(),
            config.ha.token.clone(),
        )?)
    };

    let entities =
        SourceEntities::with_prefix(&config.widget.entity, &config.widget.entity_prefix);

    if let Some(value) = args.set_switch {
        let on = match value.as_str() {
            "on" => true,
            "off" => false,
            other => bail!("Invalid switch value '{other}', expected 'on' or 'off'"),
        };
        let issuer = SwitchCommandIssuer::new(client);
        issuer.set_switch(&entities.switch, on).await?;
        println!("Switch {} set to {}", entities.switch, value);
        return Ok(());
    }

    let fetcher = BundleFetcher::new(client, entities);
    let bundle = fetcher.fetch_bundle().await?;
    widget.update_state(&bundle);

    if args.html {
        let tree = widget
            .render()
            .context("Widget produced no view after a state update")?;
        println!("{}", html::render_html_or_error(tree));
    } else {
        print_summary(&widget);
    }
    Ok(())
}

fn print_summary(widget: &CardWidget) {
    let Some(model) = widget.model() else {
        return;
    };

    if !model.entity_found {
        println!("Entity not found; check widget.entity in the config file.");
        return;
    }

    println!("Battery SOC:     {:.1} %", model.battery_soc_pct);
    println!("Battery status:  {}", model.battery_status);
    println!("Current mode:    {}", model.current_mode);
    println!(
        "Charging now:    {}",
        if model.should_charge_now { "yes" } else { "no" }
    );
    println!("Peak forecast:   {:.2} kW", model.peak_forecast_kw);
    println!("Current price:   {:.2} CZK/kWh", model.current_price_czk_kwh);
    println!("Planned charge:  {:.2} kWh", model.planned_grid_charge_kwh);
    println!("Next charge:     {}", model.next_charge_time);
    println!("Last update:     {}", model.last_update);
    if let Some(auto) = model.auto_charging {
        println!("Auto-charging:   {}", if auto { "on" } else { "off" });
    }

    if model.timeline.is_empty() {
        if model.schedule_found {
            println!("Timeline:        no significant actions planned");
        } else {
            println!("Timeline:        no schedule data available");
        }
    } else {
        println!("Timeline:");
        for event in &model.timeline {
            println!(
                "  {}  {} {}  → {:.0}%",
                event.time,
                event.category.icon(),
                event.category.label(),
                event.target_soc_pct
            );
        }
    }

    println!(
        "Generated at:    {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
}
