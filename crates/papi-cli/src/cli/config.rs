//! `papi config show`: load, validate and print the deploy configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use papi_infra::config::{load_deploy_config, resolve_config_path};
use papi_types::config::DeployConfig;

pub async fn show_config(flag: Option<PathBuf>, json: bool) -> Result<()> {
    let path = resolve_config_path(flag);
    let config = load_deploy_config(&path)
        .await
        .with_context(|| format!("loading {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Setting").fg(Color::White),
        Cell::new("Value").fg(Color::White),
    ]);
    for (key, value) in config_rows(&config) {
        table.add_row(vec![Cell::new(key).fg(Color::Cyan), Cell::new(value)]);
    }

    println!();
    println!(
        "  {} {}",
        style("Config").bold(),
        style(path.display()).dim()
    );
    println!();
    println!("{table}");
    println!();

    Ok(())
}

fn config_rows(config: &DeployConfig) -> Vec<(&'static str, String)> {
    let or_dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    vec![
        ("property_id", config.property_id.clone()),
        ("contract_id", or_dash(&config.contract_id)),
        ("group_id", or_dash(&config.group_id)),
        ("network", config.network.to_string()),
        ("rule_format", config.rule_format.clone()),
        ("notify_emails", config.notify_emails.join(", ")),
        ("note", or_dash(&config.note)),
        ("ignore_warnings", config.ignore_warnings.to_string()),
        (
            "stop_property_activation",
            config.stop_property_activation.to_string(),
        ),
    ]
}
