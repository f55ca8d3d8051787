//! `papi catalog`: list catalogued rules or show one rule's defaults.

use anyhow::{Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use papi_core::catalog::{RuleDescriptor, catalog};
use papi_types::rule::RuleKind;
use serde_json::{Map, Value};

pub fn show_catalog(kind: Option<RuleKind>, name: Option<&str>, json: bool) -> Result<()> {
    let entries = select(kind, name);

    if let Some(name) = name {
        if entries.is_empty() {
            bail!("'{name}' is not a catalogued criterion or behavior");
        }
        return show_defaults(&entries, json);
    }

    if json {
        let list: Vec<_> = entries.iter().map(|d| describe_json(d, None)).collect();
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Name").fg(Color::White),
        Cell::new("Kind").fg(Color::White),
        Cell::new("Variable fields").fg(Color::White),
        Cell::new("Accepts {{user.*}}").fg(Color::White),
    ]);

    for descriptor in &entries {
        let kind_cell = match descriptor.kind {
            RuleKind::Criteria => Cell::new("criteria").fg(Color::Yellow),
            RuleKind::Behavior => Cell::new("behavior").fg(Color::Green),
        };
        table.add_row(vec![
            Cell::new(descriptor.name).fg(Color::Cyan),
            kind_cell,
            Cell::new(descriptor.meta.variable.join(", ")),
            Cell::new(descriptor.meta.allows_vars.join(", ")).fg(Color::DarkGrey),
        ]);
    }

    println!();
    println!("{table}");
    println!();
    println!(
        "  {} rule{}",
        style(entries.len()).bold(),
        if entries.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

fn select(kind: Option<RuleKind>, name: Option<&str>) -> Vec<&'static RuleDescriptor> {
    let mut entries: Vec<_> = catalog()
        .iter()
        .filter(|d| kind.is_none_or(|k| d.kind == k))
        .filter(|d| name.is_none_or(|n| d.name.eq_ignore_ascii_case(n)))
        .collect();
    entries.sort_by_key(|d| (d.kind == RuleKind::Behavior, d.name));
    entries
}

fn show_defaults(entries: &[&'static RuleDescriptor], json: bool) -> Result<()> {
    let mut described = Vec::with_capacity(entries.len());
    for descriptor in entries {
        let defaults = descriptor.normalize(&Map::new())?;
        described.push(describe_json(descriptor, Some(defaults)));
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&described)?);
        return Ok(());
    }

    for (descriptor, value) in entries.iter().zip(&described) {
        println!();
        println!(
            "  {} {}",
            style(descriptor.kind).dim(),
            style(descriptor.name).cyan().bold()
        );
        println!();
        println!("{}", serde_json::to_string_pretty(&value["defaults"])?);
    }
    println!();
    Ok(())
}

fn describe_json(descriptor: &RuleDescriptor, defaults: Option<Map<String, Value>>) -> Value {
    let mut value = serde_json::json!({
        "kind": descriptor.kind,
        "name": descriptor.name,
        "meta": descriptor.meta,
    });
    if let Some(defaults) = defaults {
        value["defaults"] = Value::Object(defaults);
    }
    value
}
