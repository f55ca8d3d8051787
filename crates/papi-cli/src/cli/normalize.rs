//! `papi normalize`: fill catalog defaults into a rule-tree file.

use std::path::Path;

use anyhow::{Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use papi_core::normalize::{NormalizeReport, normalize_rule_tree};
use papi_infra::rules_file::{normalize_rules_file, read_rule_tree};

pub async fn normalize(input: &Path, output: Option<&Path>, check: bool, json: bool) -> Result<()> {
    tracing::info!(input = %input.display(), check, "normalizing rule tree");
    let report = if check {
        let mut tree = read_rule_tree(input).await?;
        normalize_rule_tree(&mut tree)
    } else {
        normalize_rules_file(input, output).await?
    };
    let written = (!check).then(|| output.unwrap_or(input));

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report_json(&report, written))?
        );
    } else {
        print_report(&report, written);
    }

    if check && !report.is_clean() {
        bail!(
            "{} unknown rule(s), {} rule(s) with invalid options",
            report.unknown.len(),
            report.failures.len()
        );
    }
    Ok(())
}

fn report_json(report: &NormalizeReport, written: Option<&Path>) -> serde_json::Value {
    let failures: Vec<_> = report
        .failures
        .iter()
        .map(|(rule, message)| serde_json::json!({ "rule": rule, "message": message }))
        .collect();
    serde_json::json!({
        "normalized": report.normalized,
        "unknown": report.unknown,
        "failures": failures,
        "output": written.map(|p| p.display().to_string()),
    })
}

fn print_report(report: &NormalizeReport, written: Option<&Path>) {
    println!();
    match written {
        Some(path) => println!(
            "  {} Normalized {} rule node{} into {}",
            style("✓").green().bold(),
            style(report.normalized).bold(),
            if report.normalized == 1 { "" } else { "s" },
            style(path.display()).cyan()
        ),
        None => println!(
            "  {} {} rule node{} can be normalized",
            style("i").blue().bold(),
            style(report.normalized).bold(),
            if report.normalized == 1 { "" } else { "s" }
        ),
    }

    if !report.unknown.is_empty() {
        println!();
        println!(
            "  {} Not in the catalog (left as-is):",
            style("!").yellow().bold()
        );
        for name in &report.unknown {
            println!("    {}", style(name).yellow());
        }
    }

    if !report.failures.is_empty() {
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL_CONDENSED);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Rule").fg(Color::White),
            Cell::new("Problem").fg(Color::White),
        ]);
        for (rule, message) in &report.failures {
            table.add_row(vec![
                Cell::new(rule).fg(Color::Cyan),
                Cell::new(message).fg(Color::Red),
            ]);
        }
        println!();
        println!("{table}");
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn report_json_shape() {
        let report = NormalizeReport {
            normalized: 2,
            unknown: vec!["BEHAVIOR imageManager".to_string()],
            failures: vec![("default/Geo".to_string(), "bad field".to_string())],
        };

        let value = report_json(&report, Some(Path::new("out.json")));
        assert_eq!(value["normalized"], json!(2));
        assert_eq!(value["unknown"], json!(["BEHAVIOR imageManager"]));
        assert_eq!(value["failures"][0]["rule"], json!("default/Geo"));
        assert_eq!(value["output"], json!("out.json"));
        assert!(report_json(&report, None)["output"].is_null());
    }

    #[tokio::test]
    async fn check_mode_fails_on_unknown_rules_and_leaves_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("rules.json");
        let original = r#"{"rules":{"name":"default","behaviors":[{"name":"imageManager","options":{}}]}}"#;
        tokio::fs::write(&path, original).await.unwrap();

        let result = normalize(&path, None, true, true).await;
        assert!(result.is_err());
        assert_eq!(tokio::fs::read_to_string(&path).await.unwrap(), original);
    }

    #[tokio::test]
    async fn check_mode_passes_on_clean_tree() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("rules.json");
        tokio::fs::write(
            &path,
            r#"{"rules":{"name":"default","behaviors":[{"name":"brotli","options":{}}]}}"#,
        )
        .await
        .unwrap();

        normalize(&path, None, true, true).await.unwrap();
    }
}
