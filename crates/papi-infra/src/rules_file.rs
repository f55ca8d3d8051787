//! Rule-tree JSON files.
//!
//! Accepts both a bare `{ "rules": ... }` document and the envelope Property
//! Manager returns when rules are fetched. Keys the rule-tree types do not
//! model are written back unchanged.

use std::path::Path;

use papi_core::normalize::{NormalizeReport, normalize_rule_tree};
use papi_types::rule_tree::RuleTree;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RulesFileError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("{path} is not a rule tree: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize rule tree: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Read and parse the rule tree at `path`.
pub async fn read_rule_tree(path: &Path) -> Result<RuleTree, RulesFileError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RulesFileError::Read {
            path: path.display().to_string(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| RulesFileError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Write `tree` to `path` as pretty-printed JSON, creating parent directories.
pub async fn write_rule_tree(path: &Path, tree: &RuleTree) -> Result<(), RulesFileError> {
    let mut json = serde_json::to_string_pretty(tree)?;
    json.push('\n');

    let write_err = |source| RulesFileError::Write {
        path: path.display().to_string(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }
    tokio::fs::write(path, json).await.map_err(write_err)?;

    tracing::debug!(path = %path.display(), rules = tree.rule_count(), "rule tree written");
    Ok(())
}

/// Normalize the rule tree in `input` and write it to `output`
/// (or back to `input` when `output` is `None`).
pub async fn normalize_rules_file(
    input: &Path,
    output: Option<&Path>,
) -> Result<NormalizeReport, RulesFileError> {
    let mut tree = read_rule_tree(input).await?;
    let report = normalize_rule_tree(&mut tree);
    write_rule_tree(output.unwrap_or(input), &tree).await?;
    Ok(report)
}
