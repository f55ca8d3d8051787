//! `papi init`: generate a starter rule tree with the builder.

use std::path::Path;

use anyhow::Result;
use console::style;
use papi_core::catalog::CpCodeRef;
use papi_core::catalog::behaviors::{self as b, CachingBehavior};
use papi_core::catalog::criteria as c;
use papi_core::property::Property;
use papi_core::rule_tree::RuleTreeBuilder;
use papi_infra::rules_file::write_rule_tree;
use papi_types::error::BuildError;
use papi_types::rule_tree::RuleTree;

/// Static asset extensions cached for a week.
const STATIC_EXTENSIONS: &[&str] = &[
    "css", "js", "png", "jpg", "jpeg", "gif", "svg", "webp", "woff", "woff2",
];

#[derive(Debug, Clone)]
pub struct StarterOptions {
    pub origin: String,
    pub cp_code: u64,
    pub rule_format: String,
    pub secure: bool,
}

/// Build the starter tree: origin, CP code and default caching on the root,
/// plus child rules for compression, static assets and an uncached API path.
pub fn starter_rule_tree(options: &StarterOptions) -> Result<RuleTree, BuildError> {
    let mut property = Property::new(RuleTreeBuilder::with_rule_format(&options.rule_format));

    property
        .comment("The behaviors in the default rule apply to all requests.")
        .set_secure(options.secure)
        .set_origin(b::Origin {
            hostname: Some(options.origin.clone()),
            ..Default::default()
        })
        .set_cp_code(b::CpCode {
            value: Some(CpCodeRef::new(options.cp_code)),
        })
        .set_caching(b::Caching {
            behavior: Some(CachingBehavior::NoStore),
            ..Default::default()
        })
        .set_set_variable(b::SetVariable {
            variable_name: Some("ORIGIN_HOST".to_string()),
            variable_value: Some(options.origin.clone()),
            ..Default::default()
        })
        .set_allow_post(Default::default());

    property.rule("Performance", |p| {
        p.set_gzip_response(Default::default())
            .set_brotli(Default::default())
            .set_http3(Default::default());
    });

    property
        .on_file_extension(c::FileExtension {
            values: Some(STATIC_EXTENSIONS.iter().map(|e| e.to_string()).collect()),
            ..Default::default()
        })
        .named("Static content")
        .then(|p| {
            p.set_caching(b::Caching {
                behavior: Some(CachingBehavior::MaxAge),
                ttl: Some("7d".to_string()),
                ..Default::default()
            })
            .set_prefetchable(Default::default());
        });

    property
        .on_path(c::Path {
            values: Some(vec!["/api/*".to_string()]),
            ..Default::default()
        })
        .then(|p| {
            p.set_downstream_cache(Default::default())
                .set_modify_outgoing_response_header(b::ModifyOutgoingResponseHeader {
                    standard_add_header_name: Some("OTHER".to_string()),
                    custom_header_name: Some("X-Origin-Host".to_string()),
                    header_value: Some("{{user.PMUSER_ORIGIN_HOST}}".to_string()),
                    ..Default::default()
                });
        });

    property.into_delegate()?.finish()
}

pub async fn init(options: &StarterOptions, output: Option<&Path>, json: bool) -> Result<()> {
    let tree = starter_rule_tree(options)?;
    tracing::info!(
        rules = tree.rule_count(),
        variables = tree.rules.variables.len(),
        "starter rule tree built"
    );

    let Some(path) = output else {
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    };

    write_rule_tree(path, &tree).await?;

    if json {
        let summary = serde_json::json!({
            "output": path.display().to_string(),
            "rules": tree.rule_count(),
            "ruleFormat": tree.rule_format,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!();
        println!(
            "  {} Wrote starter rule tree ({} rules) to {}",
            style("✓").green().bold(),
            style(tree.rule_count()).bold(),
            style(path.display()).cyan()
        );
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options() -> StarterOptions {
        StarterOptions {
            origin: "origin.example.com".to_string(),
            cp_code: 12345,
            rule_format: "v2024-02-12".to_string(),
            secure: true,
        }
    }

    #[test]
    fn starter_tree_shape() {
        let tree = starter_rule_tree(&options()).unwrap();

        assert_eq!(tree.rule_format.as_deref(), Some("v2024-02-12"));
        assert_eq!(tree.rule_count(), 4);
        assert_eq!(tree.rules.options.as_ref().map(|o| o.is_secure), Some(true));

        let origin = &tree.rules.behavior("origin").unwrap().options;
        assert_eq!(origin["hostname"], json!("origin.example.com"));
        assert_eq!(origin["originType"], json!("CUSTOMER"));
        assert_eq!(
            tree.rules.behavior("cpCode").unwrap().options["value"]["id"],
            json!(12345)
        );

        let names: Vec<_> = tree.rules.children.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Performance", "Static content", "path"]);
    }

    #[test]
    fn starter_tree_declares_origin_variable() {
        let tree = starter_rule_tree(&options()).unwrap();
        assert!(
            tree.rules
                .variables
                .iter()
                .any(|v| v.name == "PMUSER_ORIGIN_HOST")
        );
    }

    #[tokio::test]
    async fn init_writes_output_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("rules.json");

        init(&options(), Some(path.as_path()), true).await.unwrap();

        let written = papi_infra::rules_file::read_rule_tree(&path).await.unwrap();
        assert_eq!(written, starter_rule_tree(&options()).unwrap());
    }
}
