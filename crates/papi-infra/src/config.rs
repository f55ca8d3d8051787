//! Deploy configuration loader.
//!
//! Reads `papi.toml` and deserializes it into [`DeployConfig`]. Unlike most
//! settings files a deploy config has no usable default (the property id is
//! required), so a missing or malformed file is an error.

use std::path::{Path, PathBuf};

use papi_types::config::DeployConfig;
use papi_types::error::ConfigError;

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "PAPI_CONFIG";

/// Config file looked up in the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = "papi.toml";

/// Pick the config file to load.
///
/// Priority:
/// 1. The `--config` flag
/// 2. `$PAPI_CONFIG`
/// 3. `./papi.toml`
pub fn resolve_config_path(flag: Option<PathBuf>) -> PathBuf {
    let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    choose_config_path(flag, from_env)
}

fn choose_config_path(flag: Option<PathBuf>, from_env: Option<PathBuf>) -> PathBuf {
    flag.or(from_env.filter(|p| !p.as_os_str().is_empty()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load and validate the deploy configuration at `path`.
pub async fn load_deploy_config(path: &Path) -> Result<DeployConfig, ConfigError> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        Err(err) => return Err(err.into()),
    };

    let config: DeployConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;

    tracing::debug!(
        path = %path.display(),
        property_id = %config.property_id,
        network = %config.network,
        "loaded deploy config"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use papi_types::papi::Network;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_minimal_config_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("papi.toml");
        tokio::fs::write(&path, "property_id = \"prp_123\"\n")
            .await
            .unwrap();

        let config = load_deploy_config(&path).await.unwrap();
        assert_eq!(config, DeployConfig::new("prp_123"));
        assert_eq!(config.network, Network::Staging);
    }

    #[tokio::test]
    async fn load_full_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("papi.toml");
        tokio::fs::write(
            &path,
            r#"
property_id = "prp_123"
contract_id = "ctr_1"
group_id = "grp_2"
network = "PRODUCTION"
notify_emails = ["ops@example.com"]
note = "weekly release"
ignore_warnings = true
stop_property_activation = false
rule_format = "latest"
"#,
        )
        .await
        .unwrap();

        let config = load_deploy_config(&path).await.unwrap();
        assert_eq!(config.network, Network::Production);
        assert_eq!(config.property_ref().contract_id.as_deref(), Some("ctr_1"));
        assert_eq!(config.notify_emails, vec!["ops@example.com".to_string()]);
        assert!(config.ignore_warnings);
        assert_eq!(config.rule_format, "latest");
    }

    #[tokio::test]
    async fn load_missing_config_is_not_found() {
        let tmp = TempDir::new().unwrap();
        let err = load_deploy_config(&tmp.path().join("papi.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[tokio::test]
    async fn load_malformed_config_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("papi.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();

        let err = load_deploy_config(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[tokio::test]
    async fn load_config_runs_validation() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("papi.toml");
        tokio::fs::write(
            &path,
            "property_id = \"prp_1\"\nnotify_emails = [\"not-an-email\"]\n",
        )
        .await
        .unwrap();

        let err = load_deploy_config(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn config_path_priority() {
        let flag = Some(PathBuf::from("/etc/papi/site.toml"));
        let env = Some(PathBuf::from("/tmp/env.toml"));

        assert_eq!(
            choose_config_path(flag.clone(), env.clone()),
            PathBuf::from("/etc/papi/site.toml")
        );
        assert_eq!(choose_config_path(None, env), PathBuf::from("/tmp/env.toml"));
        assert_eq!(choose_config_path(None, None), PathBuf::from(DEFAULT_CONFIG_FILE));
        assert_eq!(
            choose_config_path(None, Some(PathBuf::new())),
            PathBuf::from(DEFAULT_CONFIG_FILE)
        );
    }
}
