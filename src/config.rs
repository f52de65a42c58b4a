//! TOML configuration.
//!
//! ```toml
//! [elasticsearch]
//! api_key = "..."
//! hosts = ["http://localhost:9200"]
//!
//! [sync]
//! batch_size = 100
//! channel_capacity = 256
//!
//! [connectors.docs]
//! service_type = "filesystem"
//! index_name = "search-docs"          # optional, defaults to search-<name>
//!
//! [connectors.docs.configuration]
//! root = "./docs"
//!
//! [connectors.docs.remote_configuration]
//! exclude_globs = { label = "Exclude patterns", value = ["drafts/**"] }
//! ```

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::es_client::ElasticsearchConfig;
use crate::models::Configuration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub elasticsearch: ElasticsearchConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub connectors: BTreeMap<String, ConnectorConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SyncConfig {
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

fn default_batch_size() -> usize {
    100
}
fn default_channel_capacity() -> usize {
    256
}

/// One configured connector instance.
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectorConfig {
    pub service_type: String,
    #[serde(default)]
    pub index_name: Option<String>,
    /// Local configuration, supplied with the process.
    #[serde(default)]
    pub configuration: Configuration,
    /// Configuration as stored alongside the index; wins over local values.
    #[serde(default)]
    pub remote_configuration: Configuration,
}

impl ConnectorConfig {
    /// Target index for instance `name`.
    pub fn index_name(&self, name: &str) -> String {
        self.index_name
            .clone()
            .unwrap_or_else(|| format!("search-{}", name))
    }
}

impl Config {
    pub fn connector(&self, name: &str) -> Result<&ConnectorConfig> {
        match self.connectors.get(name) {
            Some(cfg) => Ok(cfg),
            None => {
                let known: Vec<&str> = self.connectors.keys().map(String::as_str).collect();
                bail!(
                    "Unknown connector: '{}'. Configured: {}",
                    name,
                    if known.is_empty() {
                        "(none)".to_string()
                    } else {
                        known.join(", ")
                    }
                )
            }
        }
    }
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    config
        .elasticsearch
        .endpoint()
        .with_context(|| "Invalid [elasticsearch] configuration")?;

    if config.sync.batch_size == 0 {
        bail!("sync.batch_size must be > 0");
    }
    if config.sync.channel_capacity == 0 {
        bail!("sync.channel_capacity must be > 0");
    }

    for (name, connector) in &config.connectors {
        if connector.service_type.trim().is_empty() {
            bail!("connectors.{}.service_type must not be empty", name);
        }
    }

    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_full_config() {
        let config = parse_config(
            r#"
[elasticsearch]
api_key = "secret"
hosts = ["http://localhost:9200"]
log = true

[sync]
batch_size = 10

[connectors.example]
service_type = "example"

[connectors.example.configuration]
foo = "bar"

[connectors.example.remote_configuration]
foo = { label = "Foo", value = "remote" }
"#,
        )
        .unwrap();

        assert!(config.elasticsearch.log);
        assert!(!config.elasticsearch.trace);
        assert_eq!(config.sync.batch_size, 10);
        assert_eq!(config.sync.channel_capacity, 256);

        let example = config.connector("example").unwrap();
        assert_eq!(example.service_type, "example");
        assert_eq!(example.index_name("example"), "search-example");
        assert_eq!(example.configuration.get("foo"), Some(&json!("bar")));
        assert_eq!(
            example.remote_configuration.get("foo"),
            Some(&json!({"label": "Foo", "value": "remote"}))
        );
    }

    #[test]
    fn rejects_missing_endpoint() {
        let err = parse_config("[elasticsearch]\napi_key = \"x\"\n").unwrap_err();
        assert!(format!("{:#}", err).contains("cloud_id or elasticsearch.hosts"));
    }

    #[test]
    fn rejects_both_endpoints() {
        let err = parse_config(
            "[elasticsearch]\ncloud_id = \"a:b\"\nhosts = [\"http://localhost:9200\"]\n",
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("Only one of"));
    }

    #[test]
    fn rejects_zero_batch_size() {
        let err = parse_config(
            "[elasticsearch]\nhosts = [\"localhost:9200\"]\n[sync]\nbatch_size = 0\n",
        )
        .unwrap_err();
        assert!(err.to_string().contains("batch_size"));
    }

    #[test]
    fn unknown_connector_lists_configured() {
        let config = parse_config(
            "[elasticsearch]\nhosts = [\"localhost:9200\"]\n[connectors.a]\nservice_type = \"example\"\n",
        )
        .unwrap();
        let err = config.connector("b").unwrap_err();
        assert_eq!(err.to_string(), "Unknown connector: 'b'. Configured: a");
    }
}
