//! Listing connector kinds and configured connector instances.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use crate::config::Config;
use crate::traits::{Connector, ConnectorRegistry};

/// Health of one configured connector instance.
#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    pub name: String,
    pub service_type: String,
    pub index_name: String,
    pub status: String,
    pub healthy: bool,
}

/// Instantiate the connector configured under `name`.
pub fn build_connector(
    config: &Config,
    registry: &ConnectorRegistry,
    name: &str,
) -> Result<Arc<dyn Connector>> {
    let cfg = config.connector(name)?;
    let connector = registry
        .create(
            &cfg.service_type,
            cfg.configuration.clone(),
            cfg.remote_configuration.clone(),
        )
        .with_context(|| format!("Failed to create connector '{}'", name))?;
    Ok(Arc::from(connector))
}

/// Construct and health-check every configured connector.
///
/// Construction failures are reported as unhealthy rather than aborting
/// the listing.
pub async fn get_sources(config: &Config, registry: &ConnectorRegistry) -> Vec<SourceStatus> {
    let mut statuses = Vec::with_capacity(config.connectors.len());
    for (name, cfg) in &config.connectors {
        let (status, healthy) = match build_connector(config, registry, name) {
            Ok(connector) => match connector.health_check(&Value::Null).await {
                Ok(true) => ("OK".to_string(), true),
                Ok(false) => ("UNREACHABLE".to_string(), false),
                Err(e) => (format!("ERROR ({})", e), false),
            },
            Err(e) => (format!("NOT CONFIGURED ({:#})", e), false),
        };
        statuses.push(SourceStatus {
            name: name.clone(),
            service_type: cfg.service_type.clone(),
            index_name: cfg.index_name(name),
            status,
            healthy,
        });
    }
    statuses
}

pub async fn list_sources(config: &Config, registry: &ConnectorRegistry) -> Result<()> {
    let statuses = get_sources(config, registry).await;
    println!("{:<16} {:<12} {:<24} HEALTHY", "CONNECTOR", "TYPE", "INDEX");
    for s in &statuses {
        println!(
            "{:<16} {:<12} {:<24} {}",
            s.name, s.service_type, s.index_name, s.healthy
        );
        if !s.healthy {
            println!("  {}", s.status);
        }
    }
    Ok(())
}

pub fn list_kinds(registry: &ConnectorRegistry) {
    println!("{:<16} {:<24} FIELDS", "SERVICE TYPE", "DISPLAY NAME");
    for descriptor in registry.descriptors() {
        let fields: Vec<&str> = descriptor.configurable_fields.keys().collect();
        println!(
            "{:<16} {:<24} {}",
            descriptor.service_type,
            descriptor.display_name,
            fields.join(", ")
        );
    }
}

pub fn print_fields(registry: &ConnectorRegistry, service_type: &str) -> Result<()> {
    let factory = registry.get(service_type).with_context(|| {
        format!(
            "Unknown service type: '{}'. Available: {}",
            service_type,
            registry.service_types().collect::<Vec<_>>().join(", ")
        )
    })?;
    println!(
        "{}",
        serde_json::to_string_pretty(&factory.configurable_fields())?
    );
    Ok(())
}
