//! Filesystem connector.
//!
//! Walks a local directory and yields one document per matching file.
//!
//! # Configuration
//!
//! ```toml
//! [connectors.docs]
//! service_type = "filesystem"
//!
//! [connectors.docs.configuration]
//! root = "./docs"
//! include_globs = ["**/*.md", "**/*.txt"]
//! exclude_globs = ["drafts/**"]
//! follow_symlinks = false
//! ```
//!
//! `.git`, `target` and `node_modules` directories are always excluded.
//! Files are visited in file-name order so repeated runs enumerate the
//! source identically.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::errors::{ConfigurationError, HealthCheckError, SourceExtractionError};
use crate::models::{
    string_list, validate_required_fields, ConfigurableFields, Configuration, ConnectorSettings,
    Document, FieldSpec,
};
use crate::traits::{check_health_params, Connector, ConnectorKind, DocumentSink};

const SERVICE_TYPE: &str = "filesystem";

/// A filesystem connector instance.
pub struct FilesystemConnector {
    settings: ConnectorSettings,
    root: PathBuf,
    include_set: GlobSet,
    exclude_set: GlobSet,
    follow_symlinks: bool,
}

impl ConnectorKind for FilesystemConnector {
    fn service_type() -> &'static str {
        SERVICE_TYPE
    }

    fn display_name() -> &'static str {
        "Filesystem"
    }

    fn configurable_fields() -> ConfigurableFields {
        ConfigurableFields::new()
            .with("root", FieldSpec::new("Root directory").required())
            .with(
                "include_globs",
                FieldSpec::new("Include patterns").with_default(json!(["**/*.md", "**/*.txt"])),
            )
            .with(
                "exclude_globs",
                FieldSpec::new("Exclude patterns").with_default(json!([])),
            )
            .with(
                "follow_symlinks",
                FieldSpec::new("Follow symbolic links").with_default(false),
            )
    }

    fn create(local: Configuration, remote: Configuration) -> Result<Self, ConfigurationError> {
        let settings = ConnectorSettings::new(local, remote);
        let fields = Self::configurable_fields();
        validate_required_fields(SERVICE_TYPE, &fields, &settings)?;

        let root = settings
            .get_str("root")
            .map(PathBuf::from)
            .ok_or_else(|| {
                ConfigurationError::invalid_field(SERVICE_TYPE, "root", "expected a path string")
            })?;

        let include_globs = string_list(
            SERVICE_TYPE,
            "include_globs",
            settings.value_or_default("include_globs", &fields),
        )?;
        let mut exclude_globs = vec![
            "**/.git/**".to_string(),
            "**/target/**".to_string(),
            "**/node_modules/**".to_string(),
        ];
        exclude_globs.extend(string_list(
            SERVICE_TYPE,
            "exclude_globs",
            settings.value_or_default("exclude_globs", &fields),
        )?);

        let follow_symlinks = match settings.value_or_default("follow_symlinks", &fields) {
            Some(Value::Bool(b)) => *b,
            None => false,
            Some(other) => {
                return Err(ConfigurationError::invalid_field(
                    SERVICE_TYPE,
                    "follow_symlinks",
                    format!("expected a boolean, found {}", other),
                ))
            }
        };

        Ok(Self {
            include_set: build_globset("include_globs", &include_globs)?,
            exclude_set: build_globset("exclude_globs", &exclude_globs)?,
            settings,
            root,
            follow_symlinks,
        })
    }
}

#[async_trait]
impl Connector for FilesystemConnector {
    fn settings(&self) -> &ConnectorSettings {
        &self.settings
    }

    async fn health_check(&self, params: &Value) -> Result<bool, HealthCheckError> {
        check_health_params(params)?;
        Ok(self.root.is_dir())
    }

    async fn yield_documents(
        &self,
        sink: &mut dyn DocumentSink,
    ) -> Result<(), SourceExtractionError> {
        if !self.root.is_dir() {
            return Err(SourceExtractionError::message(format!(
                "Filesystem connector root does not exist: {}",
                self.root.display()
            )));
        }

        let walker = WalkDir::new(&self.root)
            .follow_links(self.follow_symlinks)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| {
                SourceExtractionError::with_cause(
                    format!("Failed to walk {}", self.root.display()),
                    e,
                )
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            let rel_str = relative.to_string_lossy().replace('\\', "/");

            if self.exclude_set.is_match(&rel_str) || !self.include_set.is_match(&rel_str) {
                continue;
            }

            match file_to_document(path, &rel_str) {
                Ok(doc) => {
                    debug!(path = %rel_str, "Yielding file");
                    sink.accept(doc).await?;
                }
                Err(e) => warn!(path = %rel_str, error = %e, "Skipping unreadable file"),
            }
        }

        Ok(())
    }
}

fn file_to_document(path: &Path, relative_path: &str) -> std::io::Result<Document> {
    let metadata = std::fs::metadata(path)?;
    let modified: DateTime<Utc> = metadata
        .modified()
        .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
        .into();
    let body = std::fs::read_to_string(path)?;

    let title = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    Ok(Document::new(document_id(relative_path))
        .with_field("path", relative_path)
        .with_field("title", title)
        .with_field("content_type", content_type(path))
        .with_field("updated_at", modified.to_rfc3339())
        .with_field("body", body))
}

/// Stable id derived from the path relative to the root.
fn document_id(relative_path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(SERVICE_TYPE.as_bytes());
    hasher.update(relative_path.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("md") => "text/markdown",
        Some("json") => "application/json",
        Some("yaml") | Some("yml") => "text/yaml",
        Some("html") | Some("htm") => "text/html",
        _ => "text/plain",
    }
}

fn build_globset(field: &str, patterns: &[String]) -> Result<GlobSet, ConfigurationError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern)
            .map_err(|e| ConfigurationError::invalid_field(SERVICE_TYPE, field, e.to_string()))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| ConfigurationError::invalid_field(SERVICE_TYPE, field, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn local(value: Value) -> Configuration {
        value.as_object().cloned().unwrap_or_default()
    }

    fn tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("guides")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("b.md"), "# Beta").unwrap();
        fs::write(root.join("a.txt"), "alpha").unwrap();
        fs::write(root.join("guides/c.md"), "# Gamma").unwrap();
        fs::write(root.join("image.png"), [0u8, 1, 2]).unwrap();
        fs::write(root.join(".git/HEAD.md"), "ref").unwrap();
        tmp
    }

    #[test]
    fn create_requires_root() {
        let err = FilesystemConnector::create(Configuration::new(), Configuration::new())
            .err()
            .unwrap();
        assert_eq!(
            err,
            ConfigurationError::MissingFields {
                service_type: "filesystem".to_string(),
                fields: vec!["root".to_string()],
            }
        );
    }

    #[test]
    fn create_rejects_bad_glob() {
        let err = FilesystemConnector::create(
            local(json!({"root": "/tmp", "include_globs": ["a{"]})),
            Configuration::new(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, ConfigurationError::InvalidField { ref field, .. } if field == "include_globs"));
    }

    #[tokio::test]
    async fn yields_matching_files_in_order() {
        let tmp = tree();
        let connector = FilesystemConnector::create(
            local(json!({"root": tmp.path().to_string_lossy()})),
            Configuration::new(),
        )
        .unwrap();

        let mut docs: Vec<Document> = Vec::new();
        connector.yield_documents(&mut docs).await.unwrap();

        let paths: Vec<&str> = docs
            .iter()
            .map(|d| d.get("path").and_then(Value::as_str).unwrap())
            .collect();
        assert_eq!(paths, vec!["a.txt", "b.md", "guides/c.md"]);
        assert_eq!(docs[1].get("content_type"), Some(&json!("text/markdown")));
        assert_eq!(docs[1].get("body"), Some(&json!("# Beta")));
        assert_eq!(docs[1].id(), document_id("b.md"));
    }

    #[tokio::test]
    async fn exclude_globs_apply() {
        let tmp = tree();
        let connector = FilesystemConnector::create(
            local(json!({
                "root": tmp.path().to_string_lossy(),
                "exclude_globs": ["guides/**"]
            })),
            Configuration::new(),
        )
        .unwrap();

        let mut docs: Vec<Document> = Vec::new();
        connector.yield_documents(&mut docs).await.unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[tokio::test]
    async fn health_reflects_root() {
        let tmp = tree();
        let healthy = FilesystemConnector::create(
            local(json!({"root": tmp.path().to_string_lossy()})),
            Configuration::new(),
        )
        .unwrap();
        assert!(healthy.health_check(&Value::Null).await.unwrap());

        let missing = FilesystemConnector::create(
            local(json!({"root": tmp.path().join("nope").to_string_lossy()})),
            Configuration::new(),
        )
        .unwrap();
        assert!(!missing.health_check(&json!({})).await.unwrap());
        assert!(missing.health_check(&json!("bad")).await.is_err());

        let mut docs: Vec<Document> = Vec::new();
        assert!(missing.yield_documents(&mut docs).await.is_err());
    }

    #[test]
    fn ids_are_stable() {
        assert_eq!(document_id("a/b.md"), document_id("a/b.md"));
        assert_ne!(document_id("a/b.md"), document_id("a/c.md"));
        assert_eq!(document_id("a/b.md").len(), 64);
    }
}
