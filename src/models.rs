//! Core data models used throughout the connector framework.
//!
//! These types describe what a connector accepts as configuration and what
//! it produces: documents destined for the search index.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::errors::{ConfigurationError, SourceExtractionError};

/// Instance configuration: a JSON object keyed by field name.
pub type Configuration = Map<String, Value>;

// ═══════════════════════════════════════════════════════════════════════
// Documents
// ═══════════════════════════════════════════════════════════════════════

/// A document produced by a connector.
///
/// Always a JSON object with a non-empty string `id`, which becomes the
/// search engine's `_id`. Uniqueness of ids within one run is up to the
/// connector.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Name of the identifier field.
    pub const ID_FIELD: &'static str = "id";

    /// Create a document holding only its identifier.
    ///
    /// The id is not checked here; [`validate`](Self::validate) runs before
    /// a document leaves a connector and again before it is indexed.
    pub fn new(id: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(Self::ID_FIELD.to_string(), Value::String(id.into()));
        Self(fields)
    }

    /// Add or replace a field. Setting `id` through here is ignored.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        if key != Self::ID_FIELD {
            self.0.insert(key, value.into());
        }
        self
    }

    /// Validate an arbitrary JSON object as a document.
    ///
    /// Numeric ids are normalised to their decimal string form.
    pub fn from_map(mut fields: Map<String, Value>) -> Result<Self, SourceExtractionError> {
        let id = match fields.get(Self::ID_FIELD) {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(_)) => {
                return Err(SourceExtractionError::InvalidDocument(
                    "document id must not be empty".to_string(),
                ))
            }
            Some(other) => {
                return Err(SourceExtractionError::InvalidDocument(format!(
                    "document id must be a string or number, got {}",
                    other
                )))
            }
            None => {
                return Err(SourceExtractionError::InvalidDocument(
                    "document has no 'id' field".to_string(),
                ))
            }
        };
        fields.insert(Self::ID_FIELD.to_string(), Value::String(id));
        Ok(Self(fields))
    }

    /// Validate a JSON value as a document. Non-objects are rejected.
    pub fn from_value(value: Value) -> Result<Self, SourceExtractionError> {
        match value {
            Value::Object(fields) => Self::from_map(fields),
            other => Err(SourceExtractionError::InvalidDocument(format!(
                "expected a JSON object, got {}",
                other
            ))),
        }
    }

    /// Reject documents whose id is missing or blank.
    pub fn validate(&self) -> Result<(), SourceExtractionError> {
        if self.id().trim().is_empty() {
            return Err(SourceExtractionError::InvalidDocument(
                "document id must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        self.0
            .get(Self::ID_FIELD)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Configurable fields
// ═══════════════════════════════════════════════════════════════════════

/// Declaration of one configuration field.
///
/// Serialized in the engine's stored connector format:
/// `{ "label": "Foo", "value": null }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub label: String,
    #[serde(rename = "value", default)]
    pub default_value: Option<Value>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl FieldSpec {
    /// An optional field with no default.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            default_value: None,
            required: false,
        }
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Ordered mapping of field key to [`FieldSpec`]. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurableFields(Vec<(String, FieldSpec)>);

impl ConfigurableFields {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, spec: FieldSpec) -> Self {
        self.insert(key, spec);
        self
    }

    /// Insert a field, replacing (in place) any spec already under `key`.
    pub fn insert(&mut self, key: impl Into<String>, spec: FieldSpec) -> Option<FieldSpec> {
        let key = key.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, spec)),
            None => {
                self.0.push((key, spec));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldSpec> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, spec)| spec)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldSpec)> {
        self.0.iter().map(|(k, spec)| (k.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ConfigurableFields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, spec) in &self.0 {
            map.serialize_entry(key, spec)?;
        }
        map.end()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Connector settings
// ═══════════════════════════════════════════════════════════════════════

/// The local and remote configuration a connector was created with.
///
/// Both maps are kept exactly as supplied. Lookups prefer the remote
/// configuration, then fall back to local.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectorSettings {
    local: Configuration,
    remote: Configuration,
}

impl ConnectorSettings {
    pub fn new(local: Configuration, remote: Configuration) -> Self {
        Self { local, remote }
    }

    pub fn local(&self) -> &Configuration {
        &self.local
    }

    pub fn remote(&self) -> &Configuration {
        &self.remote
    }

    /// Resolve a configuration value. Null counts as absent.
    ///
    /// Remote entries stored as `{ "label": ..., "value": x }` resolve to `x`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let remote = self.remote.get(key).map(|v| match v {
            Value::Object(obj) if obj.contains_key("value") => &obj["value"],
            other => other,
        });
        remote
            .filter(|v| !v.is_null())
            .or_else(|| self.local.get(key).filter(|v| !v.is_null()))
    }

    /// Resolve a value, falling back to the field's declared default.
    pub fn value_or_default<'a>(
        &'a self,
        key: &str,
        fields: &'a ConfigurableFields,
    ) -> Option<&'a Value> {
        self.get(key).or_else(|| {
            fields
                .get(key)
                .and_then(|spec| spec.default_value.as_ref())
                .filter(|v| !v.is_null())
        })
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }
}

/// Check that every required field resolves to a value.
///
/// Concrete connectors call this from their constructor.
pub fn validate_required_fields(
    service_type: &str,
    fields: &ConfigurableFields,
    settings: &ConnectorSettings,
) -> Result<(), ConfigurationError> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|(key, spec)| spec.required && settings.value_or_default(key, fields).is_none())
        .map(|(key, _)| key.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ConfigurationError::MissingFields {
            service_type: service_type.to_string(),
            fields: missing,
        })
    }
}

/// Read a list of strings from a resolved value.
pub fn string_list(
    service_type: &str,
    field: &str,
    value: Option<&Value>,
) -> Result<Vec<String>, ConfigurationError> {
    match value {
        None => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str().map(String::from).ok_or_else(|| {
                    ConfigurationError::invalid_field(
                        service_type,
                        field,
                        format!("expected a list of strings, found {}", item),
                    )
                })
            })
            .collect(),
        Some(other) => Err(ConfigurationError::invalid_field(
            service_type,
            field,
            format!("expected a list of strings, found {}", other),
        )),
    }
}
