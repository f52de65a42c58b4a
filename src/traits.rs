//! The connector capability contract and the registry that drives it.
//!
//! Every data source adapter implements two traits:
//!
//! - [`ConnectorKind`] carries what is fixed per adapter kind: the service
//!   type, display name, configuration shape, and the constructor. These are
//!   associated functions, available before any instance exists.
//! - [`Connector`] is the object-safe instance half: health check and
//!   document production. The harness only ever holds `dyn Connector`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │           ConnectorRegistry              │
//! │  service_type ──▶ ConnectorFactory       │
//! │  ┌─────────┐ ┌────────────┐ ┌─────────┐  │
//! │  │ example │ │ filesystem │ │ custom  │  │
//! │  └─────────┘ └────────────┘ └─────────┘  │
//! └──────────────┬───────────────────────────┘
//!                ▼
//!     create() → Box<dyn Connector>
//!                ▼
//!     yield_documents() → DocumentSink → run_sync() → bulk_write()
//! ```
//!
//! # Usage
//!
//! ```rust
//! use source_connectors::traits::ConnectorRegistry;
//!
//! let registry = ConnectorRegistry::with_builtins();
//! let example = registry.get("example").unwrap();
//! assert_eq!(example.display_name(), "Example Connector");
//! ```

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

use crate::errors::{
    ConfigurationError, HealthCheckError, RegistryError, SourceExtractionError,
};
use crate::models::{ConfigurableFields, Configuration, ConnectorSettings, Document};

// ═══════════════════════════════════════════════════════════════════════
// Connector traits
// ═══════════════════════════════════════════════════════════════════════

/// Receives documents one at a time from [`Connector::yield_documents`].
///
/// Returning [`SourceExtractionError::Cancelled`] tells the connector to stop
/// producing; the connector propagates it and releases whatever it holds.
#[async_trait]
pub trait DocumentSink: Send {
    async fn accept(&mut self, document: Document) -> Result<(), SourceExtractionError>;
}

#[async_trait]
impl DocumentSink for Vec<Document> {
    async fn accept(&mut self, document: Document) -> Result<(), SourceExtractionError> {
        document.validate()?;
        self.push(document);
        Ok(())
    }
}

/// A configured data source instance.
///
/// Created once per sync run by the harness and dropped at the end of it.
/// Instances are not shared between concurrent runs.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use source_connectors::errors::{HealthCheckError, SourceExtractionError};
/// use source_connectors::models::{ConnectorSettings, Document};
/// use source_connectors::traits::{Connector, DocumentSink};
///
/// pub struct StaticConnector {
///     settings: ConnectorSettings,
/// }
///
/// #[async_trait]
/// impl Connector for StaticConnector {
///     fn settings(&self) -> &ConnectorSettings { &self.settings }
///
///     async fn health_check(&self, _params: &Value) -> Result<bool, HealthCheckError> {
///         Ok(true)
///     }
///
///     async fn yield_documents(
///         &self,
///         sink: &mut dyn DocumentSink,
///     ) -> Result<(), SourceExtractionError> {
///         sink.accept(Document::new("1").with_field("title", "hello")).await
///     }
/// }
/// ```
#[async_trait]
pub trait Connector: Send + Sync {
    /// The configuration this instance was created with, unchanged.
    fn settings(&self) -> &ConnectorSettings;

    /// Check whether the source is reachable with the current configuration.
    ///
    /// Returns `Ok(false)` when it is not. `params` must be a JSON object or
    /// null; anything else is a caller bug and yields
    /// [`HealthCheckError::InvalidParams`]. Must not mutate the connector.
    async fn health_check(&self, params: &Value) -> Result<bool, HealthCheckError>;

    /// Hand every document of the source to `sink`, in the source's
    /// canonical order.
    ///
    /// Each call restarts extraction from the beginning. On failure the
    /// documents already accepted by the sink stay delivered.
    async fn yield_documents(
        &self,
        sink: &mut dyn DocumentSink,
    ) -> Result<(), SourceExtractionError>;
}

/// Per-kind metadata and construction for a [`Connector`].
pub trait ConnectorKind: Connector + Sized + 'static {
    /// Stable identifier for this adapter kind (e.g. `"filesystem"`).
    fn service_type() -> &'static str;

    /// Human-readable label.
    fn display_name() -> &'static str;

    /// The full configuration surface of this kind.
    fn configurable_fields() -> ConfigurableFields;

    /// Store and validate configuration. Must not perform network I/O.
    fn create(local: Configuration, remote: Configuration) -> Result<Self, ConfigurationError>;
}

/// Reject health check parameters that are neither an object nor null.
pub fn check_health_params(params: &Value) -> Result<(), HealthCheckError> {
    match params {
        Value::Null | Value::Object(_) => Ok(()),
        other => Err(HealthCheckError::InvalidParams(format!(
            "expected an object, got {}",
            other
        ))),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Factories
// ═══════════════════════════════════════════════════════════════════════

/// Serializable summary of a connector kind, used for listings and UIs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorDescriptor {
    pub service_type: String,
    pub display_name: String,
    pub configurable_fields: ConfigurableFields,
}

type CreateFn = fn(Configuration, Configuration) -> Result<Box<dyn Connector>, ConfigurationError>;

/// Type-erased handle on a [`ConnectorKind`].
#[derive(Clone, Copy)]
pub struct ConnectorFactory {
    service_type: &'static str,
    display_name: &'static str,
    fields: fn() -> ConfigurableFields,
    create: CreateFn,
}

fn create_boxed<C: ConnectorKind>(
    local: Configuration,
    remote: Configuration,
) -> Result<Box<dyn Connector>, ConfigurationError> {
    Ok(Box::new(C::create(local, remote)?))
}

impl ConnectorFactory {
    pub fn of<C: ConnectorKind>() -> Self {
        Self {
            service_type: C::service_type(),
            display_name: C::display_name(),
            fields: C::configurable_fields,
            create: create_boxed::<C>,
        }
    }

    pub fn service_type(&self) -> &'static str {
        self.service_type
    }

    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    pub fn configurable_fields(&self) -> ConfigurableFields {
        (self.fields)()
    }

    pub fn create(
        &self,
        local: Configuration,
        remote: Configuration,
    ) -> Result<Box<dyn Connector>, ConfigurationError> {
        (self.create)(local, remote)
    }

    pub fn descriptor(&self) -> ConnectorDescriptor {
        ConnectorDescriptor {
            service_type: self.service_type.to_string(),
            display_name: self.display_name.to_string(),
            configurable_fields: self.configurable_fields(),
        }
    }
}

impl std::fmt::Debug for ConnectorFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorFactory")
            .field("service_type", &self.service_type)
            .field("display_name", &self.display_name)
            .finish()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Registry
// ═══════════════════════════════════════════════════════════════════════

/// Registry of connector kinds keyed by service type.
///
/// Use [`ConnectorRegistry::with_builtins`] to start from the bundled
/// connectors, then [`register`](ConnectorRegistry::register) custom ones.
///
/// # Example
///
/// ```rust
/// use source_connectors::connector_example::ExampleConnector;
/// use source_connectors::traits::ConnectorRegistry;
///
/// let mut connectors = ConnectorRegistry::new();
/// connectors.register::<ExampleConnector>().unwrap();
/// assert_eq!(connectors.len(), 1);
///
/// // Service types are unique.
/// assert!(connectors.register::<ExampleConnector>().is_err());
/// ```
#[derive(Debug, Default)]
pub struct ConnectorRegistry {
    factories: BTreeMap<&'static str, ConnectorFactory>,
}

impl ConnectorRegistry {
    /// Create an empty connector registry.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Create a registry holding the example and filesystem connectors.
    pub fn with_builtins() -> Self {
        use crate::connector_example::ExampleConnector;
        use crate::connector_fs::FilesystemConnector;

        let mut registry = Self::new();
        for factory in [
            ConnectorFactory::of::<ExampleConnector>(),
            ConnectorFactory::of::<FilesystemConnector>(),
        ] {
            // Built-in kinds have distinct, non-empty service types.
            let _ = registry.insert(factory);
        }
        registry
    }

    /// Register a connector kind.
    pub fn register<C: ConnectorKind>(&mut self) -> Result<(), RegistryError> {
        self.insert(ConnectorFactory::of::<C>())
    }

    fn insert(&mut self, factory: ConnectorFactory) -> Result<(), RegistryError> {
        let service_type = factory.service_type();
        if service_type.trim().is_empty() {
            return Err(RegistryError::EmptyServiceType);
        }
        if factory.display_name().trim().is_empty() {
            return Err(RegistryError::EmptyDisplayName(service_type.to_string()));
        }
        if self.factories.contains_key(service_type) {
            return Err(RegistryError::Duplicate(service_type.to_string()));
        }
        debug!(service_type, "Registered connector kind");
        self.factories.insert(service_type, factory);
        Ok(())
    }

    /// Look up a connector kind by service type.
    pub fn get(&self, service_type: &str) -> Option<&ConnectorFactory> {
        self.factories.get(service_type)
    }

    /// Instantiate a connector of the given kind.
    pub fn create(
        &self,
        service_type: &str,
        local: Configuration,
        remote: Configuration,
    ) -> Result<Box<dyn Connector>, RegistryError> {
        let factory = self
            .get(service_type)
            .ok_or_else(|| RegistryError::UnknownServiceType(service_type.to_string()))?;
        Ok(factory.create(local, remote)?)
    }

    /// Service types in sorted order.
    pub fn service_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    /// Descriptors of every registered kind, sorted by service type.
    pub fn descriptors(&self) -> Vec<ConnectorDescriptor> {
        self.factories.values().map(|f| f.descriptor()).collect()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Return the count of registered kinds.
    pub fn len(&self) -> usize {
        self.factories.len()
    }
}
