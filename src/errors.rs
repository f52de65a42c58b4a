//! Error types shared by connectors, the indexing client, and the sync runner.
//!
//! The taxonomy separates "the source produced bad or absent data"
//! ([`SourceExtractionError`]) from "the destination rejected writes"
//! ([`IndexingFailedError`]). Configuration problems are caught at
//! construction time and never retried ([`ConfigurationError`]).

use serde_json::Value;
use thiserror::Error;

/// Boxed error used to carry an adapter's underlying failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Invalid or incomplete configuration, detected while constructing a
/// connector or the indexing client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Neither `cloud_id` nor `hosts` was supplied.
    #[error("Either elasticsearch.cloud_id or elasticsearch.hosts should be configured.")]
    MissingEndpoint,

    /// Both `cloud_id` and `hosts` were supplied.
    #[error("Only one of elasticsearch.cloud_id or elasticsearch.hosts may be configured.")]
    AmbiguousEndpoint,

    /// The cloud id could not be decoded.
    #[error("invalid elasticsearch.cloud_id: {0}")]
    InvalidCloudId(String),

    /// A host entry is not a usable URL.
    #[error("invalid elasticsearch host '{host}': {reason}")]
    InvalidHost { host: String, reason: String },

    /// The API key cannot be sent as a header value.
    #[error("elasticsearch.api_key contains characters that are not valid in a header")]
    InvalidApiKey,

    /// The wire transport could not be built.
    #[error("failed to build search engine transport: {0}")]
    Transport(String),

    /// Fields declared as required are absent from both configurations.
    #[error(
        "connector '{service_type}' is missing required configuration: {}",
        fields.join(", ")
    )]
    MissingFields {
        service_type: String,
        fields: Vec<String>,
    },

    /// A field is present but its value cannot be used.
    #[error("connector '{service_type}' field '{field}' is invalid: {reason}")]
    InvalidField {
        service_type: String,
        field: String,
        reason: String,
    },
}

impl ConfigurationError {
    /// Create an invalid-field error.
    pub fn invalid_field(
        service_type: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidField {
            service_type: service_type.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Adapter-side failure while producing documents.
///
/// Documents handed to the sink before the failure stay delivered.
#[derive(Debug, Error)]
pub enum SourceExtractionError {
    /// The source could not be read.
    #[error("{message}")]
    Source {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// The adapter produced a record that is not a valid document.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// The consumer stopped accepting documents.
    #[error("document consumer closed before extraction finished")]
    Cancelled,

    /// The extraction task panicked or was aborted.
    #[error("extraction task failed: {0}")]
    Aborted(String),
}

impl SourceExtractionError {
    /// Create a source error without an underlying cause.
    pub fn message(msg: impl Into<String>) -> Self {
        Self::Source {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a source error wrapping the adapter's underlying failure.
    pub fn with_cause(
        msg: impl Into<String>,
        cause: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Source {
            message: msg.into(),
            source: Some(Box::new(cause)),
        }
    }

    /// Whether this error only records that the consumer went away.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Raised by a health check for programming errors, never for an
/// unreachable source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthCheckError {
    #[error("invalid health check parameters: {0}")]
    InvalidParams(String),
}

/// At least one document in a bulk batch failed to index.
///
/// Only the first failing item is carried; later failures in the same
/// response are not enumerated.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct IndexingFailedError {
    message: String,
    cause: Value,
}

impl IndexingFailedError {
    pub fn new(message: impl Into<String>, cause: Value) -> Self {
        Self {
            message: message.into(),
            cause,
        }
    }

    /// Human-readable description embedding the first failing item.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The engine's error payload for the first failing item.
    pub fn cause(&self) -> &Value {
        &self.cause
    }
}

/// Errors returned by [`crate::es_client::IndexingClient::bulk_write`].
#[derive(Debug, Error)]
pub enum IndexingError {
    /// The engine accepted the request but rejected one or more items.
    #[error(transparent)]
    Failed(#[from] IndexingFailedError),

    /// Connection, timeout, HTTP status, or decoding failure from the
    /// wire client, passed through untouched.
    #[error(transparent)]
    Transport(#[from] opensearch::Error),

    /// A document in the batch cannot be indexed; nothing was sent.
    #[error(transparent)]
    InvalidDocument(SourceExtractionError),
}

impl IndexingError {
    /// The item-level failure, if this is one.
    pub fn as_indexing_failed(&self) -> Option<&IndexingFailedError> {
        match self {
            Self::Failed(e) => Some(e),
            Self::Transport(_) | Self::InvalidDocument(_) => None,
        }
    }
}

/// Errors raised while registering or instantiating connector kinds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("connector service type must not be empty")]
    EmptyServiceType,

    #[error("connector '{0}' must declare a display name")]
    EmptyDisplayName(String),

    #[error("connector service type '{0}' is already registered")]
    Duplicate(String),

    #[error("unknown connector service type '{0}'")]
    UnknownServiceType(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

/// Errors that abort a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("source extraction failed: {0}")]
    Extraction(#[from] SourceExtractionError),

    #[error("indexing failed: {0}")]
    Indexing(#[from] IndexingError),
}
