//! Bulk indexing client.
//!
//! [`IndexingClient`] wraps a wire transport and turns the engine's
//! "partially successful" bulk response into a hard error: if any item in
//! a batch failed, [`bulk_write`](IndexingClient::bulk_write) returns
//! [`IndexingFailedError`] carrying the first failing item. Transport
//! failures are passed through as the wire client's own error.
//!
//! # Configuration
//!
//! ```toml
//! [elasticsearch]
//! api_key = "base64-encoded-id:key"
//! hosts = ["http://localhost:9200"]     # or: cloud_id = "deployment:..."
//! log = false
//! trace = false
//! ```
//!
//! Exactly one of `cloud_id` and `hosts` must be set.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use opensearch::http::headers::{HeaderValue, AUTHORIZATION};
use opensearch::http::request::JsonBody;
use opensearch::http::transport::{
    Connection, ConnectionPool, SingleNodeConnectionPool, TransportBuilder,
};
use opensearch::{BulkParts, OpenSearch};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

use crate::errors::{ConfigurationError, IndexingError, IndexingFailedError};
use crate::models::Document;

// ═══════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════

/// Connection settings for the search engine.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ElasticsearchConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub cloud_id: Option<String>,
    #[serde(default)]
    pub hosts: Option<Vec<String>>,
    /// Log every bulk request through the process logger.
    #[serde(default)]
    pub log: bool,
    /// Additionally log request bodies.
    #[serde(default)]
    pub trace: bool,
}

/// Where the engine lives, resolved from [`ElasticsearchConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Cloud(Url),
    Hosts(Vec<Url>),
}

impl Endpoint {
    pub fn urls(&self) -> Vec<Url> {
        match self {
            Endpoint::Cloud(url) => vec![url.clone()],
            Endpoint::Hosts(urls) => urls.clone(),
        }
    }
}

impl ElasticsearchConfig {
    /// Resolve the endpoint, enforcing that exactly one of `cloud_id` and
    /// `hosts` is configured.
    pub fn endpoint(&self) -> Result<Endpoint, ConfigurationError> {
        let cloud_id = self.cloud_id.as_deref().filter(|s| !s.trim().is_empty());
        let hosts = self.hosts.as_ref().filter(|h| !h.is_empty());

        match (cloud_id, hosts) {
            (Some(_), Some(_)) => Err(ConfigurationError::AmbiguousEndpoint),
            (None, None) => Err(ConfigurationError::MissingEndpoint),
            (Some(cloud_id), None) => Ok(Endpoint::Cloud(parse_cloud_id(cloud_id)?)),
            (None, Some(hosts)) => Ok(Endpoint::Hosts(
                hosts
                    .iter()
                    .map(|h| parse_host(h))
                    .collect::<Result<_, _>>()?,
            )),
        }
    }
}

/// Decode `name:base64(host$es_uuid$kibana_uuid)` into the
/// Elasticsearch URL `https://<es_uuid>.<host>`.
pub fn parse_cloud_id(cloud_id: &str) -> Result<Url, ConfigurationError> {
    let invalid = |reason: &str| ConfigurationError::InvalidCloudId(reason.to_string());

    let (_, encoded) = cloud_id
        .split_once(':')
        .ok_or_else(|| invalid("expected '<name>:<base64 data>'"))?;
    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|e| invalid(&e.to_string()))?;
    let decoded = String::from_utf8(decoded).map_err(|_| invalid("payload is not UTF-8"))?;

    let mut parts = decoded.split('$');
    let host = parts.next().filter(|s| !s.is_empty());
    let es_uuid = parts.next().filter(|s| !s.is_empty());
    let (host, es_uuid) = match (host, es_uuid) {
        (Some(h), Some(u)) => (h, u),
        _ => return Err(invalid("payload must contain '<host>$<es_uuid>'")),
    };

    let (host, port) = match host.rsplit_once(':') {
        Some((h, p)) if p.chars().all(|c| c.is_ascii_digit()) => (h, Some(p)),
        _ => (host, None),
    };
    let url = match port {
        Some(port) => format!("https://{}.{}:{}", es_uuid, host, port),
        None => format!("https://{}.{}", es_uuid, host),
    };
    Url::parse(&url).map_err(|e| invalid(&e.to_string()))
}

/// Parse a host entry. Entries without a scheme are treated as `http://`.
pub fn parse_host(host: &str) -> Result<Url, ConfigurationError> {
    let host = host.trim();
    let candidate = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    };
    let url = Url::parse(&candidate).map_err(|e| ConfigurationError::InvalidHost {
        host: host.to_string(),
        reason: e.to_string(),
    })?;
    if url.host_str().is_none() {
        return Err(ConfigurationError::InvalidHost {
            host: host.to_string(),
            reason: "missing host name".to_string(),
        });
    }
    Ok(url)
}

// ═══════════════════════════════════════════════════════════════════════
// Wire transport
// ═══════════════════════════════════════════════════════════════════════

/// The single wire call the indexing client needs.
///
/// `body` alternates action and source lines. Implementations return the
/// engine's decoded response, or the wire client's error for connection
/// failures and non-success statuses.
#[async_trait]
pub trait BulkTransport: Send + Sync {
    async fn bulk(&self, index: &str, body: Vec<Value>) -> Result<Value, opensearch::Error>;
}

/// Hands out the configured hosts in turn, one per request.
#[derive(Debug, Clone)]
pub struct RoundRobinPool {
    connections: Vec<Connection>,
    cursor: Arc<AtomicUsize>,
}

impl RoundRobinPool {
    /// `urls` must not be empty.
    pub fn new(urls: Vec<Url>) -> Result<Self, ConfigurationError> {
        if urls.is_empty() {
            return Err(ConfigurationError::MissingEndpoint);
        }
        Ok(Self {
            connections: urls.into_iter().map(Connection::new).collect(),
            cursor: Arc::new(AtomicUsize::new(0)),
        })
    }

    fn advance(&self) -> usize {
        self.cursor.fetch_add(1, Ordering::Relaxed) % self.connections.len()
    }
}

impl ConnectionPool for RoundRobinPool {
    fn next(&self) -> Connection {
        self.connections[self.advance()].clone()
    }
}

/// [`BulkTransport`] backed by the `opensearch` client.
pub struct OpenSearchTransport {
    client: OpenSearch,
}

impl OpenSearchTransport {
    /// Build the transport. Does not contact the engine.
    pub fn connect(endpoint: &Endpoint, api_key: Option<&str>) -> Result<Self, ConfigurationError> {
        let mut urls = endpoint.urls();
        let builder = if urls.len() == 1 {
            TransportBuilder::new(SingleNodeConnectionPool::new(urls.remove(0)))
        } else {
            TransportBuilder::new(RoundRobinPool::new(urls)?)
        };

        let builder = match api_key.filter(|k| !k.is_empty()) {
            Some(key) => {
                let value = HeaderValue::from_str(&format!("ApiKey {}", key))
                    .map_err(|_| ConfigurationError::InvalidApiKey)?;
                builder.header(AUTHORIZATION, value)
            }
            None => builder,
        };

        let transport = builder
            .build()
            .map_err(|e| ConfigurationError::Transport(e.to_string()))?;

        Ok(Self {
            client: OpenSearch::new(transport),
        })
    }
}

#[async_trait]
impl BulkTransport for OpenSearchTransport {
    async fn bulk(&self, index: &str, body: Vec<Value>) -> Result<Value, opensearch::Error> {
        let body: Vec<JsonBody<Value>> = body.into_iter().map(JsonBody::from).collect();
        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await?
            .error_for_status_code()?;
        response.json::<Value>().await
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Indexing client
// ═══════════════════════════════════════════════════════════════════════

/// Outcome of a successful bulk write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Number of documents submitted and accepted.
    pub count: usize,
    /// Engine-reported processing time, when present.
    pub took_ms: Option<u64>,
}

/// Submits document batches and enforces that no item failure goes
/// unnoticed.
///
/// Holds no state besides the transport; each call is independent of the
/// previous ones. Not meant to be shared between concurrent sync runs.
pub struct IndexingClient<T = OpenSearchTransport> {
    transport: T,
    log: bool,
    trace: bool,
}

impl IndexingClient<OpenSearchTransport> {
    /// Validate `config` and build the production transport.
    ///
    /// Fails with [`ConfigurationError`] unless exactly one of `cloud_id`
    /// and `hosts` is set. No network I/O happens here.
    pub fn new(config: &ElasticsearchConfig) -> Result<Self, ConfigurationError> {
        let endpoint = config.endpoint()?;
        let transport = OpenSearchTransport::connect(&endpoint, config.api_key.as_deref())?;
        let client = Self::with_transport(config, transport)?;
        if client.logging_enabled() {
            info!(endpoint = ?endpoint.urls(), "Created indexing client");
        }
        Ok(client)
    }
}

impl<T: BulkTransport> IndexingClient<T> {
    /// Use a caller-supplied transport. The endpoint rules still apply.
    pub fn with_transport(config: &ElasticsearchConfig, transport: T) -> Result<Self, ConfigurationError> {
        config.endpoint()?;
        Ok(Self {
            transport,
            log: config.log || config.trace,
            trace: config.trace,
        })
    }

    /// Whether client logging is switched on. When off, the client emits
    /// nothing through `tracing`.
    pub fn logging_enabled(&self) -> bool {
        self.log
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Index `documents` into `index` with one bulk call.
    ///
    /// Each document is sent as an `index` action whose `_id` is the
    /// document's id. If the engine reports any item failure the whole call
    /// fails with [`IndexingError::Failed`]. A document with a blank id
    /// fails the call with [`IndexingError::InvalidDocument`] before anything
    /// is sent. Nothing is retried here.
    pub async fn bulk_write(
        &self,
        index: &str,
        documents: &[Document],
    ) -> Result<WriteReport, IndexingError> {
        if documents.is_empty() {
            return Ok(WriteReport {
                count: 0,
                took_ms: None,
            });
        }

        for doc in documents {
            doc.validate().map_err(IndexingError::InvalidDocument)?;
        }

        let body = bulk_body(index, documents);
        if self.log {
            info!(index, count = documents.len(), "Submitting bulk request");
        }
        if self.trace {
            info!(index, body = ?body, "Bulk request body");
        }

        let response = self.transport.bulk(index, body).await.map_err(|e| {
            if self.log {
                warn!(index, error = %e, "Bulk request failed");
            }
            IndexingError::Transport(e)
        })?;

        match check_bulk_response(&response, documents.len()) {
            Ok(report) => {
                if self.log {
                    info!(index, count = report.count, took_ms = ?report.took_ms, "Bulk request succeeded");
                }
                Ok(report)
            }
            Err(e) => {
                if self.log {
                    warn!(index, cause = %e.cause(), "Bulk request had item failures");
                }
                Err(e.into())
            }
        }
    }
}

fn bulk_body(index: &str, documents: &[Document]) -> Vec<Value> {
    let mut body = Vec::with_capacity(documents.len() * 2);
    for doc in documents {
        body.push(json!({"index": {"_index": index, "_id": doc.id()}}));
        body.push(Value::Object(doc.fields().clone()));
    }
    body
}

/// Inspect a bulk response.
///
/// `errors: true` fails with the first item carrying an `error` payload;
/// later failures are not reported. A response that claims errors without
/// any item-level payload reports the first item (or `null`) as the cause.
/// An `errors` entry that is present but not a boolean counts as a failure.
pub fn check_bulk_response(
    response: &Value,
    submitted: usize,
) -> Result<WriteReport, IndexingFailedError> {
    let has_errors = match response.get("errors") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(_) => true,
    };

    if !has_errors {
        return Ok(WriteReport {
            count: submitted,
            took_ms: response.get("took").and_then(Value::as_u64),
        });
    }

    let items = response
        .get("items")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let (item, cause) = items
        .iter()
        .find_map(|item| item_error(item).map(|err| (item, err.clone())))
        .or_else(|| items.first().map(|item| (item, item.clone())))
        .map(|(item, cause)| (item.to_string(), cause))
        .unwrap_or_else(|| ("null".to_string(), Value::Null));

    Err(IndexingFailedError::new(
        format!(
            "Failed to index documents into Elasticsearch.\nFirst error in response is: {}",
            item
        ),
        cause,
    ))
}

/// The `error` payload of a per-item result such as
/// `{"index": {"_id": "1", "status": 400, "error": {...}}}`.
fn item_error(item: &Value) -> Option<&Value> {
    item.as_object()?
        .values()
        .find_map(|action| action.get("error"))
        .filter(|e| !e.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording {
        response: Value,
        calls: Mutex<Vec<(String, Vec<Value>)>>,
    }

    impl Recording {
        fn new(response: Value) -> Self {
            Self {
                response,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl BulkTransport for Recording {
        async fn bulk(&self, index: &str, body: Vec<Value>) -> Result<Value, opensearch::Error> {
            self.calls.lock().unwrap().push((index.to_string(), body));
            Ok(self.response.clone())
        }
    }

    fn hosts_config() -> ElasticsearchConfig {
        ElasticsearchConfig {
            hosts: Some(vec!["http://localhost:9200".to_string()]),
            ..Default::default()
        }
    }

    fn cloud_id_for(payload: &str) -> String {
        format!("deployment:{}", STANDARD.encode(payload))
    }

    #[test]
    fn endpoint_requires_exactly_one_source() {
        assert_eq!(
            ElasticsearchConfig::default().endpoint(),
            Err(ConfigurationError::MissingEndpoint)
        );

        let both = ElasticsearchConfig {
            cloud_id: Some(cloud_id_for("example.com$abc$def")),
            ..hosts_config()
        };
        assert_eq!(both.endpoint(), Err(ConfigurationError::AmbiguousEndpoint));

        let empty_hosts = ElasticsearchConfig {
            hosts: Some(vec![]),
            ..Default::default()
        };
        assert_eq!(
            empty_hosts.endpoint(),
            Err(ConfigurationError::MissingEndpoint)
        );
    }

    #[test]
    fn hosts_without_scheme_default_to_http() {
        let config = ElasticsearchConfig {
            hosts: Some(vec!["localhost:9200".to_string(), "https://es:443".to_string()]),
            ..Default::default()
        };
        let urls = config.endpoint().unwrap().urls();
        assert_eq!(urls[0].as_str(), "http://localhost:9200/");
        assert_eq!(urls[1].scheme(), "https");
    }

    #[test]
    fn cloud_id_decodes_to_https_url() {
        let url = parse_cloud_id(&cloud_id_for("us-east-1.aws.found.io$cec6f261$c6c2ca6d")).unwrap();
        assert_eq!(url.as_str(), "https://cec6f261.us-east-1.aws.found.io/");

        let with_port = parse_cloud_id(&cloud_id_for("example.com:9243$abc$def")).unwrap();
        assert_eq!(with_port.as_str(), "https://abc.example.com:9243/");
    }

    #[test]
    fn cloud_id_rejects_garbage() {
        assert!(matches!(
            parse_cloud_id("no-colon"),
            Err(ConfigurationError::InvalidCloudId(_))
        ));
        assert!(matches!(
            parse_cloud_id("name:!!!"),
            Err(ConfigurationError::InvalidCloudId(_))
        ));
        assert!(matches!(
            parse_cloud_id(&cloud_id_for("justahost")),
            Err(ConfigurationError::InvalidCloudId(_))
        ));
    }

    #[test]
    fn construction_fails_fast_without_endpoint() {
        assert!(matches!(
            IndexingClient::new(&ElasticsearchConfig::default()),
            Err(ConfigurationError::MissingEndpoint)
        ));
        assert!(IndexingClient::new(&hosts_config()).is_ok());
    }

    #[test]
    fn new_builds_multi_host_and_cloud_transports() {
        let two_hosts = ElasticsearchConfig {
            hosts: Some(vec![
                "http://es-1:9200".to_string(),
                "http://es-2:9200".to_string(),
            ]),
            api_key: Some("c2VjcmV0".to_string()),
            ..Default::default()
        };
        assert!(IndexingClient::new(&two_hosts).is_ok());

        let cloud = ElasticsearchConfig {
            cloud_id: Some(cloud_id_for("us-east-1.aws.found.io$cec6f261$c6c2ca6d")),
            ..Default::default()
        };
        assert!(IndexingClient::new(&cloud).is_ok());
    }

    #[test]
    fn round_robin_pool_cycles_hosts() {
        let urls = vec![
            Url::parse("http://es-1:9200").unwrap(),
            Url::parse("http://es-2:9200").unwrap(),
            Url::parse("http://es-3:9200").unwrap(),
        ];
        let pool = RoundRobinPool::new(urls).unwrap();
        let picks: Vec<usize> = (0..7).map(|_| pool.advance()).collect();
        assert_eq!(picks, vec![0, 1, 2, 0, 1, 2, 0]);

        // Clones made by the transport share the cursor.
        let clone = pool.clone();
        assert_eq!(clone.advance(), 1);
        assert_eq!(pool.advance(), 2);

        assert!(matches!(
            RoundRobinPool::new(Vec::new()),
            Err(ConfigurationError::MissingEndpoint)
        ));
    }

    /// In-memory log sink for a scoped subscriber.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    /// Run one bulk write under the CLI's default log filter and return
    /// what was logged.
    async fn logged_bulk_write(log: bool, trace: bool) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(
                crate::logging::default_directives(false),
            ))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let config = ElasticsearchConfig {
            log,
            trace,
            ..hosts_config()
        };
        let client = IndexingClient::with_transport(
            &config,
            Recording::new(json!({"took": 1, "errors": false, "items": []})),
        )
        .unwrap();
        client
            .bulk_write("idx", &[Document::new("1").with_field("marker", "zzz")])
            .await
            .unwrap();
        captured.text()
    }

    #[tokio::test]
    async fn flags_off_logs_nothing() {
        assert_eq!(logged_bulk_write(false, false).await, "");
    }

    #[tokio::test]
    async fn log_flag_logs_batches_without_bodies() {
        let out = logged_bulk_write(true, false).await;
        assert!(out.contains("Submitting bulk request"), "{}", out);
        assert!(out.contains("Bulk request succeeded"), "{}", out);
        assert!(!out.contains("zzz"), "{}", out);
    }

    #[tokio::test]
    async fn trace_flag_logs_bodies_under_default_filter() {
        let out = logged_bulk_write(false, true).await;
        assert!(out.contains("Submitting bulk request"), "{}", out);
        assert!(out.contains("Bulk request body"), "{}", out);
        assert!(out.contains("zzz"), "{}", out);
    }

    #[tokio::test]
    async fn successful_bulk_returns_report() {
        let client = IndexingClient::with_transport(
            &hosts_config(),
            Recording::new(json!({"took": 7, "errors": false, "items": []})),
        )
        .unwrap();
        let docs = vec![
            Document::new("1").with_field("name", "one"),
            Document::new("2").with_field("name", "two"),
        ];

        let report = client.bulk_write("search-test", &docs).await.unwrap();
        assert_eq!(
            report,
            WriteReport {
                count: 2,
                took_ms: Some(7)
            }
        );

        let calls = client.transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (index, body) = &calls[0];
        assert_eq!(index, "search-test");
        assert_eq!(
            body,
            &vec![
                json!({"index": {"_index": "search-test", "_id": "1"}}),
                json!({"id": "1", "name": "one"}),
                json!({"index": {"_index": "search-test", "_id": "2"}}),
                json!({"id": "2", "name": "two"}),
            ]
        );
    }

    #[tokio::test]
    async fn empty_batch_skips_wire_call() {
        let client =
            IndexingClient::with_transport(&hosts_config(), Recording::new(json!({}))).unwrap();
        let report = client.bulk_write("idx", &[]).await.unwrap();
        assert_eq!(report.count, 0);
        assert!(client.transport.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn item_failure_surfaces_first_error() {
        let response = json!({
            "errors": true,
            "items": [
                {"index": {"_id": "1", "status": 201}},
                {"index": {"_id": "2", "status": 400, "error": {"type": "mapper_parsing_exception"}}},
                {"index": {"_id": "3", "status": 400, "error": {"type": "version_conflict_engine_exception"}}}
            ]
        });
        let client =
            IndexingClient::with_transport(&hosts_config(), Recording::new(response)).unwrap();
        let docs = vec![Document::new("1"), Document::new("2"), Document::new("3")];

        let err = client.bulk_write("idx", &docs).await.unwrap_err();
        let failed = err.as_indexing_failed().unwrap();
        assert_eq!(failed.cause(), &json!({"type": "mapper_parsing_exception"}));
        assert!(failed
            .message()
            .starts_with("Failed to index documents into Elasticsearch.\nFirst error in response is: "));
        assert!(failed
            .message()
            .contains(r#"{"type":"mapper_parsing_exception"}"#));
        assert!(!failed.message().contains("version_conflict"));
    }

    #[test]
    fn errors_without_item_payload_fall_back_to_first_item() {
        let response = json!({"errors": true, "items": [{"index": {"_id": "9", "status": 500}}]});
        let err = check_bulk_response(&response, 1).unwrap_err();
        assert_eq!(err.cause(), &json!({"index": {"_id": "9", "status": 500}}));

        let err = check_bulk_response(&json!({"errors": true}), 1).unwrap_err();
        assert_eq!(err.cause(), &Value::Null);
    }

    #[tokio::test]
    async fn blank_id_is_rejected_before_the_wire() {
        let client =
            IndexingClient::with_transport(&hosts_config(), Recording::new(json!({}))).unwrap();
        let docs = vec![Document::new("1"), Document::new("  ")];

        let err = client.bulk_write("idx", &docs).await.unwrap_err();
        assert!(matches!(err, IndexingError::InvalidDocument(_)));
        assert!(err.as_indexing_failed().is_none());
        assert!(client.transport.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn non_boolean_errors_flag_is_a_failure() {
        let response = json!({"errors": "true", "items": [{"index": {"_id": "1", "status": 201}}]});
        let err = check_bulk_response(&response, 1).unwrap_err();
        assert_eq!(err.cause(), &json!({"index": {"_id": "1", "status": 201}}));

        assert!(check_bulk_response(&json!({"errors": 1}), 1).is_err());
        assert!(check_bulk_response(&json!({"errors": null}), 1).is_ok());
    }

    #[test]
    fn missing_errors_flag_counts_as_success() {
        let report = check_bulk_response(&json!({"items": []}), 3).unwrap();
        assert_eq!(report.count, 3);
        assert_eq!(report.took_ms, None);
    }
}
