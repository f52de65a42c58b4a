//! # Source Connectors
//!
//! Pluggable source connectors that pull documents out of third-party
//! systems and bulk-index them into Elasticsearch.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────┐   ┌───────────────┐
//! │ Connectors  │──▶│  Sync runner │──▶│ Elasticsearch │
//! │ example/FS  │   │ batch + bulk │   │  _bulk API    │
//! └─────────────┘   └──────────────┘   └───────────────┘
//!        ▲
//!        │ service_type
//! ┌──────┴──────┐
//! │  Registry   │
//! └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! connectors kinds                  # list connector service types
//! connectors fields filesystem      # show configurable fields
//! connectors sources                # health-check configured connectors
//! connectors sync docs --dry-run    # count what would be indexed
//! connectors sync docs              # extract and index
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`traits`] | Connector contract and registry |
//! | [`models`] | Documents, configurable fields, connector settings |
//! | [`errors`] | Error types |
//! | [`connector_example`] | Reference connector |
//! | [`connector_fs`] | Filesystem connector |
//! | [`stream`] | Bounded document stream |
//! | [`es_client`] | Bulk indexing client |
//! | [`ingest`] | Sync runner |
//! | [`progress`] | Sync progress reporting |
//! | [`config`] | TOML configuration parsing |
//! | [`sources`] | Connector listing and health |
//! | [`logging`] | Subscriber setup |

pub mod config;
pub mod connector_example;
pub mod connector_fs;
pub mod errors;
pub mod es_client;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod progress;
pub mod sources;
pub mod stream;
pub mod traits;
