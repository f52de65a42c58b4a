//! Sync run orchestration.
//!
//! Drives one connector into one index: documents are pulled from the
//! connector's lazy stream, grouped into batches in source order, and each
//! batch is bulk-written before the next one is started. The run stops at
//! the first indexing failure; batches written before it stay indexed.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::errors::{SourceExtractionError, SyncError};
use crate::es_client::{BulkTransport, IndexingClient};
use crate::models::Document;
use crate::progress::{SyncProgressEvent, SyncProgressReporter};
use crate::stream::spawn_documents;
use crate::traits::Connector;

/// Tuning for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Target index name.
    pub index: String,
    /// Documents per bulk request. Clamped to at least 1.
    pub batch_size: usize,
    /// Documents buffered between extraction and indexing.
    pub channel_capacity: usize,
}

impl SyncOptions {
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            batch_size: 100,
            channel_capacity: 256,
        }
    }
}

/// Counters for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub documents: u64,
    pub batches: u64,
}

/// Extract everything from `connector` and index it.
///
/// If extraction fails partway, the documents it delivered are still
/// indexed before the extraction error is returned. If a bulk write fails,
/// extraction is cancelled and the indexing error is returned.
pub async fn run_sync<T: BulkTransport>(
    label: &str,
    connector: Arc<dyn Connector>,
    client: &IndexingClient<T>,
    options: &SyncOptions,
    progress: &dyn SyncProgressReporter,
) -> Result<SyncStats, SyncError> {
    let batch_size = options.batch_size.max(1);
    let mut stats = SyncStats::default();

    progress.report(SyncProgressEvent::Discovering {
        connector: label.to_string(),
    });
    info!(connector = label, index = %options.index, batch_size, "Starting sync");

    let mut stream = spawn_documents(connector, options.channel_capacity);
    let mut batch: Vec<Document> = Vec::with_capacity(batch_size);

    while let Some(doc) = stream.next().await {
        batch.push(doc);
        if batch.len() >= batch_size {
            // Returning here drops the stream, which cancels extraction.
            flush(label, client, options, &mut batch, &mut stats, progress).await?;
        }
    }
    flush(label, client, options, &mut batch, &mut stats, progress).await?;

    if let Err(e) = stream.finish().await {
        warn!(
            connector = label,
            indexed = stats.documents,
            error = %e,
            "Extraction failed; documents delivered before the failure were indexed"
        );
        return Err(e.into());
    }

    info!(
        connector = label,
        documents = stats.documents,
        batches = stats.batches,
        "Sync finished"
    );
    Ok(stats)
}

async fn flush<T: BulkTransport>(
    label: &str,
    client: &IndexingClient<T>,
    options: &SyncOptions,
    batch: &mut Vec<Document>,
    stats: &mut SyncStats,
    progress: &dyn SyncProgressReporter,
) -> Result<(), SyncError> {
    if batch.is_empty() {
        return Ok(());
    }

    let report = client.bulk_write(&options.index, batch).await?;
    stats.documents += report.count as u64;
    stats.batches += 1;
    batch.clear();

    debug!(connector = label, documents = stats.documents, "Batch indexed");
    progress.report(SyncProgressEvent::Indexing {
        connector: label.to_string(),
        documents: stats.documents,
        batches: stats.batches,
    });
    Ok(())
}

/// Count what a connector would produce, without indexing anything.
pub async fn count_documents(
    connector: Arc<dyn Connector>,
    channel_capacity: usize,
) -> Result<u64, SourceExtractionError> {
    let mut stream = spawn_documents(connector, channel_capacity);
    let mut count = 0u64;
    while stream.next().await.is_some() {
        count += 1;
    }
    stream.finish().await?;
    Ok(count)
}
