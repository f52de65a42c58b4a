//! Lazy document sequences with backpressure.
//!
//! [`spawn_documents`] runs a connector's push-style
//! [`yield_documents`](crate::traits::Connector::yield_documents) on a tokio
//! task that feeds a bounded channel. The consumer pulls at its own pace;
//! the connector suspends whenever the channel is full.
//!
//! Dropping a [`DocumentStream`] closes the channel. The connector's next
//! `accept` then fails with [`SourceExtractionError::Cancelled`] and the
//! connector returns, releasing whatever it held for extraction.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::errors::SourceExtractionError;
use crate::models::Document;
use crate::traits::{Connector, DocumentSink};

/// Sink that forwards documents into a bounded channel.
struct ChannelSink {
    tx: mpsc::Sender<Document>,
}

#[async_trait]
impl DocumentSink for ChannelSink {
    async fn accept(&mut self, document: Document) -> Result<(), SourceExtractionError> {
        document.validate()?;
        self.tx
            .send(document)
            .await
            .map_err(|_| SourceExtractionError::Cancelled)
    }
}

/// A finite, single-pass sequence of documents from one extraction run.
pub struct DocumentStream {
    rx: mpsc::Receiver<Document>,
    task: JoinHandle<Result<(), SourceExtractionError>>,
}

impl DocumentStream {
    /// Next document in source order, or `None` once extraction has ended
    /// (successfully or not).
    pub async fn next(&mut self) -> Option<Document> {
        self.rx.recv().await
    }

    /// Stop consuming and return how extraction ended.
    ///
    /// Called after [`next`](Self::next) returned `None` this reports the
    /// connector's own result. Called earlier it cancels the connector and
    /// returns [`SourceExtractionError::Cancelled`].
    pub async fn finish(self) -> Result<(), SourceExtractionError> {
        drop(self.rx);
        match self.task.await {
            Ok(result) => result,
            Err(e) => Err(SourceExtractionError::Aborted(e.to_string())),
        }
    }
}

/// Start extracting documents from `connector` into a channel holding at
/// most `capacity` undelivered documents.
pub fn spawn_documents(connector: Arc<dyn Connector>, capacity: usize) -> DocumentStream {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let task = tokio::spawn(async move {
        let mut sink = ChannelSink { tx };
        let result = connector.yield_documents(&mut sink).await;
        if let Err(ref e) = result {
            debug!(error = %e, "Extraction ended with error");
        }
        result
    });
    DocumentStream { rx, task }
}

/// Run a connector to completion and collect what it yields.
pub async fn collect_documents(
    connector: &dyn Connector,
) -> Result<Vec<Document>, SourceExtractionError> {
    let mut docs: Vec<Document> = Vec::new();
    connector.yield_documents(&mut docs).await?;
    Ok(docs)
}
