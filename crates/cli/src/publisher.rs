//! AuditPublisher - the single writer of the audit ledger
//!
//! One dedicated task owns the `LedgerWriter`:
//! - Receives publish requests via mpsc channel
//! - Appends them one at a time, in arrival order
//! - Sends receipts back via oneshot channel
//!
//! Handles are cheap to clone; every clone feeds the same task, so
//! concurrent publishers can never fork the chain.

use fairscore_ledger::{AppendReceipt, AuditPayload, LedgerError, LedgerStore, LedgerWriter};
use tokio::sync::{mpsc, oneshot};

/// Queue depth before `publish` starts waiting
pub const DEFAULT_BUFFER: usize = 64;

/// Request to append one payload
struct PublishRequest {
    payload: AuditPayload,
    /// Channel to send the receipt back
    response_tx: oneshot::Sender<Result<AppendReceipt, LedgerError>>,
}

/// Error from the publisher
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Publisher task has stopped")]
    ChannelClosed,
}

/// Handle to the writer task
#[derive(Clone)]
pub struct AuditPublisher {
    tx: mpsc::Sender<PublishRequest>,
}

impl AuditPublisher {
    /// Spawn the writer task. It stops once every handle is dropped.
    pub fn spawn<S>(writer: LedgerWriter<S>, buffer_size: usize) -> Self
    where
        S: LedgerStore + 'static,
    {
        let (tx, rx) = mpsc::channel::<PublishRequest>(buffer_size.max(1));

        // Appends do synchronous file I/O, keep them off the async workers
        tokio::task::spawn_blocking(move || publisher_loop(writer, rx));

        Self { tx }
    }

    /// Append a payload and wait for its receipt
    pub async fn publish(&self, payload: AuditPayload) -> Result<AppendReceipt, PublishError> {
        let (response_tx, response_rx) = oneshot::channel();

        self.tx
            .send(PublishRequest {
                payload,
                response_tx,
            })
            .await
            .map_err(|_| PublishError::ChannelClosed)?;

        let receipt = response_rx
            .await
            .map_err(|_| PublishError::ChannelClosed)??;
        Ok(receipt)
    }
}

/// The writer loop - owns the ledger, processes requests in order
fn publisher_loop<S: LedgerStore>(writer: LedgerWriter<S>, mut rx: mpsc::Receiver<PublishRequest>) {
    tracing::debug!("Audit publisher started");

    while let Some(req) = rx.blocking_recv() {
        let result = writer.append(&req.payload);

        if let Err(ref e) = result {
            tracing::error!(error = %e, "Failed to publish audit");
        }

        // Caller may have given up waiting
        let _ = req.response_tx.send(result);
    }

    tracing::debug!("Audit publisher stopped");
}
