//! # Request Loop
//!
//! Line-delimited JSON over any async reader/writer pair. One request object
//! per line in, one response object per line out, in order.
//!
//! The loop ends on EOF or when the shutdown signal flips to `true`.

use std::future::Future;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;
use tracing::{debug, error, info};
use yard_allocation::{ApiHandler, YardAllocationApi};

/// Shutdown channel flipped to `true` once `signal` resolves.
///
/// If the signal cannot be installed the sender stays alive, so the loop
/// keeps serving until EOF.
pub fn shutdown_on<F>(signal: F) -> watch::Receiver<bool>
where
    F: Future<Output = io::Result<()>> + Send + 'static,
{
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        match signal.await {
            Ok(()) => {
                let _ = tx.send(true);
            }
            Err(e) => {
                error!("Failed to listen for shutdown signal: {}", e);
                let _held = tx;
                std::future::pending::<()>().await;
            }
        }
    });
    rx
}

/// Counters reported when the loop exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub handled: u64,
    pub failed: u64,
}

pub struct RequestLoop<A: YardAllocationApi> {
    handler: ApiHandler<A>,
}

impl<A: YardAllocationApi> RequestLoop<A> {
    pub fn new(handler: ApiHandler<A>) -> Self {
        Self { handler }
    }

    pub async fn run<R, W>(
        &self,
        reader: R,
        mut writer: W,
        mut shutdown: watch::Receiver<bool>,
    ) -> io::Result<LoopStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut stats = LoopStats::default();

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        info!("[yard] shutdown signal received");
                        break;
                    }
                    continue;
                }
            };

            let Some(line) = line else {
                debug!("[yard] input closed");
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let response = self.handler.handle_json(&line).await;
            stats.handled += 1;
            if !response.is_success() {
                stats.failed += 1;
            }

            let mut encoded = serde_json::to_vec(&response).map_err(io::Error::other)?;
            encoded.push(b'\n');
            writer.write_all(&encoded).await?;
            writer.flush().await?;
        }

        info!(
            handled = stats.handled,
            failed = stats.failed,
            "[yard] request loop stopped"
        );
        Ok(stats)
    }
}
