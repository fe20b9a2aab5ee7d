//! Subscription read loop and handle.

use std::future::Future;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::{JoinError, JoinHandle, JoinSet};
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

use crate::error::BinanceError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// How a subscription's read loop ended without a read error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEnd {
    /// The owner called [`Subscription::close`].
    Cancelled,
    /// The server sent a close frame.
    Closed {
        /// Close reason sent by the server, if any.
        reason: Option<String>,
    },
    /// The connection ended without a close frame.
    Ended,
}

/// Handle to a running stream subscription.
///
/// Dropping the handle does not stop the subscription; call
/// [`Subscription::close`] for that.
#[derive(Debug)]
pub struct Subscription {
    endpoint: String,
    url: String,
    cancel: CancellationToken,
    task: JoinHandle<Result<StreamEnd, BinanceError>>,
}

impl Subscription {
    /// The stream endpoint this subscription was opened for.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The full stream URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stop the read loop. The connection is closed with a close frame.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    /// A token that stops this subscription when cancelled.
    ///
    /// Useful for tying the subscription to an owner's shutdown signal.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Whether the read loop and its handlers have finished.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the read loop to end and all dispatched handlers to finish.
    ///
    /// A read error is returned as `Err`.
    pub async fn wait(self) -> Result<StreamEnd, BinanceError> {
        match self.task.await {
            Ok(end) => end,
            Err(e) => Err(BinanceError::ConnectionClosed {
                reason: format!("stream task failed: {e}"),
            }),
        }
    }
}

/// Start the read loop for an established connection.
pub(crate) fn spawn<H, Fut>(
    ws: WsStream,
    endpoint: String,
    url: String,
    handler: H,
    max_in_flight: Option<usize>,
) -> Subscription
where
    H: Fn(Vec<u8>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let cancel = CancellationToken::new();
    let read_loop = ReadLoop {
        handler: Arc::new(handler),
        limit: max_in_flight.map(|n| Arc::new(Semaphore::new(n))),
        handlers: JoinSet::new(),
        cancel: cancel.clone(),
        endpoint: endpoint.clone(),
    };

    let task = tokio::spawn(read_loop.run(ws));

    Subscription {
        endpoint,
        url,
        cancel,
        task,
    }
}

struct ReadLoop<H> {
    handler: Arc<H>,
    limit: Option<Arc<Semaphore>>,
    handlers: JoinSet<()>,
    cancel: CancellationToken,
    endpoint: String,
}

impl<H, Fut> ReadLoop<H>
where
    H: Fn(Vec<u8>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn run(mut self, mut ws: WsStream) -> Result<StreamEnd, BinanceError> {
        let end = self.read(&mut ws).await;

        match &end {
            Ok(StreamEnd::Cancelled) => {
                let _ = ws.close(None).await;
            }
            // tungstenite queued the close reply; it only goes out on flush.
            Ok(StreamEnd::Closed { .. }) => {
                let _ = ws.flush().await;
            }
            _ => {}
        }
        drop(ws);

        while let Some(result) = self.handlers.join_next().await {
            self.log_handler_result(result);
        }

        match &end {
            Ok(reason) => tracing::debug!(endpoint = %self.endpoint, ?reason, "stream finished"),
            Err(e) => tracing::warn!(endpoint = %self.endpoint, error = %e, "stream failed"),
        }
        end
    }

    async fn read(&mut self, ws: &mut WsStream) -> Result<StreamEnd, BinanceError> {
        loop {
            while let Some(result) = self.handlers.try_join_next() {
                self.log_handler_result(result);
            }

            let frame = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Ok(StreamEnd::Cancelled),
                frame = ws.next() => frame,
            };

            let payload = match frame {
                Some(Ok(WsMessage::Text(text))) => text.as_str().as_bytes().to_vec(),
                Some(Ok(WsMessage::Binary(data))) => data.to_vec(),
                Some(Ok(WsMessage::Close(frame))) => {
                    let reason = frame
                        .map(|f| f.reason.as_str().to_string())
                        .filter(|reason| !reason.is_empty());
                    return Ok(StreamEnd::Closed { reason });
                }
                // Ping/pong are answered by tungstenite.
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(BinanceError::WebSocket(e)),
                None => return Ok(StreamEnd::Ended),
            };

            let Some(permit) = acquire(self.limit.clone(), self.cancel.clone()).await else {
                return Ok(StreamEnd::Cancelled);
            };
            self.dispatch(payload, permit);
        }
    }

    fn dispatch(&mut self, payload: Vec<u8>, permit: Option<OwnedSemaphorePermit>) {
        let handler = Arc::clone(&self.handler);
        self.handlers.spawn(async move {
            let _permit = permit;
            (*handler)(payload).await;
        });
    }

    fn log_handler_result(&self, result: Result<(), JoinError>) {
        if let Err(e) = result {
            tracing::warn!(endpoint = %self.endpoint, error = %e, "stream handler failed");
        }
    }
}

/// Wait for a handler slot. `None` means the subscription was cancelled.
async fn acquire(
    limit: Option<Arc<Semaphore>>,
    cancel: CancellationToken,
) -> Option<Option<OwnedSemaphorePermit>> {
    let Some(limit) = limit else {
        return Some(None);
    };

    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        permit = limit.acquire_owned() => permit.ok().map(Some),
    }
}
