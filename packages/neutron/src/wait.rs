//! Block-paced waiting: a websocket subscription to new-block events and a
//! generic retry loop built on top of it.

use std::future::Future;
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::error::WaitError;

const DEFAULT_WAIT_TIMEOUT: Duration = Duration::from_secs(120);

/// Counts block-commit notifications from a node's event stream.
///
/// Each call opens its own subscription and drops it when done, so concurrent
/// waits never share connection state.
#[derive(Clone, Debug)]
pub struct BlockWaiter {
    url: String,
    timeout: Duration,
}

impl BlockWaiter {
    /// `url` is the node's websocket endpoint, e.g. `ws://localhost:26657/websocket`.
    pub fn new(url: impl Into<String>) -> Self {
        BlockWaiter {
            url: url.into(),
            timeout: DEFAULT_WAIT_TIMEOUT,
        }
    }

    /// Override the default deadline applied by [BlockWaiter::wait_blocks].
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        BlockWaiter {
            url: url.into(),
            timeout,
        }
    }

    /// Resolve once `count` new blocks have been committed.
    pub async fn wait_blocks(&self, count: usize) -> Result<(), WaitError> {
        self.wait_blocks_timeout(count, self.timeout).await
    }

    /// Resolve once `count` new blocks have been committed, or fail when the
    /// deadline elapses first. The subscription is dropped on both paths.
    pub async fn wait_blocks_timeout(
        &self,
        count: usize,
        timeout: Duration,
    ) -> Result<(), WaitError> {
        match tokio::time::timeout(timeout, self.consume_blocks(count)).await {
            Ok(res) => res,
            Err(_) => Err(WaitError::Timeout { timeout }),
        }
    }

    async fn consume_blocks(&self, mut remaining: usize) -> Result<(), WaitError> {
        let (mut stream, _) = connect_async(self.url.as_str()).await?;
        stream.send(Message::Text(subscribe_command())).await?;
        while remaining > 0 {
            let msg = match stream.next().await {
                Some(msg) => msg?,
                None => return Err(WaitError::StreamClosed),
            };
            match msg {
                Message::Text(text) => {
                    // The subscription confirmation arrives with an empty
                    // result payload and must not count as a block.
                    if has_block_payload(&text) {
                        remaining -= 1;
                    }
                }
                Message::Close(_) => return Err(WaitError::StreamClosed),
                Message::Binary(_) | Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => {}
            }
        }
        let _ = stream.close(None).await;
        Ok(())
    }
}

fn subscribe_command() -> String {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": "subscribe",
        "id": "1",
        "params": ["tm.event='NewBlock'"],
    })
    .to_string()
}

fn has_block_payload(text: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|msg| msg.get("result").cloned())
        .and_then(|result| result.as_object().map(|obj| !obj.is_empty()))
        .unwrap_or(false)
}

/// Pacing strategy between retry attempts.
///
/// Decouples the retry loops from the event-stream mechanism; production code
/// paces on new blocks via [BlockWaiter], tests can inject an immediate impl.
#[async_trait]
pub trait Pacer {
    async fn pause(&self) -> Result<()>;
}

#[async_trait]
impl Pacer for BlockWaiter {
    async fn pause(&self) -> Result<()> {
        self.wait_blocks(1).await?;
        Ok(())
    }
}

/// Retry `get` until `ready` accepts its result.
///
/// Fetch failures are recorded and retried; the pacer runs between attempts,
/// including after a failure. Once the budget is exhausted the last recorded
/// error surfaces, or a generic error carrying the last fetched value if every
/// fetch succeeded without ever becoming ready.
pub async fn get_with_attempts<T, Get, GetFut, Ready, ReadyFut>(
    pacer: &impl Pacer,
    get: Get,
    ready: Ready,
    num_attempts: usize,
) -> Result<T>
where
    T: std::fmt::Debug,
    Get: Fn() -> GetFut,
    GetFut: Future<Output = Result<T>>,
    Ready: Fn(&T) -> ReadyFut,
    ReadyFut: Future<Output = bool>,
{
    let mut last_error = None;
    let mut last_value = None;
    for attempt in 1..=num_attempts {
        match get().await {
            Ok(value) => {
                if ready(&value).await {
                    return Ok(value);
                }
                log::debug!("value not ready, attempt {attempt}/{num_attempts}");
                last_value = Some(value);
            }
            Err(err) => {
                log::debug!("fetch failed, attempt {attempt}/{num_attempts}: {err:?}");
                last_error = Some(err);
            }
        }
        pacer.pause().await?;
    }
    Err(match (last_error, last_value) {
        (Some(err), _) => err,
        (None, Some(value)) => anyhow!("no attempts left, latest response: {value:?}"),
        (None, None) => anyhow!("no attempts left"),
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::oneshot;

    use super::*;

    struct Immediate;

    #[async_trait]
    impl Pacer for Immediate {
        async fn pause(&self) -> Result<()> {
            Ok(())
        }
    }

    struct Counting(AtomicUsize);

    #[async_trait]
    impl Pacer for Counting {
        async fn pause(&self) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn poller_returns_first_ready_value() {
        let calls = Cell::new(0usize);
        let res = get_with_attempts(
            &Immediate,
            || async {
                calls.set(calls.get() + 1);
                Ok(calls.get())
            },
            |value: &usize| {
                let value = *value;
                async move { value >= 3 }
            },
            10,
        )
        .await
        .unwrap();
        assert_eq!(res, 3);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn poller_surfaces_last_fetch_error() {
        let calls = Cell::new(0usize);
        let err = get_with_attempts(
            &Immediate,
            || async {
                calls.set(calls.get() + 1);
                Err::<u32, _>(anyhow!("boom #{}", calls.get()))
            },
            |_: &u32| async { true },
            4,
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "boom #4");
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test]
    async fn poller_exhaustion_carries_last_value() {
        let pacer = Counting(AtomicUsize::new(0));
        let err = get_with_attempts(
            &pacer,
            || async { Ok(7u32) },
            |_: &u32| async { false },
            5,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("no attempts left"));
        assert!(err.to_string().contains('7'));
        // the pacer runs after every attempt, including the last
        assert_eq!(pacer.0.load(Ordering::SeqCst), 5);
    }

    const EMPTY_RESULT: &str = r#"{"jsonrpc":"2.0","id":"1","result":{}}"#;
    const NEW_BLOCK: &str = r#"{"jsonrpc":"2.0","id":"1","result":{"query":"tm.event='NewBlock'","data":{"type":"tendermint/event/NewBlock","value":{}}}}"#;

    /// One-shot block feed: confirms the subscription with an empty payload,
    /// emits `blocks` notifications, then signals when the peer disconnects.
    async fn spawn_block_feed(blocks: usize) -> (String, oneshot::Receiver<()>) {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (done_tx, done_rx) = oneshot::channel();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            let _subscribe = ws.next().await;
            ws.send(Message::Text(EMPTY_RESULT.to_owned())).await.unwrap();
            for _ in 0..blocks {
                ws.send(Message::Text(NEW_BLOCK.to_owned())).await.unwrap();
            }
            loop {
                match ws.next().await {
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            let _ = done_tx.send(());
        });
        (format!("ws://{addr}"), done_rx)
    }

    #[tokio::test]
    async fn waits_for_requested_blocks() {
        let (url, done) = spawn_block_feed(3).await;
        BlockWaiter::new(url)
            .wait_blocks_timeout(3, Duration::from_secs(5))
            .await
            .unwrap();
        // the subscription must be gone once the wait resolves
        tokio::time::timeout(Duration::from_secs(5), done)
            .await
            .expect("subscription still open")
            .unwrap();
    }

    #[tokio::test]
    async fn empty_payloads_do_not_count() {
        let (url, done) = spawn_block_feed(2).await;
        let err = BlockWaiter::new(url)
            .wait_blocks_timeout(3, Duration::from_millis(500))
            .await
            .unwrap_err();
        assert!(matches!(err, WaitError::Timeout { .. }));
        // timing out must also tear the subscription down
        tokio::time::timeout(Duration::from_secs(5), done)
            .await
            .expect("subscription still open")
            .unwrap();
    }
}
