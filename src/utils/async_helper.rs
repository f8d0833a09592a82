use futures_util::future::BoxFuture;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use tokio::sync::oneshot;

use crate::utils::errors::TransportError;

/// Type alias for async fetch results
pub type FetchResult = Result<Vec<u8>, TransportError>;

/// Type alias for boxed fetch futures
pub type FetchFuture = BoxFuture<'static, FetchResult>;

/// Snapshot of a background fetch, taken without blocking
#[derive(Debug)]
pub enum FetchStatus {
    /// Still running
    Pending,
    /// Finished; the result has been taken out of the handle
    Done(FetchResult),
    /// Cancelled, already taken, or the worker died before reporting
    Lost,
}

/// Handle to a fetch running on a background worker.
///
/// Dropping the handle cancels the request.
pub struct FetchHandle {
    cancel_tx: Option<oneshot::Sender<()>>,
    result_rx: Receiver<FetchResult>,
    taken: bool,
}

impl FetchHandle {
    /// Signal the worker to abandon the request. Idempotent.
    pub fn cancel(&mut self) {
        if let Some(tx) = self.cancel_tx.take() {
            let _ = tx.send(());
        }
    }

    /// Take the result if the worker has reported one
    pub fn try_take(&mut self) -> FetchStatus {
        if self.taken {
            return FetchStatus::Lost;
        }
        match self.result_rx.try_recv() {
            Ok(result) => {
                self.taken = true;
                FetchStatus::Done(result)
            }
            Err(TryRecvError::Empty) => FetchStatus::Pending,
            Err(TryRecvError::Disconnected) => {
                self.taken = true;
                FetchStatus::Lost
            }
        }
    }
}

impl Drop for FetchHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Spawns a background thread that runs a fetch future and reports through a channel
///
/// The worker:
/// 1. Creates a current-thread Tokio runtime (with error handling)
/// 2. Races the future against the cancellation signal
/// 3. Sends the result back unless it was cancelled
///
/// The caller polls the returned handle from its own thread, so results are
/// only ever applied on the owner's side.
///
/// # Example
/// ```ignore
/// let mut handle = spawn_cancellable(Box::pin(async move { Ok(vec![1, 2, 3]) }));
/// // Later, from the owner loop:
/// if let FetchStatus::Done(result) = handle.try_take() { /* apply */ }
/// ```
pub fn spawn_cancellable(task: FetchFuture) -> FetchHandle {
    let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
    let (result_tx, result_rx) = channel();

    std::thread::spawn(move || {
        let rt = match crate::utils::error_handling::create_runtime() {
            Ok(r) => r,
            Err(e) => {
                log::error!("[AsyncHelper] Failed to create runtime: {}", e);
                let _ = result_tx.send(Err(TransportError::Worker(e)));
                return;
            }
        };

        let outcome = rt.block_on(async move {
            tokio::select! {
                result = task => Some(result),
                _ = cancel_rx => None,
            }
        });

        match outcome {
            Some(result) => {
                // Receiver may be gone already; nothing left to notify then
                let _ = result_tx.send(result);
            }
            None => log::debug!("[AsyncHelper] Fetch cancelled before completion"),
        }
    });

    FetchHandle {
        cancel_tx: Some(cancel_tx),
        result_rx,
        taken: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for(handle: &mut FetchHandle) -> FetchStatus {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match handle.try_take() {
                FetchStatus::Pending if Instant::now() < deadline => {
                    std::thread::sleep(Duration::from_millis(5))
                }
                other => return other,
            }
        }
    }

    #[test]
    fn delivers_the_future_result() {
        let mut handle = spawn_cancellable(Box::pin(async { Ok(vec![7u8, 8, 9]) }));
        match wait_for(&mut handle) {
            FetchStatus::Done(Ok(bytes)) => assert_eq!(bytes, vec![7, 8, 9]),
            other => panic!("unexpected status: {:?}", other),
        }
        // Second take never yields the result twice
        assert!(matches!(handle.try_take(), FetchStatus::Lost));
    }

    #[test]
    fn delivers_transport_errors() {
        let mut handle = spawn_cancellable(Box::pin(async { Err(TransportError::EmptyResponse) }));
        match wait_for(&mut handle) {
            FetchStatus::Done(Err(e)) => assert_eq!(e, TransportError::EmptyResponse),
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[test]
    fn cancelled_fetch_never_reports() {
        let mut handle = spawn_cancellable(Box::pin(async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Vec::new())
        }));
        handle.cancel();
        handle.cancel();
        assert!(matches!(wait_for(&mut handle), FetchStatus::Lost));
    }
}
