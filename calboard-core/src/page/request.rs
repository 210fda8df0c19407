//! Cancellation and timeouts for remote requests issued by a page.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::timeout;

use crate::error::{CalboardError, CalboardResult};

/// Owned by a page; flipping it cancels every request the page started.
#[derive(Debug)]
pub(crate) struct Lifecycle {
    cancelled: watch::Sender<bool>,
}

impl Lifecycle {
    pub(crate) fn new() -> Self {
        let (cancelled, _) = watch::channel(false);
        Lifecycle { cancelled }
    }

    pub(crate) fn guard(&self, limit: Duration) -> RequestGuard {
        RequestGuard {
            cancelled: self.cancelled.subscribe(),
            limit,
        }
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.send_replace(true);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }
}

/// Races one request against the page's cancellation and a timeout.
#[derive(Debug)]
pub(crate) struct RequestGuard {
    cancelled: watch::Receiver<bool>,
    limit: Duration,
}

impl RequestGuard {
    pub(crate) async fn run<T, F>(mut self, request: F) -> CalboardResult<T>
    where
        F: Future<Output = CalboardResult<T>>,
    {
        if *self.cancelled.borrow() {
            return Err(CalboardError::Cancelled);
        }

        let limit = self.limit;
        tokio::select! {
            result = timeout(limit, request) => {
                result.map_err(|_| CalboardError::Timeout(limit))?
            }
            _ = self.cancelled.wait_for(|cancelled| *cancelled) => Err(CalboardError::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_when_not_cancelled() {
        let lifecycle = Lifecycle::new();
        let result = lifecycle
            .guard(Duration::from_secs(1))
            .run(async { Ok::<_, CalboardError>(7) })
            .await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_cancel_before_start() {
        let lifecycle = Lifecycle::new();
        let guard = lifecycle.guard(Duration::from_secs(1));
        lifecycle.cancel();
        assert!(lifecycle.is_cancelled());

        let result = guard.run(async { Ok::<_, CalboardError>(()) }).await;
        assert!(matches!(result, Err(CalboardError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_while_waiting() {
        let lifecycle = Lifecycle::new();
        let guard = lifecycle.guard(Duration::from_secs(600));
        let task = tokio::spawn(guard.run(async {
            tokio::time::sleep(Duration::from_secs(300)).await;
            Ok::<_, CalboardError>(())
        }));

        tokio::task::yield_now().await;
        lifecycle.cancel();

        assert!(matches!(task.await.unwrap(), Err(CalboardError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let lifecycle = Lifecycle::new();
        let result = lifecycle
            .guard(Duration::from_secs(10))
            .run(async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, CalboardError>(())
            })
            .await;
        assert!(matches!(
            result,
            Err(CalboardError::Timeout(d)) if d == Duration::from_secs(10)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sub_second_timeout_keeps_its_unit() {
        let lifecycle = Lifecycle::new();
        let err = lifecycle
            .guard(Duration::from_millis(500))
            .run(async {
                tokio::time::sleep(Duration::from_secs(1)).await;
                Ok::<_, CalboardError>(())
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Request timed out after 500ms");
    }
}
