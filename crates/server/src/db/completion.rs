//! Exactly-once delivery of an operation's outcome.
//!
//! A DAO call creates a [`CompletionSink`]/[`Pending`] pair, moves the sink
//! into the task that runs the statement, and hands the `Pending` back to the
//! caller straight away. The sink is consumed by [`CompletionSink::deliver`],
//! so an outcome can be delivered at most once; if the task ends without
//! delivering, the caller observes [`DbError::Interrupted`].
//!
//! Dropping a `Pending` does not cancel the submitted work.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;

use super::DbError;

/// Receiving end of a submitted operation.
#[derive(Debug)]
#[must_use = "a Pending does nothing unless awaited or given a callback"]
pub struct Pending<T> {
    rx: oneshot::Receiver<Result<T, DbError>>,
}

/// Sending end of a submitted operation.
#[derive(Debug)]
pub struct CompletionSink<T> {
    tx: oneshot::Sender<Result<T, DbError>>,
}

/// Create a connected sink/pending pair.
pub fn completion<T>() -> (CompletionSink<T>, Pending<T>) {
    let (tx, rx) = oneshot::channel();
    (CompletionSink { tx }, Pending { rx })
}

/// Spawn `work` on the runtime and return its pending outcome immediately.
///
/// # Panics
///
/// Panics if called outside a Tokio runtime.
pub fn submit<T, F>(work: F) -> Pending<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, DbError>> + Send + 'static,
{
    let (sink, pending) = completion();
    tokio::spawn(async move {
        sink.deliver(work.await);
    });
    pending
}

impl<T> CompletionSink<T> {
    /// Deliver the outcome. A caller that has gone away is not an error.
    pub fn deliver(self, outcome: Result<T, DbError>) {
        if self.tx.send(outcome).is_err() {
            tracing::debug!("completion receiver dropped before delivery");
        }
    }
}

impl<T: Send + 'static> Pending<T> {
    /// Hand the outcome to `handler` once it arrives instead of awaiting it.
    pub fn on_complete<H>(self, handler: H)
    where
        H: FnOnce(Result<T, DbError>) + Send + 'static,
    {
        tokio::spawn(async move {
            handler(self.await);
        });
    }
}

impl<T> Future for Pending<T> {
    type Output = Result<T, DbError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(_)) => Poll::Ready(Err(DbError::Interrupted)),
            Poll::Pending => Poll::Pending,
        }
    }
}
