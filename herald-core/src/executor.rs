use herald::{Error, Result};

use std::future::Future;
use tokio::{
    sync::{mpsc, oneshot},
    task,
};

/// A handle to a command body running on the worker pool.
///
/// Every [`call`] submits the context to a dispatch loop which
/// spawns an independent task per invocation, so concurrent calls
/// execute in parallel without any ordering between them.
///
/// [`call`]: Self::call
#[derive(Clone, Debug)]
pub struct Executor<T> {
    tx: mpsc::Sender<(T, oneshot::Sender<Result>)>,
}

impl<T> Executor<T>
where
    T: Send + 'static,
{
    /// Creates a new `Executor` running the given function as the
    /// command body.
    pub fn from_fn<F>(f: fn(T) -> F) -> Self
    where
        F: Future<Output = Result> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<(T, oneshot::Sender<Result>)>(32);

        task::spawn(async move {
            while let Some((data, tx)) = rx.recv().await {
                task::spawn(async move {
                    let res = f(data).await;
                    let _ = tx.send(res);
                });
            }
        });

        Self { tx }
    }

    /// Runs the command body with the given context and returns
    /// its outcome.
    pub async fn call(&self, ctx: T) -> Result {
        let (tx, rx) = oneshot::channel();

        let _ = self.tx.send((ctx, tx)).await;

        match rx.await {
            Ok(val) => val,
            // The sender was dropped. This likely happened because
            // the command body panicked.
            Err(_) => Err(Error::NoResponse),
        }
    }
}
