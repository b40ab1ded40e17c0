//! Error-reporting context for background workers.

use tokio::sync::mpsc;
use tracing::Span;

use crate::common::*;

/// A boxed future returning `Result<T>`.
pub(crate) type BoxFuture<T, E = Error> =
    futures::future::BoxFuture<'static, Result<T, E>>;

/// Context shared by our asynchronous operations.
///
/// The only background worker we run today is the PostgreSQL connection
/// driver, but anything spawned here reports its failure to the future
/// returned by [`Context::create`].
#[derive(Debug, Clone)]
pub(crate) struct Context {
    /// Background workers send their errors to this channel.
    error_sender: mpsc::Sender<Error>,
}

impl Context {
    /// Create a new context, and a future which resolves to `Ok(())` once every
    /// copy of the context and every worker is gone, or to the first worker
    /// error.
    pub(crate) fn create() -> (Self, BoxFuture<()>) {
        let (error_sender, mut receiver) = mpsc::channel(1);
        let context = Context { error_sender };
        let worker_future = async move {
            match receiver.recv().await {
                None => Ok(()),
                Some(err) => Err(err),
            }
        };
        (context, worker_future.boxed())
    }

    /// Spawn an async worker in this context.
    pub(crate) fn spawn_worker<W>(&self, span: Span, worker: W)
    where
        W: Future<Output = Result<()>> + Send + 'static,
    {
        let error_sender = self.error_sender.clone();
        tokio::spawn(
            async move {
                if let Err(err) = worker.await {
                    debug!("reporting background worker error: {}", err);
                    if let Err(_err) = error_sender.send(err).await {
                        debug!("broken pipe reporting background worker error");
                    }
                }
            }
            .instrument(span),
        );
    }
}
