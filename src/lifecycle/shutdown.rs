//! Stop handle for a running relay.
//!
//! `HttpServer::run` takes any future as its stop condition; [`Shutdown`]
//! is the one the binary and the integration tests hand it. The flag is
//! latched, so a waiter created after `trigger` still resolves at once.

use std::future::Future;
use tokio::sync::watch;

pub struct Shutdown {
    stopped: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (stopped, _) = watch::channel(false);
        Self { stopped }
    }

    /// Ask every server waiting on this handle to stop accepting and drain.
    pub fn trigger(&self) {
        self.stopped.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.stopped.borrow()
    }

    /// Resolves after `trigger`, or when the handle is dropped.
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.stopped.subscribe();
        async move {
            let _ = rx.wait_for(|stopped| *stopped).await;
        }
    }

    /// Trigger once the process receives Ctrl+C or SIGTERM.
    pub fn trigger_on_signal(self) -> impl Future<Output = ()> + Send + 'static {
        let stopped = self.wait();
        tokio::spawn(async move {
            crate::lifecycle::shutdown_signal().await;
            self.trigger();
        });
        stopped
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
