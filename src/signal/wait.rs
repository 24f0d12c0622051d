use super::*;
use futures::{
    channel::oneshot::{self, Canceled, Receiver},
    FutureExt,
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context as TaskContext, Poll},
};

/// Future returned by Signal::wait(). The continuation is a one-shot listener registered when the
/// wait is created, so it sees the first fire after that point even if the task has not been
/// polled yet. Resolves to Err(Canceled) if the continuation is removed without firing (by
/// disconnect_all(), clearing the channel or dropping the signal). Dropping the future
/// disconnects the continuation.
pub struct Wait<T> {
    receiver: Receiver<T>,
    connection: Connection,
}

impl<T: Clone + Send + Sync + 'static> Wait<T> {
    pub(super) fn new(signal: &Signal<T>) -> Self {
        let (sender, receiver) = oneshot::channel();
        let sender = Mutex::new(Some(sender));
        let connection = signal.connect_once_raw(Arc::new(move |args: &T| {
            if let Some(sender) = lock(&sender).take() {
                if sender.send(args.clone()).is_err() {
                    trace!("waiter went away before the signal fired");
                }
            }
            Ok(())
        }));
        Self {
            receiver,
            connection,
        }
    }
}

impl<T> Wait<T> {
    /// Gives up on the wait. Same as dropping it.
    pub fn cancel(self) {}

    /// False once the signal has fired or the continuation was disconnected
    pub fn is_pending(&self) -> bool {
        self.connection.is_connected()
    }
}

impl<T> Future for Wait<T> {
    type Output = Result<T, Canceled>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Self::Output> {
        self.receiver.poll_unpin(cx)
    }
}

impl<T> Drop for Wait<T> {
    fn drop(&mut self) {
        self.connection.disconnect();
    }
}
