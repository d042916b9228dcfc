//! Background work owned by a single screen.
//!
//! A [`ScreenTasks`] scope spawns onto the ambient tokio runtime and collects
//! results on a bounded channel. Dropping the scope aborts everything still in
//! flight, so leaving a screen cancels its pending simulations.

use std::future::Future;

use tokio::runtime::Handle as TokioHandle;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::task::JoinHandle;

use crate::error::{AppError, AppResult};

const SCREEN_EVENT_CHANNEL_CAPACITY: usize = 32;

pub struct ScreenTasks<E> {
    scope: &'static str,
    sender: mpsc::Sender<E>,
    receiver: mpsc::Receiver<E>,
    handles: Vec<JoinHandle<()>>,
}

impl<E: Send + 'static> ScreenTasks<E> {
    pub fn new(scope: &'static str) -> Self {
        let (sender, receiver) = mpsc::channel(SCREEN_EVENT_CHANNEL_CAPACITY);
        Self {
            scope,
            sender,
            receiver,
            handles: Vec::new(),
        }
    }

    /// Runs `future` and delivers its output as one event.
    pub fn spawn<F>(&mut self, future: F) -> AppResult<()>
    where
        F: Future<Output = E> + Send + 'static,
    {
        self.spawn_with(|sender| async move {
            let event = future.await;
            let _ = sender.send(event).await;
        })
    }

    /// Runs a task that may report several events through the given sender.
    pub fn spawn_with<F, Fut>(&mut self, task: F) -> AppResult<()>
    where
        F: FnOnce(mpsc::Sender<E>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let runtime = TokioHandle::try_current().map_err(|_| {
            AppError::runtime_unavailable(format!(
                "{} tasks need an active tokio runtime",
                self.scope
            ))
        })?;
        self.handles.retain(|handle| !handle.is_finished());
        let handle = runtime.spawn(task(self.sender.clone()));
        self.handles.push(handle);
        tracing::debug!(scope = self.scope, pending = self.handles.len(), "spawned screen task");
        Ok(())
    }

    /// Takes every event that has arrived without waiting.
    pub fn drain(&mut self) -> Vec<E> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }

    pub fn pending(&self) -> usize {
        self.handles
            .iter()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    pub fn abort_all(&mut self) {
        let mut aborted = 0usize;
        for handle in self.handles.drain(..) {
            if !handle.is_finished() {
                aborted += 1;
            }
            handle.abort();
        }
        if aborted > 0 {
            tracing::debug!(scope = self.scope, aborted, "cancelled pending screen tasks");
        }
    }
}

impl<E> Drop for ScreenTasks<E> {
    fn drop(&mut self) {
        for handle in self.handles.drain(..) {
            handle.abort();
        }
    }
}

impl<E> std::fmt::Debug for ScreenTasks<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenTasks")
            .field("scope", &self.scope)
            .field("handles", &self.handles.len())
            .finish()
    }
}
