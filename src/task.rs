use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

/// Cancellation flag shared between a [`ScopedTask`] and its worker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    Pending,
    Completed,
    /// Cancelled, or the worker gave up without a result.
    Abandoned,
}

/// Background work bound to the lifetime of its owner.
///
/// The result is delivered once through [`ScopedTask::poll`]. Dropping the
/// task cancels it; a result produced afterwards goes nowhere.
#[derive(Debug)]
pub struct ScopedTask<T> {
    name: String,
    token: CancelToken,
    receiver: Receiver<T>,
    handle: Option<JoinHandle<()>>,
    state: TaskState,
}

impl<T: Send + 'static> ScopedTask<T> {
    pub fn spawn<F>(name: &str, work: F) -> std::io::Result<Self>
    where
        F: FnOnce(&CancelToken) -> Option<T> + Send + 'static,
    {
        let token = CancelToken::default();
        let (sender, receiver) = mpsc::sync_channel(1);

        let worker_token = token.clone();
        let handle = thread::Builder::new().name(name.to_string()).spawn(move || {
            if let Some(result) = work(&worker_token) {
                if !worker_token.is_cancelled() {
                    // The owner may already be gone
                    let _ = sender.send(result);
                }
            }
        })?;

        log::debug!("task '{name}' started");
        Ok(Self {
            name: name.to_string(),
            token,
            receiver,
            handle: Some(handle),
            state: TaskState::Pending,
        })
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    /// Non-blocking. Yields the result the first time it is available.
    pub fn poll(&mut self) -> Option<T> {
        if self.state != TaskState::Pending {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(result) => {
                self.state = TaskState::Completed;
                self.handle = None;
                log::debug!("task '{}' completed", self.name);
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.state = TaskState::Abandoned;
                self.handle = None;
                log::warn!("task '{}' finished without a result", self.name);
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        if self.state == TaskState::Pending {
            self.token.cancel();
            self.state = TaskState::Abandoned;
            log::debug!("task '{}' cancelled", self.name);
        }
    }

    /// Blocks until the worker thread exits. Used by tests and the exporter.
    pub fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::warn!("task '{}' panicked", self.name);
            }
        }
    }
}

impl<T> Drop for ScopedTask<T> {
    fn drop(&mut self) {
        // Never join here: teardown must not wait on the worker
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn delivers_the_result_once() {
        let mut task = ScopedTask::spawn("answer", |_| Some(42)).expect("spawn");
        task.join();
        assert_eq!(task.poll(), Some(42));
        assert_eq!(task.state(), TaskState::Completed);
        assert_eq!(task.poll(), None);
    }

    #[test]
    fn pending_until_the_worker_finishes() {
        let (go, wait) = mpsc::channel::<()>();
        let mut task = ScopedTask::spawn("gated", move |_| {
            wait.recv().ok()?;
            Some("done")
        })
        .expect("spawn");

        assert_eq!(task.poll(), None);
        assert_eq!(task.state(), TaskState::Pending);

        go.send(()).expect("worker alive");
        task.join();
        assert_eq!(task.poll(), Some("done"));
    }

    #[test]
    fn worker_without_result_is_abandoned() {
        let mut task = ScopedTask::<u8>::spawn("empty", |_| None).expect("spawn");
        task.join();
        assert_eq!(task.poll(), None);
        assert_eq!(task.state(), TaskState::Abandoned);
    }

    #[test]
    fn cancelled_task_discards_late_results() {
        let (go, wait) = mpsc::channel::<()>();
        let (seen_tx, seen_rx) = mpsc::channel::<bool>();
        let mut task = ScopedTask::spawn("late", move |token| {
            wait.recv().ok()?;
            let _ = seen_tx.send(token.is_cancelled());
            Some(7)
        })
        .expect("spawn");

        task.cancel();
        go.send(()).expect("worker alive");
        assert_eq!(seen_rx.recv_timeout(Duration::from_secs(5)), Ok(true));
        task.join();
        assert_eq!(task.poll(), None);
        assert_eq!(task.state(), TaskState::Abandoned);
    }

    #[test]
    fn dropping_the_owner_cancels_the_worker() {
        let (go, wait) = mpsc::channel::<()>();
        let (seen_tx, seen_rx) = mpsc::channel::<bool>();
        let task = ScopedTask::spawn("orphan", move |token| {
            wait.recv().ok()?;
            let _ = seen_tx.send(token.is_cancelled());
            Some(())
        })
        .expect("spawn");

        drop(task);
        go.send(()).expect("worker alive");
        assert_eq!(seen_rx.recv_timeout(Duration::from_secs(5)), Ok(true));
    }
}
