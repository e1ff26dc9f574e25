//! Blocking bridge over one-shot completion callbacks.
//!
//! Adapter and device acquisition are exposed by GPU APIs as "submit a request,
//! get called back once". Initialization is a linear sequence, so each request
//! is wrapped into a call that returns the handle (or `None`) directly.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Status reported by a request callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RequestStatus {
    Success,
    /// No adapter/device satisfies the request.
    Unavailable,
    Error,
    Unknown,
}

/// How `request_sync` waits for the callback.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WaitStrategy {
    /// The callback is delivered before the submit call returns.
    Immediate,
    /// The callback may arrive from another execution context; sleep `interval`
    /// between checks of the completion flag. There is no timeout.
    Cooperative { interval: Duration },
}

impl Default for WaitStrategy {
    fn default() -> Self {
        Self::Immediate
    }
}

struct Slot<T> {
    handle: Option<T>,
    status: RequestStatus,
    message: Option<String>,
    completed: bool,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            handle: None,
            status: RequestStatus::Unknown,
            message: None,
            completed: false,
        }
    }
}

fn lock<T>(cell: &Mutex<Slot<T>>) -> MutexGuard<'_, Slot<T>> {
    cell.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Single-use completion handle passed to the request submitter.
///
/// Consuming `self` on completion makes a second delivery unrepresentable.
/// Dropping it without completing leaves the request pending.
pub struct Completer<T> {
    cell: Arc<Mutex<Slot<T>>>,
}

impl<T> Completer<T> {
    /// Records the outcome of the request.
    pub fn complete(self, status: RequestStatus, handle: Option<T>, message: Option<String>) {
        let mut slot = lock(&self.cell);
        slot.handle = handle;
        slot.status = status;
        slot.message = message;
        slot.completed = true;
    }

    pub fn succeed(self, handle: T) {
        self.complete(RequestStatus::Success, Some(handle), None);
    }

    pub fn fail(self, status: RequestStatus, message: impl Into<String>) {
        self.complete(status, None, Some(message.into()));
    }
}

/// Submits a request and blocks until its callback has been delivered.
///
/// `what` names the requested object in diagnostics ("adapter", "device").
///
/// Returns the delivered handle when the status is `Success`. Any other status
/// (or a success without a handle) is logged and yields `None`; it is not
/// retried.
///
/// # Panics
///
/// With `WaitStrategy::Immediate`, panics if `submit` returns without the
/// callback having been invoked.
pub fn request_sync<T, F>(what: &str, wait: WaitStrategy, submit: F) -> Option<T>
where
    F: FnOnce(Completer<T>),
{
    let cell = Arc::new(Mutex::new(Slot::default()));

    submit(Completer {
        cell: Arc::clone(&cell),
    });

    if let WaitStrategy::Cooperative { interval } = wait {
        while !lock(&cell).completed {
            std::thread::sleep(interval);
        }
    }

    let mut slot = lock(&cell);
    assert!(
        slot.completed,
        "{what} request returned before its completion callback was delivered"
    );

    match (slot.status, slot.handle.take()) {
        (RequestStatus::Success, Some(handle)) => Some(handle),
        (status, _) => {
            let message = slot.message.as_deref().unwrap_or("no message");
            log::error!("Could not get {what}: {message} (status {status:?})");
            None
        }
    }
}
