use std::fmt;
use std::sync::Arc;

/// Why the device was lost.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LostReason {
    Unknown,
    /// The device was explicitly destroyed.
    Destroyed,
}

/// Category of an uncaptured device error.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    OutOfMemory,
    Validation,
    Internal,
}

/// Asynchronous fault reported by the GPU backend.
///
/// These are report-only: nothing in the application reacts to them beyond
/// writing them to a [`DiagnosticSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum GpuEvent {
    DeviceLost {
        reason: LostReason,
        message: Option<String>,
    },
    UncapturedError {
        kind: ErrorKind,
        message: Option<String>,
    },
}

impl GpuEvent {
    pub fn device_lost(reason: LostReason, message: impl Into<String>) -> Self {
        Self::DeviceLost {
            reason,
            message: non_empty(message.into()),
        }
    }

    pub fn uncaptured_error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self::UncapturedError {
            kind,
            message: non_empty(message.into()),
        }
    }
}

fn non_empty(message: String) -> Option<String> {
    if message.is_empty() { None } else { Some(message) }
}

impl fmt::Display for GpuEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            GpuEvent::DeviceLost { reason, message } => {
                write!(f, "Device lost: reason {reason:?}")?;
                message
            }
            GpuEvent::UncapturedError { kind, message } => {
                write!(f, "Device error: type {kind:?}")?;
                message
            }
        };

        if let Some(message) = message {
            write!(f, ", message: {message}")?;
        }
        Ok(())
    }
}

/// Destination for [`GpuEvent`]s.
///
/// Backends may invoke the sink from their own threads.
#[derive(Clone)]
pub struct DiagnosticSink {
    report: Arc<dyn Fn(&GpuEvent) + Send + Sync>,
}

impl DiagnosticSink {
    pub fn new(report: impl Fn(&GpuEvent) + Send + Sync + 'static) -> Self {
        Self {
            report: Arc::new(report),
        }
    }

    /// Sink that writes every event through the `log` facade.
    pub fn log() -> Self {
        Self::new(|event| log::error!("{event}"))
    }

    pub fn report(&self, event: &GpuEvent) {
        (self.report)(event);
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::log()
    }
}

impl fmt::Debug for DiagnosticSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticSink").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn device_lost_line_includes_message() {
        let event = GpuEvent::device_lost(LostReason::Destroyed, "adapter removed");
        assert_eq!(
            event.to_string(),
            "Device lost: reason Destroyed, message: adapter removed"
        );
    }

    #[test]
    fn empty_message_is_omitted() {
        let event = GpuEvent::device_lost(LostReason::Unknown, "");
        assert_eq!(event, GpuEvent::DeviceLost { reason: LostReason::Unknown, message: None });
        assert_eq!(event.to_string(), "Device lost: reason Unknown");
    }

    #[test]
    fn uncaptured_error_line() {
        let event = GpuEvent::uncaptured_error(ErrorKind::Validation, "bad bind group");
        assert_eq!(
            event.to_string(),
            "Device error: type Validation, message: bad bind group"
        );
    }

    #[test]
    fn sink_forwards_events() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            DiagnosticSink::new(move |e| seen.lock().expect("lock").push(e.to_string()))
        };

        sink.clone().report(&GpuEvent::uncaptured_error(ErrorKind::OutOfMemory, ""));

        assert_eq!(*seen.lock().expect("lock"), vec!["Device error: type OutOfMemory"]);
    }
}
