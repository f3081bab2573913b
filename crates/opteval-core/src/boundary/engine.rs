use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// An opaque handle onto the distributed-process communicator.
///
/// This layer only ever asks a communicator two questions; everything else
/// about process coordination belongs to the engine's own distributed
/// protocol.
pub trait Communicator: Send + Sync {
    /// The rank of the calling process within the communicator.
    fn rank(&self) -> usize;

    /// The number of cooperating processes in the communicator.
    fn size(&self) -> usize;
}

/// Failure details captured at the engine boundary.
///
/// Exceptions thrown inside a callback do not propagate natively through the
/// engine's call boundary. The engine is required to record them here before
/// reporting a non-zero status, so the study runner can re-raise the original
/// failure instead of a generic one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedFailure {
    /// The original error's class, e.g. `"ValueError"`.
    pub kind: String,
    /// The original error's message.
    pub message: String,
    /// Optional originating context (callback site, evaluation id, ...).
    pub context: Option<String>,
}

/// The mutable slot the study runner passes into the engine's run entry
/// point for cross-boundary failure capture.
#[derive(Debug, Default)]
pub struct ErrorSlot(Option<CapturedFailure>);

impl ErrorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a failure; a later capture overwrites an earlier one.
    pub fn capture(&mut self, failure: CapturedFailure) {
        self.0 = Some(failure);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Removes and returns the captured failure, if any.
    pub fn take(&mut self) -> Option<CapturedFailure> {
        self.0.take()
    }
}

/// Defines the interface onto the external optimization/UQ engine.
///
/// The engine is consumed through exactly two operations: running a study
/// given a configuration file path, and (from its side) invoking the
/// [`dispatch`](crate::boundary::dispatch::dispatch) callback once per
/// evaluation point. Everything else — algorithms, numerical methods,
/// distributed launch — is the engine's own business.
pub trait Engine {
    /// The engine's default world communicator, if it runs under one.
    ///
    /// Consulted by the study runner when no explicit communicator is
    /// supplied and distributed execution is requested and available.
    fn world(&self) -> Option<Arc<dyn Communicator>>;

    /// Runs a complete study described by the configuration file at `input`.
    ///
    /// Blocks the calling process until every evaluation completes or the
    /// study fails. `stdout` and `stderr` optionally redirect the engine's
    /// respective streams to files.
    ///
    /// # Return
    ///
    /// An integer status; zero is success. On a non-zero status the engine
    /// must have populated `failure` if the underlying cause was an error
    /// raised inside a callback.
    fn run_study(
        &self,
        input: &Path,
        communicator: Option<&dyn Communicator>,
        stdout: Option<&Path>,
        stderr: Option<&Path>,
        failure: &mut ErrorSlot,
    ) -> i32;
}

/// Whether distributed execution is available on the current platform.
pub fn distributed_available() -> bool {
    !cfg!(windows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_slot_starts_empty_and_take_drains_it() {
        let mut slot = ErrorSlot::new();
        assert!(slot.is_empty());
        assert!(slot.take().is_none());

        slot.capture(CapturedFailure {
            kind: "ValueError".to_string(),
            message: "bad variable bounds".to_string(),
            context: None,
        });
        assert!(!slot.is_empty());

        let failure = slot.take().unwrap();
        assert_eq!(failure.kind, "ValueError");
        assert_eq!(failure.message, "bad variable bounds");
        assert!(slot.is_empty());
    }

    #[test]
    fn later_capture_overwrites_earlier_one() {
        let mut slot = ErrorSlot::new();
        slot.capture(CapturedFailure {
            kind: "First".to_string(),
            message: "first".to_string(),
            context: None,
        });
        slot.capture(CapturedFailure {
            kind: "Second".to_string(),
            message: "second".to_string(),
            context: Some("evaluation 3".to_string()),
        });

        let failure = slot.take().unwrap();
        assert_eq!(failure.kind, "Second");
        assert_eq!(failure.context.as_deref(), Some("evaluation 3"));
    }
}
