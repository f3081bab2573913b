use super::input::InputError;
use crate::boundary::engine::{Communicator, Engine, ErrorSlot, distributed_available};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum StudyError {
    #[error(transparent)]
    Input(#[from] InputError),

    /// The engine reported failure without capturing a callback error.
    #[error("Engine run failed with status {status}")]
    EngineFailure { status: i32 },

    /// A failure captured inside a callback, re-raised with its original
    /// kind and message.
    #[error("{kind}: {message}")]
    Evaluation {
        kind: String,
        message: String,
        context: Option<String>,
    },
}

/// Options for one study run.
#[derive(Clone)]
pub struct RunOptions {
    /// Explicit communicator; wins over the engine's world communicator.
    pub communicator: Option<Arc<dyn Communicator>>,
    /// Whether to fall back to the engine's world communicator when no
    /// explicit one is given and the platform supports distributed runs.
    pub use_distributed: bool,
    /// Redirect the engine's stdout stream to this file.
    pub stdout: Option<PathBuf>,
    /// Redirect the engine's stderr stream to this file.
    pub stderr: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            communicator: None,
            use_distributed: true,
            stdout: None,
            stderr: None,
        }
    }
}

/// Resolves the communicator for a run: the explicit option wins; otherwise
/// the engine's world communicator when distributed execution is available
/// on this platform and requested; otherwise none (single-process mode).
pub fn resolve_communicator(
    engine: &dyn Engine,
    options: &RunOptions,
) -> Option<Arc<dyn Communicator>> {
    options.communicator.clone().or_else(|| {
        if distributed_available() && options.use_distributed {
            engine.world()
        } else {
            None
        }
    })
}

/// Runs a study through the engine's run entry point, blocking until the
/// whole study completes or fails.
///
/// # Errors
///
/// On a non-zero engine status, the error slot decides what surfaces: a
/// captured callback failure is re-raised as [`StudyError::Evaluation`] with
/// its original kind and message; an empty slot becomes the generic
/// [`StudyError::EngineFailure`]. Nothing is retried.
#[instrument(skip_all, fields(input = %input_path.display()))]
pub fn run_study(
    engine: &dyn Engine,
    input_path: &Path,
    options: &RunOptions,
) -> Result<(), StudyError> {
    let communicator = resolve_communicator(engine, options);
    info!(distributed = communicator.is_some(), "starting study");

    let mut failure = ErrorSlot::new();
    let status = engine.run_study(
        input_path,
        communicator.as_deref(),
        options.stdout.as_deref(),
        options.stderr.as_deref(),
        &mut failure,
    );

    if status != 0 {
        return Err(match failure.take() {
            Some(captured) => StudyError::Evaluation {
                kind: captured.kind,
                message: captured.message,
                context: captured.context,
            },
            None => StudyError::EngineFailure { status },
        });
    }

    info!("study complete");
    Ok(())
}
