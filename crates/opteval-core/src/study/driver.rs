use super::input::StudyInput;
use super::runner::{self, RunOptions, StudyError};
use crate::boundary::engine::Engine;
use crate::boundary::eval::Driver;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Composition root for a basic study driver.
///
/// A `Study` owns its [`StudyInput`] and its driver for its whole lifetime;
/// running it writes the input with the driver's identity embedded, then
/// invokes the engine, which routes every evaluation back to the driver
/// through [`dispatch`](crate::boundary::dispatch::dispatch).
pub struct Study<D> {
    input: StudyInput,
    driver: Arc<D>,
}

impl<D: Driver + 'static> Study<D> {
    pub fn new(driver: D) -> Self {
        Self::with_input(driver, StudyInput::default())
    }

    pub fn with_input(driver: D, input: StudyInput) -> Self {
        Self {
            input,
            driver: Arc::new(driver),
        }
    }

    pub fn input(&self) -> &StudyInput {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut StudyInput {
        &mut self.input
    }

    pub fn driver(&self) -> &Arc<D> {
        &self.driver
    }

    /// Writes the study input to `input_path` with this driver embedded,
    /// then runs the engine on it.
    ///
    /// Only the coordinating process performs the write and the engine
    /// invocation: under a resolved communicator, a process whose rank is
    /// nonzero returns immediately and participates solely through the
    /// engine's own distributed protocol. Concurrent `run` calls on the
    /// same `Study` are unsupported.
    ///
    /// # Errors
    ///
    /// Propagates [`StudyError`]: input-writing failures, the generic
    /// engine failure, or a re-raised callback error.
    #[instrument(skip_all, fields(input = %input_path.display()))]
    pub fn run(
        &self,
        engine: &dyn Engine,
        input_path: &Path,
        options: &RunOptions,
    ) -> Result<(), StudyError> {
        let communicator = runner::resolve_communicator(engine, options);
        if let Some(comm) = &communicator {
            if comm.rank() != 0 {
                debug!(rank = comm.rank(), "non-coordinating rank, nothing to do");
                return Ok(());
            }
        }

        let driver: Arc<dyn Driver> = self.driver.clone();
        self.input.write(input_path, Some(&driver))?;

        let resolved = RunOptions {
            communicator,
            ..options.clone()
        };
        runner::run_study(engine, input_path, &resolved)
    }
}
