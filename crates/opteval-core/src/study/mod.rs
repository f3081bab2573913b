//! Orchestrates a study from the user's side of the engine boundary.
//!
//! This module owns the process-wide identity registry, the study input
//! builder that serializes the configuration file (optionally embedding a
//! driver identity), the runner that resolves a communicator and invokes
//! the engine, and the [`driver::Study`] composition root tying them
//! together.

pub mod driver;
pub mod input;
pub mod registry;
pub mod runner;
