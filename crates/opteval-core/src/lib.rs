//! # Opteval Core Library
//!
//! A thin adaptation layer binding a user-defined evaluation driver to an external
//! optimization/uncertainty-quantification engine.
//!
//! The engine only accepts a flat textual configuration file and cannot carry
//! in-process object references across its call boundary. This crate closes that
//! gap: a reference to a user driver is serialized as an opaque identity key
//! embedded in the configuration file, recovered from a process-wide registry when
//! the engine calls back per evaluation, and the request is dispatched to the
//! correct driver instance.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict separation of concerns:
//!
//! - **[`boundary`]: The Engine Seam.** Traits for the two external collaborators
//!   (the engine itself and its distributed-process communicator), the evaluation
//!   request/response bundles exchanged per callback, and the dispatch entry point
//!   the engine invokes for every evaluation.
//!
//! - **[`study`]: The Orchestration Layer.** The identity registry, the study
//!   input builder that writes the configuration file (optionally embedding a
//!   driver identity), the study runner that resolves a communicator and invokes
//!   the engine, and the [`study::driver::Study`] composition root tying them
//!   together for a basic driver.

pub mod boundary;
pub mod study;
