//! Defines the seam between this layer and the external engine.
//!
//! This module contains the traits through which the engine and its
//! distributed-process communicator are consumed, the per-evaluation
//! request/response bundles, and the callback entry point the engine
//! invokes for each evaluation point during a study.

pub mod dispatch;
pub mod engine;
pub mod eval;
