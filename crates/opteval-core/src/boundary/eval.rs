use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single evaluation failure reported by a driver.
///
/// The `kind` names the class of failure in the driver's own vocabulary
/// (for example `"ValueError"`); the `message` describes the concrete
/// occurrence. Both survive the trip across the engine boundary unchanged,
/// so a study failure reads exactly like the original driver error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind}: {message}")]
pub struct EvalError {
    pub kind: String,
    pub message: String,
}

impl EvalError {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// The parameter bundle the engine hands to the callback for one evaluation
/// point.
///
/// Produced by the engine, never constructed by this layer. The first element
/// of `analysis_components` is the identity key embedded in the configuration
/// file; the remaining elements are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalRequest {
    /// Number of response functions (objectives plus constraints).
    pub num_functions: usize,
    /// Total number of variables across all kinds.
    pub num_variables: usize,
    /// Continuous design variable values.
    pub continuous: Vec<f64>,
    /// Discrete integer variable values.
    pub discrete_int: Vec<i64>,
    /// Discrete real variable values.
    pub discrete_real: Vec<f64>,
    /// All variable values in engine order.
    pub all_variables: Vec<f64>,
    pub continuous_labels: Vec<String>,
    pub discrete_int_labels: Vec<String>,
    pub discrete_real_labels: Vec<String>,
    pub all_labels: Vec<String>,
    /// Active set vector: bit 1 = value, bit 2 = gradient, bit 3 = hessian.
    pub active_set: Vec<u8>,
    /// Derivative variables vector.
    pub derivative_vars: Vec<usize>,
    /// Engine-assigned evaluation counter.
    pub eval_id: u64,
    /// Strings from the interface section's `analysis_components` line;
    /// the first is the driver identity key.
    pub analysis_components: Vec<String>,
}

/// The response bundle a driver produces for one evaluation point,
/// returned to the engine unmodified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalResponse {
    pub functions: Vec<f64>,
    pub gradients: Vec<Vec<f64>>,
    pub hessians: Vec<Vec<Vec<f64>>>,
}

/// A user-supplied evaluation driver.
///
/// One driver instance is the unit of identity tracked by the registry:
/// writing a study input with a driver embeds that instance's identity key,
/// and every callback carrying the key is routed to this method.
///
/// Implementations must be `Send + Sync`; callbacks may arrive from engine
/// threads.
pub trait Driver: Send + Sync {
    /// Computes the response for one evaluation request.
    ///
    /// # Errors
    ///
    /// Returns an [`EvalError`] describing the failure; the engine captures
    /// it at the boundary and the study runner re-raises it to the caller
    /// with its kind and message intact.
    fn evaluate(&self, request: &EvalRequest) -> Result<EvalResponse, EvalError>;
}

impl std::fmt::Debug for dyn Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Driver")
    }
}
