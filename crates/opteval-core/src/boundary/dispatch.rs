use super::eval::{EvalError, EvalRequest, EvalResponse};
use crate::study::registry;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Evaluation request carries no analysis components")]
    MissingIdentity,

    #[error("Analysis component '{key}' does not resolve to a registered driver")]
    UnknownIdentity { key: String },

    #[error(transparent)]
    Evaluation(#[from] EvalError),
}

/// Routes one evaluation request from the engine to its driver.
///
/// Stateless per call: the first analysis component is taken as the identity
/// key, resolved through the process-wide registry, and the full request is
/// forwarded to the resolved driver's `evaluate`; its response is returned
/// unmodified. Failures are logged and returned, never retried — whether a
/// failed evaluation aborts the whole study is the engine's decision.
///
/// # Errors
///
/// - [`DispatchError::MissingIdentity`] if the request has no analysis
///   components: the study input was written without embedding a driver.
/// - [`DispatchError::UnknownIdentity`] if the key resolves to nothing: the
///   driver was reclaimed, or the key is stale or corrupt.
/// - [`DispatchError::Evaluation`] carrying the driver's own error.
pub fn dispatch(request: &EvalRequest) -> Result<EvalResponse, DispatchError> {
    let Some(key) = request.analysis_components.first() else {
        error!(
            eval_id = request.eval_id,
            "dispatch: no analysis_components in evaluation request"
        );
        return Err(DispatchError::MissingIdentity);
    };

    let driver = match registry::resolve(key) {
        Ok(driver) => driver,
        Err(_) => {
            error!(
                eval_id = request.eval_id,
                key = %key,
                "dispatch: identity key not found in registry"
            );
            return Err(DispatchError::UnknownIdentity { key: key.clone() });
        }
    };

    Ok(driver.evaluate(request)?)
}
