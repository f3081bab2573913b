use crate::boundary::eval::Driver;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock, Mutex, PoisonError, Weak};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum RegistryError {
    #[error("Identity key '{key}' does not resolve to a live driver")]
    NotFound { key: String },
}

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

static DRIVERS: LazyLock<Mutex<HashMap<String, Weak<dyn Driver>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

fn drivers() -> std::sync::MutexGuard<'static, HashMap<String, Weak<dyn Driver>>> {
    DRIVERS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registers a driver in the process-wide identity registry and returns its
/// freshly minted key.
///
/// Keys are derived from a process-global counter at registration time, so
/// they are unique for the process lifetime and opaque outside it. Only a
/// weak reference is stored: the registry never extends a driver's lifetime,
/// and entries expire on their own once the owning strong reference(s) are
/// released. There is no unregister operation.
pub fn register(driver: &Arc<dyn Driver>) -> String {
    let key = NEXT_KEY.fetch_add(1, Ordering::Relaxed).to_string();
    drivers().insert(key.clone(), Arc::downgrade(driver));
    key
}

/// Resolves an identity key back to its live driver.
///
/// # Errors
///
/// Returns [`RegistryError::NotFound`] if the key was never registered or
/// its driver has since been reclaimed — never a stale reference.
pub fn resolve(key: &str) -> Result<Arc<dyn Driver>, RegistryError> {
    drivers()
        .get(key)
        .and_then(Weak::upgrade)
        .ok_or_else(|| RegistryError::NotFound {
            key: key.to_string(),
        })
}
