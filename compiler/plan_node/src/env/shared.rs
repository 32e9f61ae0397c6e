use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};

use super::Environment;
use crate::config::EnvConfig;

/// Lockable environment handle for use from several threads.
///
/// Every operation that builds or rewrites nodes needs `&mut Environment`,
/// so sharing goes through a mutex. Lock once per batch of work rather than
/// per node.
#[derive(Clone)]
pub struct SharedEnvironment(Arc<Mutex<Environment>>);

impl SharedEnvironment {
    pub fn new() -> Self {
        Self::from(Environment::new())
    }

    pub fn with_config(config: EnvConfig) -> Self {
        Self::from(Environment::with_config(config))
    }

    /// Block until the environment is free and take exclusive access.
    pub fn lock(&self) -> MutexGuard<'_, Environment> {
        self.0.lock()
    }

    /// Take exclusive access if nobody else holds it.
    pub fn try_lock(&self) -> Option<MutexGuard<'_, Environment>> {
        self.0.try_lock()
    }
}

impl From<Environment> for SharedEnvironment {
    fn from(env: Environment) -> Self {
        SharedEnvironment(Arc::new(Mutex::new(env)))
    }
}

impl Default for SharedEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SharedEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0.try_lock() {
            Some(env) => f.debug_tuple("SharedEnvironment").field(&env.id()).finish(),
            None => f.write_str("SharedEnvironment(<locked>)"),
        }
    }
}
