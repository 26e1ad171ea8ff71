//! Registry of signing methods
//!
//! Maps the `alg` header value to a factory producing the method. A parser
//! owns an `Arc<Registry>`, so tests and embedders can build isolated
//! registries; [`global`] is a process-wide instance for callers that prefer
//! registering methods once at startup.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, PoisonError, RwLock};

use crate::algorithm::{Aes128, Hs256, SigningMethod};

/// Factory producing a signing method instance
pub type MethodFactory = Arc<dyn Fn() -> Arc<dyn SigningMethod> + Send + Sync + 'static>;

static GLOBAL: LazyLock<Arc<Registry>> = LazyLock::new(|| Arc::new(Registry::with_defaults()));

/// `alg` identifier to signing method mapping
///
/// Resolution takes a read lock and may run concurrently; registration takes
/// the write lock.
#[derive(Default)]
pub struct Registry {
    methods: RwLock<HashMap<String, MethodFactory>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in methods (`AES128`, `HS256`)
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Aes128::ALG, || Arc::new(Aes128));
        registry.register(Hs256::ALG, || Arc::new(Hs256));
        registry
    }

    /// Register a factory for an `alg` identifier
    ///
    /// A later registration for the same identifier replaces the earlier one.
    pub fn register<F>(&self, alg: impl Into<String>, factory: F)
    where
        F: Fn() -> Arc<dyn SigningMethod> + Send + Sync + 'static,
    {
        let alg = alg.into();
        tracing::debug!(alg = %alg, "registering signing method");
        self.methods
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(alg, Arc::new(factory));
    }

    /// Resolve an `alg` identifier to a method instance
    ///
    /// Returns `None` when nothing is registered under `alg`.
    pub fn resolve(&self, alg: &str) -> Option<Arc<dyn SigningMethod>> {
        let factory = self
            .methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(alg)
            .cloned()?;
        Some(factory())
    }

    /// Check if an `alg` identifier is registered
    pub fn contains(&self, alg: &str) -> bool {
        self.methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(alg)
    }

    /// Registered identifiers, sorted
    pub fn algorithms(&self) -> Vec<String> {
        let mut algorithms: Vec<String> = self
            .methods
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        algorithms.sort();
        algorithms
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("algorithms", &self.algorithms())
            .finish()
    }
}

/// The process-wide registry, pre-populated with the built-in methods
pub fn global() -> Arc<Registry> {
    Arc::clone(&GLOBAL)
}

/// Register a factory in the process-wide registry
pub fn register_signing_method<F>(alg: impl Into<String>, factory: F)
where
    F: Fn() -> Arc<dyn SigningMethod> + Send + Sync + 'static,
{
    GLOBAL.register(alg, factory);
}

/// Resolve an `alg` identifier against the process-wide registry
pub fn get_signing_method(alg: &str) -> Option<Arc<dyn SigningMethod>> {
    GLOBAL.resolve(alg)
}
