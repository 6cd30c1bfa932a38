//! Application state for the Payroll Calculation Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ConfigLoader;
use crate::models::PayResult;

use super::cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL, TtlCache};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers:
/// the loaded payroll rules and the response memo.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll rules.
    config: Arc<ConfigLoader>,
    /// Recently computed results keyed by request body.
    cache: TtlCache<PayResult>,
}

impl AppState {
    /// Creates a new application state with the default cache settings.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_cache(config, DEFAULT_CACHE_TTL, DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a new application state with explicit cache settings.
    ///
    /// A zero `ttl` disables the response memo.
    pub fn with_cache(config: ConfigLoader, ttl: Duration, capacity: usize) -> Self {
        Self {
            config: Arc::new(config),
            cache: TtlCache::new(ttl, capacity),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the response memo.
    pub fn cache(&self) -> &TtlCache<PayResult> {
        &self.cache
    }
}
