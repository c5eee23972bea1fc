//! The options store abstraction.
//!
//! The store holds the process-wide canonical [`AppOptions`].  It is handed
//! explicitly to every use case instead of being reached through global
//! state, so tests can run against an isolated [`InMemoryOptionsStore`].
//!
//! The store provides no concurrency control of its own; the edit session
//! slot guarantees a single writer.

use thiserror::Error;
use vmping_core::AppOptions;

/// Error returned when a store cannot persist its contents.
#[derive(Debug, Error, PartialEq)]
#[error("persistence failed: {0}")]
pub struct PersistError(pub String);

/// Holds the canonical options.
pub trait OptionsStore {
    /// The current canonical options.
    fn options(&self) -> &AppOptions;

    /// Mutable access for the commit coordinator.
    fn options_mut(&mut self) -> &mut AppOptions;

    /// Persists the current options.  Called once after a commit succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError`] if the backing medium cannot be written.
    fn flush(&mut self) -> Result<(), PersistError> {
        Ok(())
    }
}

/// A store that keeps the options in memory only.
#[derive(Debug, Default, Clone)]
pub struct InMemoryOptionsStore {
    options: AppOptions,
    flushes: usize,
}

impl InMemoryOptionsStore {
    pub fn new(options: AppOptions) -> Self {
        Self {
            options,
            flushes: 0,
        }
    }

    /// Number of successful commits that reached this store.
    pub fn flush_count(&self) -> usize {
        self.flushes
    }
}

impl OptionsStore for InMemoryOptionsStore {
    fn options(&self) -> &AppOptions {
        &self.options
    }

    fn options_mut(&mut self) -> &mut AppOptions {
        &mut self.options
    }

    fn flush(&mut self) -> Result<(), PersistError> {
        self.flushes += 1;
        Ok(())
    }
}
