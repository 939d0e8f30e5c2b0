//! Router seam. The gate only ever pushes redirects; it never reads location.

use std::sync::{Mutex, PoisonError};

pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}

/// Navigator that records every pushed path, for the CLI and tests.
#[derive(Debug, Default)]
pub struct MemoryNavigator {
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All pushed paths, oldest first.
    #[must_use]
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns the recorded paths.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.history.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Navigator for MemoryNavigator {
    fn push(&self, path: &str) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}

impl<N: Navigator + ?Sized> Navigator for std::sync::Arc<N> {
    fn push(&self, path: &str) {
        (**self).push(path);
    }
}
