// Shared error state owned by the page shell

use std::sync::atomic::{AtomicBool, Ordering};

/// Error-state collaborator consulted by views
pub trait ErrorState: Send + Sync {
    /// True while no collaborator has reported an error
    fn is_ok(&self) -> bool;

    /// Report a failed fetch
    fn set_fetch_error(&self);
}

/// Error flag shared between a page shell and the views it mounts
///
/// Views read `is_ok` before fetching and call `set_fetch_error` when a fetch
/// fails; the shell decides how to present the error.
#[derive(Debug, Default)]
pub struct ErrorContainer {
    fetch_error: AtomicBool,
}

impl ErrorContainer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ErrorState for ErrorContainer {
    fn is_ok(&self) -> bool {
        !self.fetch_error.load(Ordering::Acquire)
    }

    /// Repeated calls have no further effect
    fn set_fetch_error(&self) {
        if !self.fetch_error.swap(true, Ordering::AcqRel) {
            tracing::debug!("Page switched to fetch error state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_container_is_ok() {
        assert!(ErrorContainer::new().is_ok());
    }

    #[test]
    fn test_set_fetch_error_is_idempotent() {
        let err = ErrorContainer::new();
        err.set_fetch_error();
        err.set_fetch_error();
        assert!(!err.is_ok());
    }
}
