use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{GeneratorError, Result};

/// Cooperative cancellation shared between the host and a generation pass.
///
/// Clones observe the same flag. Generation polls it once per member.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// `Err(Cancelled)` once the host gave up.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(GeneratorError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let observer = token.clone();
        assert!(observer.check().is_ok());

        token.cancel();
        assert!(observer.is_cancelled());
        assert!(matches!(observer.check(), Err(GeneratorError::Cancelled)));
    }
}
