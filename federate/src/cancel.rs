use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Lets another thread abandon a federate's blocking waits.
///
/// Clones share one flag. Once cancelled, every wait in progress or started
/// later fails with [`UcefError::WaitCancelled`](ucef_shared::UcefError::WaitCancelled).
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
