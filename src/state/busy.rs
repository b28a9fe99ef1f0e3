use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// In-flight flag a view can hold on to while the owning state is busy.
///
/// Clones share the flag, so a renderer keeps reading it while a `&mut`
/// operation on the state is still pending.
#[derive(Debug, Clone, Default)]
pub struct Busy(Arc<AtomicBool>);

impl Busy {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Set the flag until the returned guard is dropped, including when the
    /// request future is dropped before completing.
    pub(crate) fn start(&self) -> BusyGuard {
        self.0.store(true, Ordering::SeqCst);
        BusyGuard(self.0.clone())
    }
}

pub(crate) struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
