//! Mutual-exclusion lock scopes.
//!
//! [`lock_scope`] fuses the acquire/release pair of a raw lock into one
//! establishment: acquisition happens as a side effect of construction,
//! release is the guard's drop action, so the two cannot be separated or
//! reordered by a caller. Blocking and spin primitives share the same
//! contract through [`RawMutex`]; they differ only in how they wait.
//!
//! ```
//! use scope_cleanup::{lock_scope, RawLock, RawMutex};
//!
//! static LOCK: RawLock = RawLock::INIT;
//!
//! {
//!     let _held = lock_scope(&LOCK);
//!     assert!(LOCK.is_locked());
//!     // critical section
//! }
//! assert!(!LOCK.is_locked());
//! ```

extern crate std;

use core::sync::atomic::{AtomicBool, Ordering};

use parking_lot::lock_api::GuardSend;
use parking_lot_core::SpinWait;

use crate::Guard;

pub use parking_lot::lock_api::RawMutex;
///Blocking mutual-exclusion primitive, parking the thread while it waits.
pub use parking_lot::RawMutex as RawLock;

///Guard holding a raw lock for the rest of the scope.
pub type LockScope<'a, R> = Guard<&'a R, fn(&'a R)>;

fn release<R: RawMutex>(raw: &R) {
    log::trace!("releasing lock at scope exit");
    // held by the current scope since lock_scope
    unsafe {
        raw.unlock()
    }
}

///Acquires `raw` and arms its release at scope exit.
///
///Blocks until the lock is available; once this returns, the lock is
///held and will be released exactly once when the guard drops, in
///reverse establishment order relative to other guards of the scope.
///There is no timeout and no cancellation of the wait.
pub fn lock_scope<R: RawMutex>(raw: &R) -> LockScope<'_, R> {
    raw.lock();
    log::trace!("lock acquired for scope");
    Guard::new(raw, release::<R> as fn(&R))
}

///Spin-wait mutual-exclusion primitive.
///
///Same contract as [`RawLock`]; waits by spinning on the lock word with
///exponential backoff instead of parking the thread.
pub struct RawSpinLock {
    locked: AtomicBool,
}

impl RawSpinLock {
    ///Creates an unlocked spin lock.
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }
}

unsafe impl RawMutex for RawSpinLock {
    const INIT: Self = Self::new();
    type GuardMarker = GuardSend;

    fn lock(&self) {
        let mut spinwait = SpinWait::new();
        while !self.try_lock() {
            // spin on a relaxed read between CAS attempts
            while self.locked.load(Ordering::Relaxed) {
                if !spinwait.spin() {
                    spinwait.reset();
                    std::thread::yield_now();
                }
            }
        }
    }

    fn try_lock(&self) -> bool {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_ok()
    }

    unsafe fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }
}
