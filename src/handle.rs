//! Auto-closing handle guards.
//!
//! Acquisition failure is a normal value here, not an error of the
//! guard: a failed acquisition arms a guard over an absent handle and
//! the release action skips it, so establishment is safe to use
//! unconditionally.
//!
//! ```
//! use scope_cleanup::open_file;
//!
//! {
//!     let file = open_file("Cargo.toml");
//!     assert!(file.is_some());
//!     // handle is closed at the end of this scope
//! }
//!
//! let missing = open_file("no/such/file");
//! assert!(missing.is_none());
//! ```

extern crate std;

use std::fs::File;
use std::io;
use std::path::Path;

use crate::Guard;

///Guard over a possibly-absent file handle, closed at scope exit.
pub type FileGuard = Guard<Option<File>, fn(Option<File>)>;

fn close_file(file: Option<File>) {
    if let Some(file) = file {
        log::debug!("closing guarded file handle");
        drop(file);
    }
}

///Arms a close-at-scope-exit guard over the result of a file acquisition.
///
///On acquisition failure the error is logged and the guard holds no
///handle, making the close action a no-op. The scope body reaches the
///handle as `Option<File>` through `Deref`.
pub fn auto_close(acquired: io::Result<File>) -> FileGuard {
    let file = match acquired {
        Ok(file) => Some(file),
        Err(error) => {
            log::warn!("file acquisition failed: {}", error);
            None
        }
    };
    Guard::new(file, close_file as fn(Option<File>))
}

///Opens `path` for reading and arms the close guard in one step.
pub fn open_file<P: AsRef<Path>>(path: P) -> FileGuard {
    auto_close(File::open(path))
}

///Arms a guard releasing a handle-like resource at scope exit.
///
///`None` marks an invalid handle; the release action is skipped for it.
///Generalizes [`auto_close`] to any resource with a caller-supplied
///release.
pub fn release_on_exit<H, C: FnOnce(H)>(
    handle: Option<H>,
    release: C,
) -> Guard<Option<H>, impl FnOnce(Option<H>)> {
    Guard::new(handle, move |handle| {
        if let Some(handle) = handle {
            release(handle);
        }
    })
}
