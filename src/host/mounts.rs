//! Drive enumeration with bounded availability checks.

use super::MountEnumerator;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Enumerates the real drive letters.
///
/// On Windows this lists `C:\` through `Z:\`; every other platform has no
/// drive roots.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemMounts;

impl MountEnumerator for SystemMounts {
    fn drive_roots(&self) -> Vec<PathBuf> {
        if cfg!(windows) {
            ('C'..='Z').map(|letter| PathBuf::from(format!("{letter}:\\"))).collect()
        } else {
            Vec::new()
        }
    }

    fn is_responsive(&self, root: &Path, timeout: Duration) -> bool {
        exists_within(root, timeout)
    }
}

/// No drives at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMounts;

impl MountEnumerator for NoMounts {
    fn drive_roots(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    fn is_responsive(&self, _root: &Path, _timeout: Duration) -> bool {
        false
    }
}

/// Check that `path` exists, giving up after `timeout`.
///
/// The check runs on a helper thread; a disconnected network drive can
/// block `stat` far longer than any caller wants to wait. A thread that
/// outlives the timeout is left to finish on its own.
pub(crate) fn exists_within(path: &Path, timeout: Duration) -> bool {
    let (tx, rx) = mpsc::channel();
    let owned = path.to_path_buf();
    let spawned = thread::Builder::new()
        .name("drive-check".to_string())
        .spawn(move || {
            let _ = tx.send(owned.exists());
        });

    if spawned.is_err() {
        return false;
    }

    match rx.recv_timeout(timeout) {
        Ok(exists) => exists,
        Err(_) => {
            tracing::warn!(path = %path.display(), ?timeout, "drive did not respond, skipping");
            false
        }
    }
}
