//! Bounded execution of helper commands.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Run `program args..` and capture its output, killing it after `limit`.
///
/// Blocking: strategies call this from their worker thread, so the child
/// is driven on a small current-thread runtime of its own. Must not be
/// called from inside an async context.
///
/// Returns stdout, or stderr when stdout is empty (tesseract writes some
/// listings to stderr). Returns `None` if the program cannot be started,
/// exits unsuccessfully, or runs past the timeout.
pub(crate) fn output_with_timeout(program: &Path, args: &[&str], limit: Duration) -> Option<String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| tracing::debug!(error = %e, "failed to build command runtime"))
        .ok()?;

    let output = runtime
        .block_on(async {
            timeout(
                limit,
                Command::new(program)
                    .args(args)
                    .stdin(Stdio::null())
                    .kill_on_drop(true)
                    .output(),
            )
            .await
        })
        .map_err(|_| tracing::debug!(program = %program.display(), ?limit, "command timed out"))
        .ok()?
        .map_err(|e| tracing::debug!(program = %program.display(), error = %e, "failed to run"))
        .ok()?;

    if !output.status.success() {
        return None;
    }

    // Try stdout first, fall back to stderr
    let out = if !output.stdout.is_empty() {
        output.stdout
    } else {
        output.stderr
    };
    Some(String::from_utf8_lossy(&out).into_owned())
}
