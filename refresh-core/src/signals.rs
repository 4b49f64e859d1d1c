//! Interrupt recording.
//!
//! SIGINT and SIGTERM are recorded instead of terminating the process, so the
//! pipeline can unwind normally and release its workspace. Child processes
//! start with default dispositions because caught signals are reset on exec.
//! `SystemRunner` kills its running child once an interrupt is recorded, so a
//! signal aimed at this process alone still ends a hung command.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{BenchError, Result};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static HANDLER_INSTALLED: AtomicBool = AtomicBool::new(false);

/// Installs the recording handler for SIGINT and SIGTERM.
///
/// Idempotent; only the first call installs anything.
#[cfg(unix)]
pub fn install_interrupt_handler() -> Result<()> {
    use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

    if HANDLER_INSTALLED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }

    extern "C" fn record_interrupt(_: nix::libc::c_int) {
        INTERRUPTED.store(true, Ordering::SeqCst);
    }

    let action = SigAction::new(
        SigHandler::Handler(record_interrupt),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    for signal in [Signal::SIGINT, Signal::SIGTERM] {
        // SAFETY: the handler only stores to an atomic, which is async-signal-safe.
        unsafe { sigaction(signal, &action) }.map_err(|e| {
            BenchError::Io(std::io::Error::other(format!(
                "failed to install {:?} handler: {}",
                signal, e
            )))
        })?;
    }
    Ok(())
}

#[cfg(not(unix))]
pub fn install_interrupt_handler() -> Result<()> {
    HANDLER_INSTALLED.store(true, Ordering::SeqCst);
    Ok(())
}

/// Whether an interrupt has been received since startup.
pub fn interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Returns [`BenchError::Interrupted`] once an interrupt has been received.
pub fn check_interrupted() -> Result<()> {
    if interrupted() {
        Err(BenchError::Interrupted)
    } else {
        Ok(())
    }
}
