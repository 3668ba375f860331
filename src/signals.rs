//! Termination signal handling.
//!
//! SIGINT and SIGTERM set an atomic flag instead of killing the process, so
//! the event loop can observe the interrupted read and unwind through the
//! normal shutdown path with every device handle released. The handlers are
//! installed without `SA_RESTART`, so a blocking read on the leader returns
//! `EINTR` when a signal arrives.

use std::io;
use std::mem;
use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set from the signal handler once termination has been requested.
static TERMINATION_REQUESTED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_termination_signal(_signal: libc::c_int) {
    // Async-signal-safe: a single atomic store.
    TERMINATION_REQUESTED.store(true, Ordering::SeqCst);
}

/// Check whether a termination signal has been received.
pub fn termination_requested() -> bool {
    TERMINATION_REQUESTED.load(Ordering::SeqCst)
}

/// Install the SIGINT/SIGTERM handlers. Call once, before the event loop.
pub fn install() -> io::Result<()> {
    let handler =
        on_termination_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;

    unsafe {
        let mut action: libc::sigaction = mem::zeroed();
        action.sa_sigaction = handler;
        libc::sigemptyset(&mut action.sa_mask);
        // sa_flags stays 0: no SA_RESTART, blocking reads must see EINTR.

        for signal in [libc::SIGINT, libc::SIGTERM] {
            if libc::sigaction(signal, &action, ptr::null_mut()) != 0 {
                return Err(io::Error::last_os_error());
            }
        }
    }

    Ok(())
}
