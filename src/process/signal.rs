use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::SIGTSTP;

use super::ProcessError;

static FOREGROUND_ONLY: AtomicBool = AtomicBool::new(false);

const ENTER_NOTICE: &[u8] = b"\nEntering foreground-only mode (& is now ignored)\n";
const EXIT_NOTICE: &[u8] = b"\nExiting foreground-only mode\n";

/// Whether SIGTSTP has put the shell in foreground-only mode. Toggled
/// only from the signal handler; read before every dispatch.
pub fn foreground_only() -> bool {
    FOREGROUND_ONLY.load(Ordering::SeqCst)
}

/// Whether a command requesting background execution actually runs in
/// the background, given the current foreground-only mode.
pub fn effective_background(requested: bool) -> bool {
    requested && !foreground_only()
}

fn toggle_foreground_only() {
    let was_active = FOREGROUND_ONLY.fetch_xor(true, Ordering::SeqCst);
    let notice = if was_active { EXIT_NOTICE } else { ENTER_NOTICE };
    // Signal context: no buffered I/O, no allocation. Write the notice
    // straight to the stdout descriptor.
    unsafe {
        libc::write(
            libc::STDOUT_FILENO,
            notice.as_ptr() as *const libc::c_void,
            notice.len(),
        );
    }
}

/// Installs the shell-level handlers: SIGTSTP toggles foreground-only
/// mode, SIGINT is absorbed so Ctrl-C only ever reaches the foreground
/// child.
pub fn install_shell_handlers() -> Result<(), ProcessError> {
    unsafe {
        signal_hook::low_level::register(SIGTSTP, toggle_foreground_only)
            .map_err(|e| ProcessError::SignalError(e.to_string()))?;
    }

    ctrlc::set_handler(|| {
        // Do nothing, let the foreground child handle the signal
    })
    .map_err(|e| ProcessError::SignalError(e.to_string()))?;

    Ok(())
}

/// Resets signal dispositions between fork and exec. Children always
/// ignore SIGTSTP; SIGINT returns to its default terminating behavior
/// only in foreground children, so background jobs ride out Ctrl-C.
pub(crate) fn reset_child_dispositions(background: bool) -> io::Result<()> {
    unsafe {
        if libc::signal(libc::SIGTSTP, libc::SIG_IGN) == libc::SIG_ERR {
            return Err(io::Error::last_os_error());
        }
        let interrupt = if background { libc::SIG_IGN } else { libc::SIG_DFL };
        if libc::signal(libc::SIGINT, interrupt) == libc::SIG_ERR {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigtstp_toggles_background_suppression() {
        install_shell_handlers().unwrap();
        assert!(!foreground_only());
        assert!(effective_background(true));

        signal_hook::low_level::raise(SIGTSTP).unwrap();
        assert!(foreground_only());
        assert!(!effective_background(true));

        signal_hook::low_level::raise(SIGTSTP).unwrap();
        assert!(!foreground_only());
        assert!(effective_background(true));
        assert!(!effective_background(false));
    }
}
