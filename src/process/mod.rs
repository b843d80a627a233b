use std::fmt;
use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

pub mod jobs;
pub mod launcher;
pub mod redirect;
pub mod signal;

pub use jobs::JobTable;
pub use launcher::ProcessOutcome;

/// Tagged termination status of a child process, in the form the shell
/// reports it: normal exits carry the exit code, signal deaths carry the
/// signal number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitKind {
    Code(i32),
    Signal(i32),
}

impl ExitKind {
    pub fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ExitKind::Code(code),
            None => ExitKind::Signal(status.signal().unwrap_or(0)),
        }
    }
}

impl fmt::Display for ExitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitKind::Code(code) => write!(f, "exit value {}", code),
            ExitKind::Signal(signo) => write!(f, "terminated by signal {}", signo),
        }
    }
}

#[derive(Debug)]
pub enum ProcessError {
    InputRedirect { path: String, source: std::io::Error },
    OutputRedirect { path: String, source: std::io::Error },
    Spawn(std::io::Error),
    Wait(std::io::Error),
    SignalError(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::InputRedirect { path, source } => {
                write!(f, "cannot open input file {}: {}", path, source)
            }
            ProcessError::OutputRedirect { path, source } => {
                write!(f, "cannot open output file {}: {}", path, source)
            }
            ProcessError::Spawn(e) => write!(f, "failed to create process: {}", e),
            ProcessError::Wait(e) => write!(f, "failed to wait for process: {}", e),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    #[test]
    fn test_exit_kind_display() {
        assert_eq!(ExitKind::Code(0).to_string(), "exit value 0");
        assert_eq!(ExitKind::Code(1).to_string(), "exit value 1");
        assert_eq!(ExitKind::Signal(2).to_string(), "terminated by signal 2");
    }

    #[test]
    fn test_exit_kind_from_normal_exit() {
        let status = Command::new("sh")
            .args(["-c", "exit 3"])
            .status()
            .unwrap();
        assert_eq!(ExitKind::from_status(status), ExitKind::Code(3));
    }

    #[test]
    fn test_exit_kind_from_signal_death() {
        let mut child = Command::new("sleep").arg("30").spawn().unwrap();
        child.kill().unwrap();
        let status = child.wait().unwrap();
        assert_eq!(ExitKind::from_status(status), ExitKind::Signal(libc::SIGKILL));
    }
}
