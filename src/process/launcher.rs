use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Child, Command};

use super::{redirect, signal, ExitKind, ProcessError};
use crate::parser::CommandRecord;

/// Result of launching one external command.
pub enum ProcessOutcome {
    /// The command ran in the foreground (or failed to start); the tagged
    /// status becomes the shell's last exit status.
    Foreground(ExitKind),
    /// The command is running unattended. The handle must be handed to
    /// the job table; nothing else may hold it.
    Background(Child),
}

/// Spawns the record's program with its redirections and the signal
/// dispositions appropriate to foreground or background execution.
///
/// Redirection and lookup failures are reported here and surface as a
/// foreground exit status of 1, leaving the shell running. An `Err` is
/// only returned for process-creation failures the shell cannot recover
/// from.
pub fn spawn(record: &CommandRecord) -> Result<ProcessOutcome, ProcessError> {
    let background = record.background;

    let redirection = match redirect::open(record) {
        Ok(redirection) => redirection,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ProcessOutcome::Foreground(ExitKind::Code(1)));
        }
    };

    let mut command = Command::new(&record.args[0]);
    command.args(&record.args[1..]);
    redirection.apply(&mut command);
    unsafe {
        command.pre_exec(move || signal::reset_child_dispositions(background));
    }

    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            eprintln!("smolsh: command not found: {}", record.args[0]);
            return Ok(ProcessOutcome::Foreground(ExitKind::Code(1)));
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            eprintln!("smolsh: {}: {}", record.args[0], e);
            return Ok(ProcessOutcome::Foreground(ExitKind::Code(1)));
        }
        Err(e) => return Err(ProcessError::Spawn(e)),
    };

    if background {
        println!("background pid is {}", child.id());
        return Ok(ProcessOutcome::Background(child));
    }

    let status = child.wait().map_err(ProcessError::Wait)?;
    let kind = ExitKind::from_status(status);
    if let ExitKind::Signal(_) = kind {
        println!("{}", kind);
    }
    Ok(ProcessOutcome::Foreground(kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn record(args: &[&str]) -> CommandRecord {
        CommandRecord {
            args: args.iter().map(|s| s.to_string()).collect(),
            input_file: None,
            output_file: None,
            background: false,
        }
    }

    fn scratch_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("smolsh_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_foreground_exit_code_is_recorded() {
        let outcome = spawn(&record(&["sh", "-c", "exit 7"])).unwrap();
        assert!(matches!(
            outcome,
            ProcessOutcome::Foreground(ExitKind::Code(7))
        ));
    }

    #[test]
    fn test_missing_executable_yields_status_one() {
        let outcome = spawn(&record(&["smolsh-no-such-program"])).unwrap();
        assert!(matches!(
            outcome,
            ProcessOutcome::Foreground(ExitKind::Code(1))
        ));
    }

    #[test]
    fn test_missing_input_file_yields_status_one() {
        let mut cmd = record(&["cat"]);
        cmd.input_file = Some("/nonexistent/input/file".to_string());
        let outcome = spawn(&cmd).unwrap();
        assert!(matches!(
            outcome,
            ProcessOutcome::Foreground(ExitKind::Code(1))
        ));
    }

    #[test]
    fn test_signal_death_is_tagged_with_the_signal() {
        let outcome = spawn(&record(&["sh", "-c", "kill -TERM $$"])).unwrap();
        match outcome {
            ProcessOutcome::Foreground(kind) => {
                assert_eq!(kind, ExitKind::Signal(libc::SIGTERM))
            }
            ProcessOutcome::Background(_) => panic!("expected a foreground outcome"),
        }
    }

    #[test]
    fn test_output_then_input_redirection() {
        let data = scratch_path("echo_out");
        let copy = scratch_path("cat_out");

        let mut write = record(&["echo", "hello"]);
        write.output_file = Some(data.to_str().unwrap().to_string());
        let outcome = spawn(&write).unwrap();
        assert!(matches!(
            outcome,
            ProcessOutcome::Foreground(ExitKind::Code(0))
        ));

        let mut read = record(&["cat"]);
        read.input_file = Some(data.to_str().unwrap().to_string());
        read.output_file = Some(copy.to_str().unwrap().to_string());
        let outcome = spawn(&read).unwrap();
        assert!(matches!(
            outcome,
            ProcessOutcome::Foreground(ExitKind::Code(0))
        ));

        assert_eq!(fs::read_to_string(&copy).unwrap(), "hello\n");
        fs::remove_file(&data).unwrap();
        fs::remove_file(&copy).unwrap();
    }

    #[test]
    fn test_output_redirection_truncates_previous_content() {
        let path = scratch_path("truncated");
        fs::write(&path, "previous contents that should disappear").unwrap();

        let mut cmd = record(&["echo", "hi"]);
        cmd.output_file = Some(path.to_str().unwrap().to_string());
        spawn(&cmd).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hi\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_background_command_returns_a_handle() {
        let mut cmd = record(&["sleep", "0"]);
        cmd.background = true;
        match spawn(&cmd).unwrap() {
            ProcessOutcome::Background(mut child) => {
                child.wait().unwrap();
            }
            ProcessOutcome::Foreground(_) => panic!("expected a background outcome"),
        }
    }
}
