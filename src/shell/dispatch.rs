use std::env;
use std::path::PathBuf;

use crate::error::ShellError;
use crate::parser::CommandRecord;
use crate::process::{launcher, ProcessOutcome};

/// What the control loop does after a routed command.
pub(crate) enum DispatchOutcome {
    Continue,
    Exit,
}

pub(crate) trait CommandHandler {
    fn dispatch(&mut self, record: CommandRecord) -> Result<DispatchOutcome, ShellError>;
}

impl CommandHandler for super::Shell {
    /// Routes one parsed record: `exit`, `cd` and `status` are handled in
    /// the shell itself, everything else becomes an external process.
    fn dispatch(&mut self, record: CommandRecord) -> Result<DispatchOutcome, ShellError> {
        match record.args[0].as_str() {
            "exit" => {
                self.jobs.terminate_all();
                Ok(DispatchOutcome::Exit)
            }
            "cd" => {
                self.change_directory(record.args.get(1).map(|s| s.as_str()));
                Ok(DispatchOutcome::Continue)
            }
            "status" => {
                println!("{}", self.last_status);
                Ok(DispatchOutcome::Continue)
            }
            _ => self.run_external(record),
        }
    }
}

impl super::Shell {
    /// `cd` built-in: no argument means the home directory. Failure is
    /// reported and leaves the working directory and last status alone.
    fn change_directory(&self, path: Option<&str>) {
        let target = match path {
            Some(path) => PathBuf::from(path),
            None => match dirs::home_dir() {
                Some(home) => home,
                None => {
                    eprintln!("cd: home directory not found");
                    return;
                }
            },
        };

        if let Err(e) = env::set_current_dir(&target) {
            eprintln!("cd: {}: {}", target.display(), e);
        }
    }

    fn run_external(&mut self, record: CommandRecord) -> Result<DispatchOutcome, ShellError> {
        match launcher::spawn(&record)? {
            ProcessOutcome::Foreground(kind) => self.last_status = kind,
            ProcessOutcome::Background(child) => self.jobs.track(child),
        }
        Ok(DispatchOutcome::Continue)
    }
}
