use std::fs::{File, OpenOptions};
use std::os::unix::fs::OpenOptionsExt;
use std::process::{Command, Stdio};

use super::ProcessError;
use crate::parser::CommandRecord;

const OUTPUT_MODE: u32 = 0o644;

/// File handles destined for a child's standard streams. Ownership moves
/// into the spawned child; the parent keeps nothing open.
pub struct Redirection {
    stdin: Option<File>,
    stdout: Option<File>,
}

/// Opens the record's redirection targets: input read-only, output
/// write-only with create/truncate semantics. Either failure aborts only
/// the command being launched, never the shell.
pub fn open(record: &CommandRecord) -> Result<Redirection, ProcessError> {
    let stdin = match &record.input_file {
        Some(path) => Some(File::open(path).map_err(|source| ProcessError::InputRedirect {
            path: path.clone(),
            source,
        })?),
        None => None,
    };

    let stdout = match &record.output_file {
        Some(path) => Some(
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(OUTPUT_MODE)
                .open(path)
                .map_err(|source| ProcessError::OutputRedirect {
                    path: path.clone(),
                    source,
                })?,
        ),
        None => None,
    };

    Ok(Redirection { stdin, stdout })
}

impl Redirection {
    /// Rebinds the command's standard streams to the opened files.
    /// Streams without a target keep the shell's own descriptors.
    pub fn apply(self, command: &mut Command) {
        if let Some(file) = self.stdin {
            command.stdin(Stdio::from(file));
        }
        if let Some(file) = self.stdout {
            command.stdout(Stdio::from(file));
        }
    }
}
