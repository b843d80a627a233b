use rustyline::DefaultEditor;

mod dispatch;

use crate::{
    error::ShellError,
    flags::Flags,
    parser,
    process::{signal, ExitKind, JobTable},
};

use dispatch::{CommandHandler, DispatchOutcome};

const PROMPT: &str = ": ";

pub struct Shell {
    pub(crate) editor: DefaultEditor,
    pub(crate) jobs: JobTable,
    pub(crate) last_status: ExitKind,
    pub(crate) flags: Flags,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let editor = DefaultEditor::new()?;

        Ok(Shell {
            editor,
            jobs: JobTable::new(),
            last_status: ExitKind::Code(0),
            flags,
        })
    }

    /// The control loop: reap finished background jobs, show the prompt,
    /// parse, dispatch. Read failures and interrupts retry the loop; the
    /// shell only terminates through the `exit` built-in or an
    /// unrecoverable process-creation fault.
    pub fn run(&mut self) -> Result<(), ShellError> {
        signal::install_shell_handlers()?;

        loop {
            self.jobs.reap_completed();

            let line = match self.editor.readline(PROMPT) {
                Ok(line) => line,
                Err(rustyline::error::ReadlineError::Interrupted) => continue,
                Err(rustyline::error::ReadlineError::Eof) => continue,
                Err(e) => {
                    if !self.flags.is_set("quiet") {
                        eprintln!("Error: {}", e);
                    }
                    continue;
                }
            };

            if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                if !self.flags.is_set("quiet") {
                    eprintln!("Warning: Couldn't add to history: {}", e);
                }
            }

            let mut record = match parser::parse_line(&line) {
                Some(record) => record,
                None => continue,
            };

            // Foreground-only mode strips the background request before
            // routing; running background jobs are unaffected.
            record.background = signal::effective_background(record.background);

            match self.dispatch(record)? {
                DispatchOutcome::Continue => {}
                DispatchOutcome::Exit => return Ok(()),
            }
        }
    }
}
