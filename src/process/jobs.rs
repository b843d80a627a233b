use std::process::Child;

use super::ExitKind;

/// Outstanding background children. Only ever touched from the control
/// loop thread, so the table needs no locking; completion is observed by
/// one non-blocking scan per dispatch cycle.
#[derive(Default)]
pub struct JobTable {
    jobs: Vec<Child>,
}

impl JobTable {
    pub fn new() -> Self {
        JobTable { jobs: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Takes ownership of a background child for later reaping.
    pub fn track(&mut self, child: Child) {
        self.jobs.push(child);
    }

    /// One non-blocking pass over the table in tracking order. Each
    /// completed job is reported exactly once and dropped; jobs still
    /// running stay put.
    pub fn reap_completed(&mut self) {
        self.jobs.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                println!(
                    "background pid {} is done: {}",
                    child.id(),
                    ExitKind::from_status(status)
                );
                false
            }
            Ok(None) => true,
            Err(e) => {
                eprintln!("failed to poll background pid {}: {}", child.id(), e);
                false
            }
        });
    }

    /// Sends SIGTERM to every tracked job without waiting for it to land.
    /// Used on shell exit, which follows immediately.
    pub fn terminate_all(&mut self) {
        for child in &self.jobs {
            unsafe {
                libc::kill(child.id() as libc::pid_t, libc::SIGTERM);
            }
        }
        self.jobs.clear();
    }
}
