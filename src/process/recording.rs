use std::collections::VecDeque;

use super::{Launcher, ProcessError, ProcessHandle, WaitOutcome};

/// One call to [`RecordingLauncher::spawn`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawned {
    pub argv: Vec<String>,
    pub pid: i32,
    pub waited: bool,
}

/// A launcher that creates no processes and remembers what it was asked.
#[derive(Debug)]
pub struct RecordingLauncher {
    next_pid: i32,
    spawned: Vec<Spawned>,
    outcomes: VecDeque<WaitOutcome>,
    fail_fork: bool,
}

impl Default for RecordingLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self {
            next_pid: 1000,
            spawned: Vec::new(),
            outcomes: VecDeque::new(),
            fail_fork: false,
        }
    }

    /// Every spawn fails the way an exhausted process table would.
    pub fn failing_fork(mut self) -> Self {
        self.fail_fork = true;
        self
    }

    /// Queues the outcome returned by the next `wait`.
    pub fn with_outcome(mut self, outcome: WaitOutcome) -> Self {
        self.outcomes.push_back(outcome);
        self
    }

    pub fn spawned(&self) -> &[Spawned] {
        &self.spawned
    }
}

impl Launcher for RecordingLauncher {
    fn spawn(&mut self, argv: &[&str]) -> Result<ProcessHandle, ProcessError> {
        if self.fail_fork {
            return Err(ProcessError::ForkFailed(std::io::Error::from_raw_os_error(
                libc::EAGAIN,
            )));
        }
        if argv.iter().any(|a| a.contains('\0')) {
            return Err(ProcessError::InvalidArgument {
                program: argv.first().copied().unwrap_or_default().to_string(),
            });
        }

        let pid = self.next_pid;
        self.next_pid += 1;
        self.spawned.push(Spawned {
            argv: argv.iter().map(|a| a.to_string()).collect(),
            pid,
            waited: false,
        });
        Ok(ProcessHandle::new(pid))
    }

    fn wait(&mut self, handle: ProcessHandle) -> Result<WaitOutcome, ProcessError> {
        let Some(entry) = self.spawned.iter_mut().find(|s| s.pid == handle.pid()) else {
            return Err(ProcessError::Wait {
                pid: handle.pid(),
                source: std::io::Error::from_raw_os_error(libc::ECHILD),
            });
        };
        entry.waited = true;
        Ok(self.outcomes.pop_front().unwrap_or(WaitOutcome::Exited(0)))
    }
}
