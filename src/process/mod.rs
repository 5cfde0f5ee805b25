use std::fmt;
use std::io;

use thiserror::Error;

pub mod executor;
mod recording;
pub mod signal;

pub use executor::ForkExecLauncher;
pub use recording::{RecordingLauncher, Spawned};

/// Exit status of a child whose image could not be found.
pub const EXIT_NOT_FOUND: i32 = 127;
/// Exit status of a child whose image was found but could not run.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("{program}: argument contains a NUL byte")]
    InvalidArgument { program: String },
    #[error("fork failed: {0}")]
    ForkFailed(#[source] io::Error),
    #[error("wait for pid {pid} failed: {source}")]
    Wait {
        pid: i32,
        #[source]
        source: io::Error,
    },
    #[error("signal setup failed: {0}")]
    Signal(#[source] io::Error),
}

impl ProcessError {
    /// Errors the shell cannot continue after.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessError::ForkFailed(_) | ProcessError::Signal(_))
    }
}

/// A created child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessHandle {
    pid: i32,
}

impl ProcessHandle {
    pub fn new(pid: i32) -> Self {
        Self { pid }
    }

    pub fn pid(&self) -> i32 {
        self.pid
    }
}

impl fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pid)
    }
}

/// How a waited-on child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Exited(i32),
    Signaled(i32),
    /// Reaped by the kernel before its status could be collected.
    Reaped,
}

/// Spawn a program, get a handle, then wait on it or let it go.
pub trait Launcher {
    /// `argv[0]` names the program and is looked up on `PATH`.
    fn spawn(&mut self, argv: &[&str]) -> Result<ProcessHandle, ProcessError>;

    /// Blocks until the child behind `handle` terminates.
    fn wait(&mut self, handle: ProcessHandle) -> Result<WaitOutcome, ProcessError>;
}
