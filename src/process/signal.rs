use std::io;

use crate::process::ProcessError;

use libc::{signal, SIGCHLD, SIG_DFL, SIG_ERR, SIG_IGN};

/// Lets the kernel reap exited children so background jobs never linger as
/// zombies. Waits on a specific child still block until it terminates.
pub fn ignore_child_exits() -> Result<(), ProcessError> {
    let previous = unsafe { signal(SIGCHLD, SIG_IGN) };
    if previous == SIG_ERR {
        return Err(ProcessError::Signal(io::Error::last_os_error()));
    }
    Ok(())
}

/// Undoes [`ignore_child_exits`]. Run in a forked child before exec, since
/// an ignored disposition survives exec.
pub fn restore_child_exits() {
    unsafe {
        signal(SIGCHLD, SIG_DFL);
    }
}
