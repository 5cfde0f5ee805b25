use std::ffi::CString;
use std::io::{self, Write};
use std::ptr;

use log::{debug, trace};

use super::{
    signal, Launcher, ProcessError, ProcessHandle, WaitOutcome, EXIT_NOT_EXECUTABLE,
    EXIT_NOT_FOUND,
};

/// Runs programs with fork and execvp.
#[derive(Debug, Default, Clone, Copy)]
pub struct ForkExecLauncher;

impl ForkExecLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Launcher for ForkExecLauncher {
    fn spawn(&mut self, argv: &[&str]) -> Result<ProcessHandle, ProcessError> {
        let args: Vec<CString> = argv
            .iter()
            .map(|&arg| CString::new(arg))
            .collect::<Result<_, _>>()
            .map_err(|_| ProcessError::InvalidArgument {
                program: argv.first().copied().unwrap_or_default().to_string(),
            })?;
        let Some(program) = args.first() else {
            return Err(ProcessError::InvalidArgument {
                program: String::new(),
            });
        };

        // execvp wants a null-terminated pointer array
        let mut pointers: Vec<*const libc::c_char> = args.iter().map(|a| a.as_ptr()).collect();
        pointers.push(ptr::null());

        // The child must not allocate, so its failure message is built here.
        let failure_prefix = format!("shale: {}: ", argv[0]);

        // Anything still buffered would be written twice after the fork.
        let _ = io::stdout().flush();
        let _ = io::stderr().flush();

        match unsafe { libc::fork() } {
            -1 => Err(ProcessError::ForkFailed(io::Error::last_os_error())),
            0 => {
                signal::restore_child_exits();
                unsafe { libc::execvp(program.as_ptr(), pointers.as_ptr()) };

                let errno = io::Error::last_os_error().raw_os_error().unwrap_or(0);
                report_in_child(failure_prefix.as_bytes(), errno);
                let code = match errno {
                    libc::ENOENT => EXIT_NOT_FOUND,
                    _ => EXIT_NOT_EXECUTABLE,
                };
                unsafe { libc::_exit(code) }
            }
            pid => {
                debug!("spawned {} as pid {}", argv[0], pid);
                Ok(ProcessHandle::new(pid))
            }
        }
    }

    fn wait(&mut self, handle: ProcessHandle) -> Result<WaitOutcome, ProcessError> {
        let mut status: libc::c_int = 0;

        loop {
            let rc = unsafe { libc::waitpid(handle.pid(), &mut status, 0) };
            if rc == handle.pid() {
                return Ok(decode_status(status));
            }

            let err = io::Error::last_os_error();
            match err.raw_os_error() {
                Some(libc::EINTR) => continue,
                // SIGCHLD is ignored, so the kernel may have reaped it already
                Some(libc::ECHILD) => {
                    trace!("pid {} reaped by the kernel", handle);
                    return Ok(WaitOutcome::Reaped);
                }
                _ => {
                    return Err(ProcessError::Wait {
                        pid: handle.pid(),
                        source: err,
                    })
                }
            }
        }
    }
}

/// Writes `prefix`, the text for `errno` and a newline straight to fd 2.
/// Runs between fork and exec, so it neither allocates nor takes locks.
fn report_in_child(prefix: &[u8], errno: libc::c_int) {
    let mut buf = [0u8; 128];
    let text = describe_errno(errno, &mut buf);

    for chunk in [prefix, text, &b"\n"[..]] {
        unsafe {
            libc::write(
                libc::STDERR_FILENO,
                chunk.as_ptr().cast::<libc::c_void>(),
                chunk.len(),
            );
        }
    }
}

/// The system's text for `errno`, formatted into `buf`. Empty when the
/// number is unknown or the text does not fit.
fn describe_errno(errno: libc::c_int, buf: &mut [u8]) -> &[u8] {
    let rc = unsafe { libc::strerror_r(errno, buf.as_mut_ptr().cast::<libc::c_char>(), buf.len()) };
    if rc != 0 {
        return &[];
    }
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    &buf[..end]
}

fn decode_status(status: libc::c_int) -> WaitOutcome {
    if libc::WIFEXITED(status) {
        WaitOutcome::Exited(libc::WEXITSTATUS(status))
    } else if libc::WIFSIGNALED(status) {
        WaitOutcome::Signaled(libc::WTERMSIG(status))
    } else {
        WaitOutcome::Reaped
    }
}
