use std::env;
use std::ffi::CStr;
use std::io;

use super::{validate, EnvError, Environment, HOME};

const HOST_NAME_MAX: usize = 1024;
const PASSWD_BUF_MAX: usize = 1 << 20;

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEnvironment;

impl OsEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl Environment for OsEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn set_var(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        validate(name, value)?;
        env::set_var(name, value);
        Ok(())
    }

    fn current_dir(&self) -> io::Result<String> {
        Ok(env::current_dir()?.to_string_lossy().into_owned())
    }

    fn set_current_dir(&mut self, path: &str) -> io::Result<()> {
        env::set_current_dir(path)
    }

    // Falls back to the passwd entry when HOME is unset.
    fn home_dir(&self) -> Option<String> {
        self.var(HOME)
            .or_else(|| dirs::home_dir().map(|p| p.to_string_lossy().into_owned()))
    }

    fn user_name(&self) -> Option<String> {
        let uid = unsafe { libc::geteuid() };
        let mut buf: Vec<libc::c_char> = vec![0; 4096];

        loop {
            let mut entry: libc::passwd = unsafe { std::mem::zeroed() };
            let mut result: *mut libc::passwd = std::ptr::null_mut();
            let rc = unsafe {
                libc::getpwuid_r(uid, &mut entry, buf.as_mut_ptr(), buf.len(), &mut result)
            };

            if rc == libc::ERANGE && buf.len() < PASSWD_BUF_MAX {
                buf.resize(buf.len() * 2, 0);
                continue;
            }
            if rc != 0 || result.is_null() || entry.pw_name.is_null() {
                return None;
            }

            let name = unsafe { CStr::from_ptr(entry.pw_name) };
            return Some(name.to_string_lossy().into_owned());
        }
    }

    fn host_name(&self) -> Option<String> {
        let mut buf: [libc::c_char; HOST_NAME_MAX + 1] = [0; HOST_NAME_MAX + 1];
        let rc = unsafe { libc::gethostname(buf.as_mut_ptr(), HOST_NAME_MAX) };
        if rc != 0 {
            return None;
        }

        // gethostname does not promise termination on truncation
        buf[HOST_NAME_MAX] = 0;
        let name = unsafe { CStr::from_ptr(buf.as_ptr()) };
        Some(name.to_string_lossy().into_owned())
    }
}
