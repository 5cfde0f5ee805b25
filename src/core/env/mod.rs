mod memory;
mod os;

pub use memory::MemoryEnvironment;
pub use os::OsEnvironment;

use std::io;

use thiserror::Error;

pub const HOME: &str = "HOME";
pub const PWD: &str = "PWD";
pub const OLDPWD: &str = "OLDPWD";

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("invalid variable name: {0:?}")]
    InvalidName(String),
    #[error("invalid value for {name}: {reason}")]
    InvalidValue { name: String, reason: &'static str },
    #[error("{0}: readonly variable")]
    ReadOnly(String),
}

/// Process-wide state the shell reads and mutates.
///
/// Everything that touches `HOME`, `PWD`, `OLDPWD` or the working directory
/// goes through this trait, so the loop and `cd` can run against an
/// in-memory stand-in.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;

    fn set_var(&mut self, name: &str, value: &str) -> Result<(), EnvError>;

    fn current_dir(&self) -> io::Result<String>;

    fn set_current_dir(&mut self, path: &str) -> io::Result<()>;

    fn home_dir(&self) -> Option<String> {
        self.var(HOME)
    }

    fn user_name(&self) -> Option<String>;

    fn host_name(&self) -> Option<String>;
}

/// Rejects names and values the OS environment block cannot represent.
pub(crate) fn validate(name: &str, value: &str) -> Result<(), EnvError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(EnvError::InvalidName(name.to_string()));
    }
    if value.contains('\0') {
        return Err(EnvError::InvalidValue {
            name: name.to_string(),
            reason: "contains a NUL byte",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(validate("PWD", "/tmp").is_ok());
        assert!(matches!(validate("", "x"), Err(EnvError::InvalidName(_))));
        assert!(matches!(validate("A=B", "x"), Err(EnvError::InvalidName(_))));
        assert!(matches!(
            validate("PWD", "/t\0mp"),
            Err(EnvError::InvalidValue { .. })
        ));
    }
}
