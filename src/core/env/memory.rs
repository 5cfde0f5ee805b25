use std::collections::{HashMap, HashSet};
use std::io;

use super::{validate, EnvError, Environment};

/// An environment that never touches the OS.
///
/// Directory changes succeed only for paths registered with [`with_dir`],
/// matched byte for byte.
///
/// [`with_dir`]: MemoryEnvironment::with_dir
#[derive(Debug, Clone)]
pub struct MemoryEnvironment {
    vars: HashMap<String, String>,
    cwd: String,
    dirs: HashSet<String>,
    read_only: HashSet<String>,
    user: Option<String>,
    host: Option<String>,
}

impl MemoryEnvironment {
    pub fn new(cwd: &str) -> Self {
        Self {
            vars: HashMap::new(),
            cwd: cwd.to_string(),
            dirs: HashSet::from([cwd.to_string()]),
            read_only: HashSet::new(),
            user: None,
            host: None,
        }
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        self.dirs.insert(path.to_string());
        self
    }

    /// Makes every later `set_var` of `name` fail.
    pub fn with_read_only(mut self, name: &str) -> Self {
        self.read_only.insert(name.to_string());
        self
    }

    pub fn with_user(mut self, user: &str) -> Self {
        self.user = Some(user.to_string());
        self
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = Some(host.to_string());
        self
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }
}

impl Environment for MemoryEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn set_var(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        validate(name, value)?;
        if self.read_only.contains(name) {
            return Err(EnvError::ReadOnly(name.to_string()));
        }
        self.vars.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn current_dir(&self) -> io::Result<String> {
        Ok(self.cwd.clone())
    }

    fn set_current_dir(&mut self, path: &str) -> io::Result<()> {
        if !self.dirs.contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "No such file or directory",
            ));
        }
        self.cwd = path.to_string();
        Ok(())
    }

    fn user_name(&self) -> Option<String> {
        self.user.clone()
    }

    fn host_name(&self) -> Option<String> {
        self.host.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_dir_is_rejected() {
        let mut env = MemoryEnvironment::new("/home/u").with_dir("/tmp");
        assert!(env.set_current_dir("/nope").is_err());
        assert_eq!(env.cwd(), "/home/u");
        assert!(env.set_current_dir("/tmp").is_ok());
        assert_eq!(env.current_dir().unwrap(), "/tmp");
    }

    #[test]
    fn test_read_only_var() {
        let mut env = MemoryEnvironment::new("/").with_read_only("PWD");
        assert!(matches!(
            env.set_var("PWD", "/x"),
            Err(EnvError::ReadOnly(_))
        ));
        assert!(env.set_var("OLDPWD", "/").is_ok());
        assert_eq!(env.var("OLDPWD").as_deref(), Some("/"));
    }
}
