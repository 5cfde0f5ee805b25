use log::LevelFilter;

use crate::core::env::Environment;
use crate::flags::Flags;
use crate::input::tokenizer::DEFAULT_CAPACITY;
use crate::path::PATH_MAX;

/// Variable holding the log level, e.g. `SHALE_LOG=debug`.
pub const LOG_ENV: &str = "SHALE_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: LevelFilter,
    pub plain_prompt: bool,
    /// Slots per token sequence, sentinel included.
    pub token_capacity: usize,
    /// Longest `cd` argument and assembled path, in bytes.
    pub path_max: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LevelFilter::Warn,
            plain_prompt: false,
            token_capacity: DEFAULT_CAPACITY,
            path_max: PATH_MAX,
        }
    }
}

impl Config {
    pub fn new(flags: &Flags, env: &dyn Environment) -> Self {
        let mut config = Self::default();

        if let Some(level) = env.var(LOG_ENV) {
            match level.parse::<LevelFilter>() {
                Ok(level) => config.log_level = level,
                Err(_) => eprintln!("shale: ignoring invalid {}={}", LOG_ENV, level),
            }
        }
        if flags.is_set("debug") {
            config.log_level = config.log_level.max(LevelFilter::Debug);
        }
        config.plain_prompt = flags.is_set("plain");

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::MemoryEnvironment;

    #[test]
    fn test_defaults() {
        let config = Config::new(&Flags::new(), &MemoryEnvironment::new("/"));
        assert_eq!(config, Config::default());
        assert_eq!(config.token_capacity, 2048);
        assert_eq!(config.path_max, 4096);
    }

    #[test]
    fn test_log_level_from_env() {
        let env = MemoryEnvironment::new("/").with_var(LOG_ENV, "trace");
        let config = Config::new(&Flags::new(), &env);
        assert_eq!(config.log_level, LevelFilter::Trace);
    }

    #[test]
    fn test_invalid_log_level_is_ignored() {
        let env = MemoryEnvironment::new("/").with_var(LOG_ENV, "loud");
        let config = Config::new(&Flags::new(), &env);
        assert_eq!(config.log_level, LevelFilter::Warn);
    }

    #[test]
    fn test_flags_override() -> Result<(), crate::error::ShellError> {
        let mut flags = Flags::new();
        flags.parse(&["--debug".to_string(), "-p".to_string()])?;
        let env = MemoryEnvironment::new("/").with_var(LOG_ENV, "off");

        let config = Config::new(&flags, &env);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert!(config.plain_prompt);
        Ok(())
    }
}
