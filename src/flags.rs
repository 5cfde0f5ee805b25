use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<String, Flag>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub value: Option<String>,
}

impl Flag {
    fn new(short: &str, long: &str, description: &str) -> Self {
        Self {
            short: short.to_string(),
            long: long.to_string(),
            description: description.to_string(),
            value: None,
        }
    }
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();

        flags.insert(
            "help".to_string(),
            Flag::new("-h", "--help", "Print this help message"),
        );
        flags.insert(
            "version".to_string(),
            Flag::new("-v", "--version", "Show version information"),
        );
        flags.insert(
            "debug".to_string(),
            Flag::new("-d", "--debug", "Log dispatch and process events to stderr"),
        );
        flags.insert(
            "plain".to_string(),
            Flag::new("-p", "--plain", "Draw the prompt without colors"),
        );

        Flags { flags }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        for arg in args {
            let flag = self
                .flags
                .values_mut()
                .find(|flag| arg == &flag.short || arg == &flag.long)
                .ok_or_else(|| ShellError::Flag(format!("unknown flag: {}", arg)))?;
            flag.value = Some("true".to_string());
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn print_help(&self) {
        println!("Usage: shale [OPTIONS]");
        println!("\nOptions:");
        for flag in self.flags.values() {
            println!("  {}, {:<15} {}", flag.short, flag.long, flag.description);
        }
    }
}
