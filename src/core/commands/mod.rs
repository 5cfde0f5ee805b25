use std::io;

use thiserror::Error;

mod cd;

pub use cd::{Anchor, CdCommand, CdOutcome};

use crate::core::env::EnvError;
use crate::input::{TokenSequence, TokenizeError};
use crate::path::PathError;

pub const EXIT: &str = "exit";
pub const CD: &str = "cd";

/// Trailing argument that marks a background invocation.
pub const BACKGROUND: &str = "&";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cd: path invalid: too long (limit {limit} bytes)")]
    PathTooLong { limit: usize },
    #[error("cd: HOME not set")]
    HomeNotSet,
    #[error("cd: OLDPWD not set")]
    OldPwdNotSet,
    #[error("cd: too many path segments: {0}")]
    Segments(#[from] TokenizeError),
    #[error("cd: cannot determine current directory: {0}")]
    CurrentDir(#[source] io::Error),
    #[error("cd: {path}: {source}")]
    ChangeDir {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("cd: now in {path}, but {var} was not updated: {source}")]
    EnvUpdate {
        var: &'static str,
        path: String,
        #[source]
        source: EnvError,
    },
    #[error("syntax error: missing command before '&'")]
    MissingCommand,
}

impl From<PathError> for CommandError {
    fn from(e: PathError) -> Self {
        match e {
            PathError::TooLong { limit } => CommandError::PathTooLong { limit },
        }
    }
}

/// An external program and its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launch<'a> {
    /// Program name first; a trailing `&` is already stripped.
    pub argv: Vec<&'a str>,
    pub background: bool,
}

impl<'a> Launch<'a> {
    fn from_tokens(tokens: &TokenSequence<'a>) -> Result<Self, CommandError> {
        let mut argv = tokens.as_slice().to_vec();

        // Decided once here; nothing downstream looks at the argv for `&`.
        let background = argv.last() == Some(&BACKGROUND);
        if background {
            argv.pop();
        }
        if argv.is_empty() {
            return Err(CommandError::MissingCommand);
        }

        Ok(Self { argv, background })
    }

    pub fn program(&self) -> &'a str {
        self.argv[0]
    }
}

/// What a tokenized line asks the shell to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation<'a> {
    Empty,
    Exit,
    ChangeDir(Option<&'a str>),
    Launch(Launch<'a>),
}

impl<'a> Invocation<'a> {
    pub fn parse(tokens: &TokenSequence<'a>) -> Result<Self, CommandError> {
        let Some(command) = tokens.first() else {
            return Ok(Invocation::Empty);
        };

        match command {
            EXIT => Ok(Invocation::Exit),
            CD => Ok(Invocation::ChangeDir(tokens.get(1))),
            _ => Launch::from_tokens(tokens).map(Invocation::Launch),
        }
    }
}
