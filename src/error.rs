use thiserror::Error;

use crate::process::ProcessError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("flag error: {0}")]
    Flag(String),
    #[error("ctrl-c error: {0}")]
    CtrlC(#[from] ctrlc::Error),
    #[error("logger error: {0}")]
    Logger(#[from] log::SetLoggerError),
}
