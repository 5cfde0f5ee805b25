use log::debug;

mod console;
mod executor;

pub use console::{Console, SharedBuffer};

use crate::{
    config::Config,
    core::{
        commands::CdCommand,
        env::{Environment, OsEnvironment},
    },
    error::ShellError,
    input::{EditorReader, LineReader},
    process::{signal, ForkExecLauncher, Launcher},
    prompt::{Prompt, PromptFacts},
};

/// What the loop does after one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(u8),
}

pub struct Shell<R, E, L> {
    pub(crate) reader: R,
    pub(crate) env: E,
    pub(crate) launcher: L,
    pub(crate) console: Console,
    pub(crate) prompt: Prompt,
    pub(crate) cd: CdCommand,
    pub(crate) token_capacity: usize,
}

impl Shell<EditorReader, OsEnvironment, ForkExecLauncher> {
    /// An interactive shell on the real terminal, environment and process
    /// table.
    pub fn new(config: &Config) -> Result<Self, ShellError> {
        signal::ignore_child_exits()?;

        // Keeps the shell alive while a foreground child is interrupted.
        ctrlc::set_handler(move || {
            debug!("interrupt received");
        })?;

        Ok(Self::with_parts(
            EditorReader::new()?,
            OsEnvironment::new(),
            ForkExecLauncher::new(),
            Console::stdio(),
            Prompt::new(config.plain_prompt),
            config,
        ))
    }
}

impl<R: LineReader, E: Environment, L: Launcher> Shell<R, E, L> {
    pub fn with_parts(
        reader: R,
        env: E,
        launcher: L,
        console: Console,
        prompt: Prompt,
        config: &Config,
    ) -> Self {
        Shell {
            reader,
            env,
            launcher,
            console,
            prompt,
            cd: CdCommand::new(config.path_max),
            token_capacity: config.token_capacity,
        }
    }

    /// Runs until `exit` or end of input and returns the exit status.
    pub fn run(&mut self) -> Result<u8, ShellError> {
        loop {
            if let Flow::Exit(code) = self.step()? {
                debug!("leaving with status {}", code);
                return Ok(code);
            }
        }
    }

    /// One prompt cycle.
    pub fn step(&mut self) -> Result<Flow, ShellError> {
        let facts = PromptFacts::gather(&self.env);
        let prompt = self.prompt.render(&facts);
        self.console.print(&prompt.header)?;

        let Some(line) = self.reader.read_line(&prompt.input)? else {
            debug!("end of input");
            self.console.print("")?;
            return Ok(Flow::Exit(0));
        };

        self.execute_line(&line)
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }
}
