use log::{debug, trace};

use super::{Flow, Shell};
use crate::{
    core::{
        commands::{Invocation, Launch},
        env::Environment,
    },
    error::ShellError,
    input::{
        tokenizer::{tokenize, WHITESPACE},
        LineReader, TokenSequence,
    },
    process::{Launcher, WaitOutcome},
};

impl<R: LineReader, E: Environment, L: Launcher> Shell<R, E, L> {
    /// Interprets one input line.
    ///
    /// Only a failed fork comes back as an error; everything else is reported
    /// on the diagnostic stream and the loop carries on.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow, ShellError> {
        let mut tokens = TokenSequence::with_capacity(self.token_capacity);
        if let Err(e) = tokenize(line, WHITESPACE, &mut tokens) {
            self.console.error(&e);
            tokens.clear();
        }

        let invocation = match Invocation::parse(&tokens) {
            Ok(invocation) => invocation,
            Err(e) => {
                self.console.error(&e);
                return Ok(Flow::Continue);
            }
        };
        trace!("dispatching {:?}", invocation);

        match invocation {
            Invocation::Empty => Ok(Flow::Continue),
            Invocation::Exit => Ok(Flow::Exit(0)),
            Invocation::ChangeDir(arg) => {
                self.change_directory(arg)?;
                Ok(Flow::Continue)
            }
            Invocation::Launch(launch) => {
                self.launch(&launch)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn change_directory(&mut self, arg: Option<&str>) -> Result<(), ShellError> {
        match self.cd.execute(&mut self.env, arg) {
            Ok(outcome) if outcome.echo => self.console.print(&outcome.path)?,
            Ok(_) => {}
            Err(e) => self.console.error(&e),
        }
        Ok(())
    }

    fn launch(&mut self, launch: &Launch<'_>) -> Result<(), ShellError> {
        let handle = match self.launcher.spawn(&launch.argv) {
            Ok(handle) => handle,
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                self.console.error(&e);
                return Ok(());
            }
        };

        if launch.background {
            self.console.print(&format!("Job {}", handle))?;
            return Ok(());
        }

        match self.launcher.wait(handle) {
            Ok(WaitOutcome::Exited(code)) => debug!("pid {} exited with status {}", handle, code),
            Ok(WaitOutcome::Signaled(signal)) => debug!("pid {} killed by signal {}", handle, signal),
            Ok(WaitOutcome::Reaped) => debug!("pid {} finished", handle),
            Err(e) => self.console.error(&e),
        }
        Ok(())
    }
}
