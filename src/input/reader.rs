use std::collections::VecDeque;

use log::{debug, warn};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::ShellError;

/// One prompt cycle's worth of input.
pub trait LineReader {
    /// Shows `prompt` and blocks for a line. `Ok(None)` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError>;
}

/// Terminal input through rustyline. Falls back to plain line reads when
/// stdin is not a terminal.
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        warn!("couldn't add to history: {}", e);
                    }
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => {
                debug!("prompt interrupted, discarding line");
                Ok(Some(String::new()))
            }
            Err(ReadlineError::Eof) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Replays a fixed list of lines, then reports end of input.
#[derive(Debug, Default)]
pub struct ScriptedReader {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedReader {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Every prompt shown so far, oldest first.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineReader for ScriptedReader {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, ShellError> {
        self.prompts.push(prompt.to_string());
        Ok(self.lines.pop_front())
    }
}
