use log::{debug, warn};
use std::io;

use super::CommandError;
use crate::core::env::{Environment, OLDPWD, PWD};
use crate::input::tokenizer::{tokenize, TokenSequence, DEFAULT_CAPACITY};
use crate::path::{PathBuilder, PATH_MAX, SEPARATOR};

/// Where a `cd` target starts before segments are appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Home,
    PreviousDir,
    Root,
    CurrentDir,
}

/// Result of a successful directory change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdOutcome {
    pub path: String,
    /// Set for `cd -`, whose target is shown to the user.
    pub echo: bool,
}

#[derive(Debug, Clone)]
pub struct CdCommand {
    path_max: usize,
    segment_capacity: usize,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new(PATH_MAX)
    }
}

impl CdCommand {
    pub fn new(path_max: usize) -> Self {
        Self {
            path_max,
            segment_capacity: DEFAULT_CAPACITY,
        }
    }

    pub fn execute(
        &self,
        env: &mut dyn Environment,
        arg: Option<&str>,
    ) -> Result<CdOutcome, CommandError> {
        if arg.is_some_and(|a| a.len() > self.path_max) {
            return Err(CommandError::PathTooLong {
                limit: self.path_max,
            });
        }

        let mut segments = TokenSequence::with_capacity(self.segment_capacity);
        let (anchor, skip) = select_anchor(arg, &mut segments)?;
        let previous = env.current_dir();

        let start = match anchor {
            Anchor::Home => env.home_dir().ok_or(CommandError::HomeNotSet)?,
            Anchor::PreviousDir => env.var(OLDPWD).ok_or(CommandError::OldPwdNotSet)?,
            Anchor::Root => SEPARATOR.to_string(),
            Anchor::CurrentDir => match &previous {
                Ok(cwd) => cwd.clone(),
                Err(e) => {
                    return Err(CommandError::CurrentDir(io::Error::new(
                        e.kind(),
                        e.to_string(),
                    )))
                }
            },
        };

        let mut path = PathBuilder::anchored(&start, self.path_max)?;
        for segment in &segments.as_slice()[skip..] {
            path.push_segment(segment)?;
        }
        let target = path.into_string();

        env.set_current_dir(&target)
            .map_err(|source| CommandError::ChangeDir {
                path: target.clone(),
                source,
            })?;
        debug!("changed directory to {} ({:?} anchor)", target, anchor);

        // The directory change stands even if the bookkeeping below fails.
        let previous = previous.ok().or_else(|| env.var(PWD));
        match previous {
            Some(prev) => env
                .set_var(OLDPWD, &prev)
                .map_err(|source| CommandError::EnvUpdate {
                    var: OLDPWD,
                    path: target.clone(),
                    source,
                })?,
            None => warn!("previous directory unknown, {} left untouched", OLDPWD),
        }
        env.set_var(PWD, &target)
            .map_err(|source| CommandError::EnvUpdate {
                var: PWD,
                path: target.clone(),
                source,
            })?;

        Ok(CdOutcome {
            path: target,
            echo: anchor == Anchor::PreviousDir,
        })
    }
}

/// Splits `arg` into `segments` and picks the anchor. The returned index is
/// the first segment still to be appended.
fn select_anchor<'a>(
    arg: Option<&'a str>,
    segments: &mut TokenSequence<'a>,
) -> Result<(Anchor, usize), CommandError> {
    let Some(arg) = arg else {
        return Ok((Anchor::Home, 0));
    };

    tokenize(arg, &[SEPARATOR], segments)?;

    if arg.starts_with(SEPARATOR) {
        return Ok((Anchor::Root, 0));
    }

    Ok(match segments.first() {
        Some("~") => (Anchor::Home, 1),
        Some("-") => (Anchor::PreviousDir, segments.len()),
        _ => (Anchor::CurrentDir, 0),
    })
}
