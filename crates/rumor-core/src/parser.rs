//! Turns typed lines into initialized commands and hands them to the
//! scheduler through the same `sched` path internal commands use.

use futures_util::{Stream, StreamExt};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::command::{BoxedCommand, Narrator, UsageError};
use crate::factory::{CommandFactory, CommandName};
use crate::inn::Inn;
use crate::scheduler::{SchedulerError, SchedulerHandle};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("nothing to do")]
    Empty,

    #[error("I don't understand. Try again.")]
    Unknown(String),

    #[error(transparent)]
    Usage(#[from] UsageError),
}

#[derive(Debug, Clone, Default)]
pub struct CommandParser {
    factory: CommandFactory,
}

impl CommandParser {
    pub fn new(factory: CommandFactory) -> Self {
        Self { factory }
    }

    /// Splits `line` on whitespace, looks up the first word and initializes
    /// the command with the rest.
    pub fn parse(&self, line: &str) -> Result<BoxedCommand<Inn>, ParseError> {
        let mut words = line.split_whitespace();
        let keyword = words.next().ok_or(ParseError::Empty)?;
        let args: Vec<&str> = words.collect();

        let name =
            CommandName::lookup(keyword).ok_or_else(|| ParseError::Unknown(keyword.to_owned()))?;

        let mut command = self.factory.create(name);
        command.init(&args)?;
        debug!(command = %name, args = args.len(), "parsed");
        Ok(command)
    }

    /// Parses one line and submits it. Parse failures are reported to the
    /// player and submit nothing; only a closed scheduler is an error.
    pub async fn submit(
        &self,
        line: &str,
        handle: &SchedulerHandle<Inn>,
        narrator: &mut dyn Narrator,
    ) -> Result<bool, SchedulerError> {
        match self.parse(line) {
            Ok(command) => {
                handle.sched(command).await?;
                Ok(true)
            }
            Err(ParseError::Empty) => Ok(false),
            Err(err) => {
                narrator.say(&err.to_string());
                Ok(false)
            }
        }
    }

    /// Feeds every line of `input` to the scheduler until the input ends or
    /// the scheduler stops. Returns how many commands were submitted.
    pub async fn feed<S>(
        &self,
        mut input: S,
        handle: &SchedulerHandle<Inn>,
        narrator: &mut dyn Narrator,
    ) -> usize
    where
        S: Stream<Item = String> + Unpin,
    {
        let mut submitted = 0;

        loop {
            let line = tokio::select! {
                _ = handle.closed() => {
                    debug!("scheduler closed, no more input taken");
                    break;
                }
                line = input.next() => line,
            };

            let Some(line) = line else {
                info!(submitted, "input ended");
                if let Err(err) = handle.shutdown().await {
                    debug!(error = %err, "scheduler already stopped");
                }
                break;
            };

            match self.submit(&line, handle, narrator).await {
                Ok(true) => submitted += 1,
                Ok(false) => {}
                Err(err) => {
                    warn!(error = %err, "dropping input");
                    break;
                }
            }
        }

        submitted
    }
}
