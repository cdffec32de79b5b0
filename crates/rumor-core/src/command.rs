//! The contract shared by every schedulable action.

use std::fmt;
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::clock::Seconds;
use crate::ids::PersonId;
use crate::scheduler::EventQueue;

pub type BoxedCommand<W> = Box<dyn Command<W>>;

/// When a command becomes eligible to run and how long it occupies the hero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timing {
    pub delay: Seconds,
    pub duration: Seconds,
}

impl Timing {
    pub const IMMEDIATE: Timing = Timing::new(0, 0);

    pub const fn new(delay: Seconds, duration: Seconds) -> Self {
        Self { delay, duration }
    }
}

/// Rejection from [`Command::init`]. Shown to the player; the command is
/// dropped without being scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("{name} takes no parameters")]
    NoParameters { name: &'static str },

    #[error("usage: {usage}")]
    Syntax { usage: &'static str },
}

/// A unit of delayed, timed action over a world `W`.
///
/// `exec` returning `false` means "could not complete now". The scheduler
/// never retries on its own: a command that wants another attempt asks for
/// it through [`Context::reschedule`].
pub trait Command<W>: fmt::Debug + Send {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn usage(&self) -> Option<&'static str> {
        None
    }

    fn timing(&self) -> Timing;

    fn delay(&self) -> Seconds {
        self.timing().delay
    }

    fn duration(&self) -> Seconds {
        self.timing().duration
    }

    /// Validates and stores the arguments that followed the command word.
    fn init(&mut self, args: &[&str]) -> Result<(), UsageError> {
        if args.is_empty() {
            return Ok(());
        }
        Err(match self.usage() {
            Some(usage) => UsageError::Syntax { usage },
            None => UsageError::NoParameters { name: self.name() },
        })
    }

    fn exec(&mut self, ctx: &mut Context<'_, W>) -> bool;

    /// Internal commands run alongside the hero and never take a player turn.
    fn is_internal(&self) -> bool {
        false
    }

    /// The person this command is about, if any.
    fn subject(&self) -> Option<PersonId> {
        None
    }
}

/// Everything a command may touch while it executes.
pub struct Context<'a, W> {
    world: &'a mut W,
    queue: &'a mut EventQueue<W>,
    narrator: &'a mut dyn Narrator,
    now: Seconds,
    reschedule: bool,
    quit: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Directives {
    pub(crate) reschedule: bool,
    pub(crate) quit: bool,
}

impl<'a, W> Context<'a, W> {
    pub(crate) fn new(
        world: &'a mut W,
        queue: &'a mut EventQueue<W>,
        narrator: &'a mut dyn Narrator,
        now: Seconds,
    ) -> Self {
        Self {
            world,
            queue,
            narrator,
            now,
            reschedule: false,
            quit: false,
        }
    }

    pub fn now(&self) -> Seconds {
        self.now
    }

    pub fn world(&self) -> &W {
        &*self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut *self.world
    }

    pub fn say(&mut self, line: impl AsRef<str>) {
        self.narrator.say(line.as_ref());
    }

    /// Submits another command, ready at `now + delay`. The entry is in the
    /// queue before the executing command returns.
    pub fn sched(&mut self, command: BoxedCommand<W>) -> Seconds {
        self.queue.schedule(self.now, command)
    }

    /// Asks the scheduler to submit the executing command again, using
    /// whatever delay it reports once `exec` returns.
    pub fn reschedule(&mut self) {
        self.reschedule = true;
    }

    /// Stops the event loop once the executing command completes.
    pub fn quit(&mut self) {
        self.quit = true;
    }

    pub(crate) fn into_directives(self) -> Directives {
        Directives {
            reschedule: self.reschedule,
            quit: self.quit,
        }
    }
}

impl<W> fmt::Debug for Context<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("now", &self.now)
            .field("reschedule", &self.reschedule)
            .field("quit", &self.quit)
            .finish_non_exhaustive()
    }
}

/// Sink for player-facing text.
pub trait Narrator: fmt::Debug + Send {
    fn say(&mut self, line: &str);
}

/// In-memory narrator. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|line| line.contains(needle))
    }
}

impl Narrator for Transcript {
    fn say(&mut self, line: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(line.to_owned());
        }
    }
}
