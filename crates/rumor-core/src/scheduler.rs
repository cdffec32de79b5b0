//! The discrete-event loop.
//!
//! Every timed action, player or internal, goes through one time-ordered
//! queue. Entries fire in ready-time order with submission order breaking
//! ties, and the clock only ever moves to the ready time of the entry being
//! fired. While a player command is in flight the queue holds no turn
//! marker; once it fires, a marker is queued at `now + duration` and the
//! loop waits on the inbox for the next player command when it pops.

mod errors;
mod handle;
mod messages;
mod queue;

use std::fmt;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub use errors::SchedulerError;
pub use handle::SchedulerHandle;
pub use queue::Pending;

pub(crate) use queue::EventQueue;

use crate::clock::{GameClock, Seconds};
use crate::command::{BoxedCommand, Context, Narrator};
use messages::SchedulerMessage;
use queue::Slot;

pub const DEFAULT_INBOX_CAPACITY: usize = 1024;

/// Outcome of popping one queue entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Fired {
        name: &'static str,
        at: Seconds,
        completed: bool,
    },
    PlayerTurn {
        at: Seconds,
    },
}

pub struct Scheduler<W> {
    queue: EventQueue<W>,
    clock: GameClock,
    world: W,
    narrator: Box<dyn Narrator>,
    inbox: mpsc::Receiver<SchedulerMessage<W>>,
    shutdown: CancellationToken,
    fired: u64,
    running: bool,
    stopped: bool,
}

impl<W> Scheduler<W> {
    pub fn new(
        world: W,
        clock: GameClock,
        narrator: Box<dyn Narrator>,
    ) -> (Self, SchedulerHandle<W>) {
        Self::with_capacity(world, clock, narrator, DEFAULT_INBOX_CAPACITY)
    }

    pub fn with_capacity(
        world: W,
        clock: GameClock,
        narrator: Box<dyn Narrator>,
        capacity: usize,
    ) -> (Self, SchedulerHandle<W>) {
        info!(capacity, now = clock.now(), "initializing scheduler");

        let (tx, rx) = mpsc::channel(capacity.max(1));
        let shutdown = CancellationToken::new();

        let scheduler = Self {
            queue: EventQueue::new(),
            clock,
            world,
            narrator,
            inbox: rx,
            shutdown: shutdown.clone(),
            fired: 0,
            running: false,
            stopped: false,
        };

        (scheduler, SchedulerHandle::new(tx, shutdown))
    }

    /// Queues `command` ready at `now + delay` and returns that ready time.
    pub fn sched(&mut self, command: BoxedCommand<W>) -> Seconds {
        self.queue.schedule(self.clock.now(), command)
    }

    pub fn now(&self) -> Seconds {
        self.clock.now()
    }

    pub fn clock(&self) -> GameClock {
        self.clock
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut W {
        &mut self.world
    }

    pub fn into_world(self) -> W {
        self.world
    }

    /// Number of commands fired so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// True once a command asked the loop to quit.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn pending(&self) -> Vec<Pending> {
        self.queue.pending()
    }

    pub fn dump(&self) {
        debug!(now = self.clock.now(), len = self.queue.len(), "queue dump");
        self.queue.dump();
    }

    /// Pops the earliest entry, moves the clock to its ready time and fires it.
    pub fn step(&mut self) -> Option<Step> {
        let entry = self.queue.pop()?;
        self.clock.advance_to(entry.ready_at);
        let at = self.clock.now();

        match entry.slot {
            Slot::Turn => Some(Step::PlayerTurn { at }),
            Slot::Command(command) => {
                let name = command.name();
                let completed = self.fire(command);
                Some(Step::Fired {
                    name,
                    at,
                    completed,
                })
            }
        }
    }

    /// Fires every entry ready at or before `until`, then moves the clock to
    /// `until`. Returns how many entries were popped.
    pub fn advance_to(&mut self, until: Seconds) -> usize {
        let mut popped = 0;

        while !self.stopped {
            match self.queue.peek_ready_at() {
                Some(ready_at) if ready_at <= until => {
                    self.step();
                    popped += 1;
                }
                _ => break,
            }
        }

        if !self.stopped {
            self.clock.advance_to(until);
        }
        popped
    }

    /// Runs the event loop until a command quits, a shutdown is requested, or
    /// every handle is dropped. The inbox is closed on the way out, so later
    /// submissions fail with [`SchedulerError::Closed`]. Returns the scheduler
    /// for inspection.
    pub async fn run(mut self) -> Self {
        info!(
            now = self.clock.now(),
            pending = self.queue.len(),
            "event loop started"
        );

        self.running = true;
        self.queue.push(self.clock.now(), Slot::Turn);

        while !self.stopped {
            match self.step() {
                Some(Step::PlayerTurn { at }) => {
                    self.dump();
                    let Some(command) = self.next_submission().await else {
                        break;
                    };
                    let internal = command.is_internal();
                    self.sched(command);
                    if internal {
                        // Internal submissions do not use up the turn.
                        self.queue.push(at, Slot::Turn);
                    }
                }
                Some(Step::Fired { .. }) => {}
                None => {
                    warn!("queue drained without a player turn");
                    break;
                }
            }
        }

        self.running = false;
        self.shutdown.cancel();
        self.inbox.close();

        info!(
            now = self.clock.now(),
            fired = self.fired,
            pending = self.queue.len(),
            "event loop exited"
        );
        self
    }

    async fn next_submission(&mut self) -> Option<BoxedCommand<W>> {
        tokio::select! {
            _ = self.shutdown.cancelled() => {
                info!("scheduler cancelled");
                None
            }
            message = self.inbox.recv() => match message {
                Some(SchedulerMessage::Schedule(command)) => Some(command),
                Some(SchedulerMessage::Shutdown) => {
                    info!("scheduler shutting down");
                    None
                }
                None => {
                    info!("all scheduler handles dropped");
                    None
                }
            },
        }
    }

    fn fire(&mut self, mut command: BoxedCommand<W>) -> bool {
        let now = self.clock.now();

        let mut ctx = Context::new(&mut self.world, &mut self.queue, &mut *self.narrator, now);
        let completed = command.exec(&mut ctx);
        let directives = ctx.into_directives();

        self.fired += 1;
        debug!(
            command = command.name(),
            now,
            completed,
            reschedule = directives.reschedule,
            "command fired"
        );

        let turn_at = (self.running && !command.is_internal()).then(|| {
            let spent = if completed { command.duration() } else { 0 };
            now.saturating_add(spent)
        });

        if directives.reschedule {
            self.queue.schedule(now, command);
        }

        if let Some(turn_at) = turn_at {
            self.queue.push(turn_at, Slot::Turn);
        }

        if directives.quit {
            info!(now, "quit requested");
            self.stopped = true;
        }

        completed
    }
}

impl<W> fmt::Debug for Scheduler<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("clock", &self.clock)
            .field("queue", &self.queue)
            .field("fired", &self.fired)
            .field("running", &self.running)
            .field("stopped", &self.stopped)
            .finish_non_exhaustive()
    }
}
