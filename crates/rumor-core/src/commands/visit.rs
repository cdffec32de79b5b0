//! A patron's stay at the inn, modelled as an arrival and a departure.
//!
//! The scheduler knows nothing about patrons. An [`EnterCommand`] brings the
//! patron in and queues the paired [`LeaveCommand`]; the leave command keeps
//! re-queueing itself while the patron is busy with the hero.

use tracing::{debug, warn};

use crate::clock::Seconds;
use crate::command::{Command, Context, Timing};
use crate::ids::PersonId;
use crate::inn::{Inn, RoomError};

pub const ENTER: &str = "Enter";
pub const LEAVE: &str = "Leave";

const ENTER_DESCRIPTION: &str = "Move a Patron into the Room for a certain amount of time.";
const LEAVE_DESCRIPTION: &str = "Cause a Patron to leave the room after a certain amount of time.";

/// Time the departure itself takes.
const LEAVE_DURATION: Seconds = 10;

/// Default wait before a busy patron tries to leave again.
pub const DEFAULT_RETRY_INTERVAL: Seconds = 30;

/// One patron's visit: arrives `arrival` seconds after seeding and stays for
/// `stay` seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit {
    pub patron: PersonId,
    pub arrival: Seconds,
    pub stay: Seconds,
}

impl Visit {
    pub fn new(patron: PersonId, arrival: Seconds, stay: Seconds) -> Self {
        Self {
            patron,
            arrival,
            stay,
        }
    }

    /// Seconds after seeding at which the patron should be gone.
    pub fn ends_after(&self) -> Seconds {
        self.arrival.saturating_add(self.stay)
    }
}

#[derive(Debug, Clone)]
pub struct EnterCommand {
    visit: Visit,
    retry_interval: Seconds,
}

impl EnterCommand {
    pub fn new(visit: Visit) -> Self {
        Self::with_retry_interval(visit, DEFAULT_RETRY_INTERVAL)
    }

    pub fn with_retry_interval(visit: Visit, retry_interval: Seconds) -> Self {
        Self {
            visit,
            retry_interval,
        }
    }

    pub fn visit(&self) -> &Visit {
        &self.visit
    }
}

impl Command<Inn> for EnterCommand {
    fn name(&self) -> &'static str {
        ENTER
    }

    fn description(&self) -> &'static str {
        ENTER_DESCRIPTION
    }

    fn timing(&self) -> Timing {
        Timing::new(self.visit.arrival, self.visit.stay)
    }

    fn exec(&mut self, ctx: &mut Context<'_, Inn>) -> bool {
        let patron = self.visit.patron;

        if let Err(err) = ctx.world_mut().admit(patron) {
            warn!(person = %patron, error = %err, "dropping arrival");
            return false;
        }

        let name = ctx.world().name_of(patron).to_owned();
        ctx.say(format!("{name} has entered the room."));

        // Fired exactly at `arrival`, so `stay` from now lands on `arrival + stay`.
        let leave = LeaveCommand::for_visit(&self.visit, self.retry_interval);
        ctx.sched(Box::new(leave));
        true
    }

    fn is_internal(&self) -> bool {
        true
    }

    fn subject(&self) -> Option<PersonId> {
        Some(self.visit.patron)
    }
}

#[derive(Debug, Clone)]
pub struct LeaveCommand {
    patron: PersonId,
    timing: Timing,
    retry_interval: Seconds,
    attempts: u32,
}

impl LeaveCommand {
    /// The departure that closes `visit`, to be queued when the patron arrives.
    pub fn for_visit(visit: &Visit, retry_interval: Seconds) -> Self {
        Self {
            patron: visit.patron,
            timing: Timing::new(visit.stay, LEAVE_DURATION),
            retry_interval: retry_interval.max(1),
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

impl Command<Inn> for LeaveCommand {
    fn name(&self) -> &'static str {
        LEAVE
    }

    fn description(&self) -> &'static str {
        LEAVE_DESCRIPTION
    }

    fn timing(&self) -> Timing {
        self.timing
    }

    fn exec(&mut self, ctx: &mut Context<'_, Inn>) -> bool {
        self.attempts += 1;

        match ctx.world_mut().depart(self.patron) {
            Ok(()) => {
                let name = ctx.world().name_of(self.patron).to_owned();
                ctx.say(format!("{name} has left the building."));
                true
            }
            Err(RoomError::Busy(_)) => {
                debug!(
                    person = %self.patron,
                    attempts = self.attempts,
                    retry_in = self.retry_interval,
                    "patron busy, departure postponed"
                );
                self.timing.delay = self.retry_interval;
                ctx.reschedule();
                true
            }
            Err(err) => {
                // Already gone, e.g. stormed out mid-visit.
                warn!(person = %self.patron, error = %err, "dropping departure");
                false
            }
        }
    }

    fn is_internal(&self) -> bool {
        true
    }

    fn subject(&self) -> Option<PersonId> {
        Some(self.patron)
    }
}
