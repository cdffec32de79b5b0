//! Plans the day's patron visits and seeds them into the scheduler.

use std::collections::HashSet;
use std::fmt::Display;

use rand::Rng;
use rand::seq::index;
use tracing::{info, warn};

use crate::clock::Seconds;
use crate::commands::{DEFAULT_RETRY_INTERVAL, EnterCommand, Visit};
use crate::config::{GameConfig, SecondsRange};
use crate::ids::PersonId;
use crate::inn::Inn;
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedRejection {
    UnknownPatron,
    Innkeeper,
    Duplicate,
}

impl Display for SeedRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedRejection::UnknownPatron => write!(f, "not on the roster"),
            SeedRejection::Innkeeper => write!(f, "the innkeeper never visits"),
            SeedRejection::Duplicate => write!(f, "already has a visit"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub scheduled: usize,
    pub rejected: Vec<(PersonId, SeedRejection)>,
}

#[derive(Debug, Clone)]
pub struct PatronRegistry {
    arrival: SecondsRange,
    stay: SecondsRange,
    starters: usize,
    retry_interval: Seconds,
}

impl PatronRegistry {
    pub fn new(arrival: SecondsRange, stay: SecondsRange, starters: usize) -> Self {
        Self {
            arrival,
            stay,
            starters,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }

    pub fn with_retry_interval(mut self, retry_interval: Seconds) -> Self {
        self.retry_interval = retry_interval;
        self
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.arrival, config.stay, config.starters)
            .with_retry_interval(config.retry_interval)
    }

    /// One visit per patron on `roster`. `starters` of them, chosen at
    /// random, walk in as soon as the game begins.
    pub fn plan<R: Rng + ?Sized>(&self, roster: &[PersonId], rng: &mut R) -> Vec<Visit> {
        let starters = self.starters.min(roster.len());
        let early: HashSet<usize> = index::sample(rng, roster.len(), starters)
            .into_iter()
            .collect();

        roster
            .iter()
            .enumerate()
            .map(|(i, patron)| {
                let arrival = if early.contains(&i) {
                    0
                } else {
                    self.arrival.sample(rng)
                };
                Visit::new(*patron, arrival, self.stay.sample(rng))
            })
            .collect()
    }

    /// Queues an arrival for every acceptable visit. Each arrival queues its
    /// own departure when it fires. Visits for unknown people, the innkeeper,
    /// or a patron already seeded in this batch are rejected and reported.
    pub fn seed(&self, scheduler: &mut Scheduler<Inn>, visits: &[Visit]) -> SeedReport {
        let mut report = SeedReport::default();
        let mut seen = HashSet::new();

        for visit in visits {
            let inn = scheduler.world();
            let rejection = if visit.patron == inn.innkeeper_id() {
                Some(SeedRejection::Innkeeper)
            } else if !inn.roster().contains(&visit.patron) {
                Some(SeedRejection::UnknownPatron)
            } else if !seen.insert(visit.patron) {
                Some(SeedRejection::Duplicate)
            } else {
                None
            };

            if let Some(rejection) = rejection {
                warn!(person = %visit.patron, %rejection, "visit rejected");
                report.rejected.push((visit.patron, rejection));
                continue;
            }

            let enter = EnterCommand::with_retry_interval(*visit, self.retry_interval);
            scheduler.sched(Box::new(enter));
            report.scheduled += 1;
        }

        info!(
            scheduled = report.scheduled,
            rejected = report.rejected.len(),
            "patron visits seeded"
        );
        report
    }
}
