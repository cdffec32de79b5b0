use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use tracing::debug;

use crate::clock::Seconds;
use crate::command::BoxedCommand;
use crate::ids::PersonId;

/// Name reported for the player-turn marker.
pub(crate) const TURN: &str = "turn";

pub(crate) enum Slot<W> {
    /// The hero is free: the loop takes the next player command here.
    Turn,
    Command(BoxedCommand<W>),
}

impl<W> Slot<W> {
    fn name(&self) -> &'static str {
        match self {
            Slot::Turn => TURN,
            Slot::Command(command) => command.name(),
        }
    }

    fn subject(&self) -> Option<PersonId> {
        match self {
            Slot::Turn => None,
            Slot::Command(command) => command.subject(),
        }
    }
}

pub(crate) struct ScheduledEntry<W> {
    pub(crate) ready_at: Seconds,
    pub(crate) seq: u64,
    pub(crate) slot: Slot<W>,
}

// BinaryHeap is a max-heap: reverse so the earliest ready time, then the
// earliest submission, sits on top.
impl<W> Ord for ScheduledEntry<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.ready_at.cmp(&other.ready_at) {
            Ordering::Equal => self.seq.cmp(&other.seq),
            ord => ord,
        }
        .reverse()
    }
}

impl<W> PartialOrd for ScheduledEntry<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W> PartialEq for ScheduledEntry<W> {
    fn eq(&self, other: &Self) -> bool {
        self.ready_at == other.ready_at && self.seq == other.seq
    }
}

impl<W> Eq for ScheduledEntry<W> {}

/// A queued entry as seen from outside the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub ready_at: Seconds,
    pub name: &'static str,
    pub subject: Option<PersonId>,
}

pub(crate) struct EventQueue<W> {
    heap: BinaryHeap<ScheduledEntry<W>>,
    next_seq: u64,
}

impl<W> EventQueue<W> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Inserts `command` ready at `now + delay`.
    pub(crate) fn schedule(&mut self, now: Seconds, command: BoxedCommand<W>) -> Seconds {
        let ready_at = now.saturating_add(command.delay());
        debug!(
            command = command.name(),
            now,
            delay = command.delay(),
            ready_at,
            "command scheduled"
        );
        self.push(ready_at, Slot::Command(command));
        ready_at
    }

    pub(crate) fn push(&mut self, ready_at: Seconds, slot: Slot<W>) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(ScheduledEntry {
            ready_at,
            seq,
            slot,
        });
    }

    pub(crate) fn pop(&mut self) -> Option<ScheduledEntry<W>> {
        self.heap.pop()
    }

    pub(crate) fn peek_ready_at(&self) -> Option<Seconds> {
        self.heap.peek().map(|entry| entry.ready_at)
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Pending entries in the order they will fire.
    pub(crate) fn pending(&self) -> Vec<Pending> {
        let mut entries: Vec<&ScheduledEntry<W>> = self.heap.iter().collect();
        entries.sort_by_key(|entry| (entry.ready_at, entry.seq));
        entries
            .into_iter()
            .map(|entry| Pending {
                ready_at: entry.ready_at,
                name: entry.slot.name(),
                subject: entry.slot.subject(),
            })
            .collect()
    }

    pub(crate) fn dump(&self) {
        for (pos, pending) in self.pending().iter().enumerate() {
            debug!(
                pos,
                ready_at = pending.ready_at,
                command = pending.name,
                subject = ?pending.subject,
                "pending entry"
            );
        }
    }
}

impl<W> fmt::Debug for EventQueue<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventQueue")
            .field("len", &self.heap.len())
            .field("next_seq", &self.next_seq)
            .finish()
    }
}
