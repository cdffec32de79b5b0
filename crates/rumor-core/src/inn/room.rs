use thiserror::Error;
use tracing::debug;

use crate::ids::PersonId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("{0} is not in the room")]
    NotPresent(PersonId),

    #[error("{0} is already in the room")]
    AlreadyPresent(PersonId),

    #[error("{0} is busy")]
    Busy(PersonId),

    #[error("{0} is not known to the inn")]
    Unknown(PersonId),
}

/// Who is in the room, and the one person (if any) engaged with the hero.
#[derive(Debug, Clone, Default)]
pub struct Room {
    pub name: String,
    pub description: String,
    occupants: Vec<PersonId>,
    busy: Option<PersonId>,
}

impl Room {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            occupants: Vec::new(),
            busy: None,
        }
    }

    pub fn add(&mut self, id: PersonId) -> Result<(), RoomError> {
        if self.contains(id) {
            return Err(RoomError::AlreadyPresent(id));
        }
        self.occupants.push(id);
        Ok(())
    }

    /// Removes `id` unless it is absent or busy. Presence and the busy slot
    /// are checked together, so a busy person is never removed.
    pub fn remove(&mut self, id: PersonId) -> Result<(), RoomError> {
        let index = self
            .occupants
            .iter()
            .position(|occupant| *occupant == id)
            .ok_or(RoomError::NotPresent(id))?;

        if self.busy == Some(id) {
            debug!(person = %id, "not removed: busy");
            return Err(RoomError::Busy(id));
        }

        self.occupants.remove(index);
        Ok(())
    }

    /// Marks `person` as the one engaged with the hero, replacing whoever
    /// was before. `None` frees everyone.
    pub fn set_busy(&mut self, person: Option<PersonId>) {
        self.busy = person;
    }

    pub fn is_busy(&self, id: PersonId) -> bool {
        self.busy == Some(id)
    }

    pub fn busy(&self) -> Option<PersonId> {
        self.busy
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.occupants.contains(&id)
    }

    pub fn occupants(&self) -> &[PersonId] {
        &self.occupants
    }
}
