//! Game state the commands act on: the inn, its one room, the people who
//! come and go, and the hero.

mod hero;
mod person;
mod room;

use std::collections::HashMap;

use rand::rngs::StdRng;
use tracing::{debug, info};

pub use hero::{DEFAULT_CHARISMA, DEFAULT_MONEY, Hero};
pub use person::{MessageTable, Person, Polarity, Role};
pub use room::{Room, RoomError};

use crate::ids::PersonId;

pub const DEFAULT_REBUKE_LIMIT: u32 = 2;

/// Keyword that always names the innkeeper, whatever their name is.
pub const INNKEEPER: &str = "INNKEEPER";

/// A patron who ran out of patience with the hero and walked out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rebuke {
    pub name: String,
    pub rebukes: u32,
    pub game_over: bool,
}

#[derive(Debug)]
pub struct Inn {
    name: String,
    intro: String,
    room: Room,
    innkeeper: PersonId,
    people: HashMap<PersonId, Person>,
    roster: Vec<PersonId>,
    hero: Hero,
    rebukes: u32,
    rebuke_limit: u32,
    rng: StdRng,
}

impl Inn {
    /// Builds an inn whose single room already holds the innkeeper.
    pub fn new(
        name: impl Into<String>,
        intro: impl Into<String>,
        mut room: Room,
        innkeeper: Person,
        hero: Hero,
        rng: StdRng,
    ) -> Self {
        let innkeeper_id = innkeeper.id;
        // A fresh room cannot already hold the innkeeper.
        let _ = room.add(innkeeper_id);

        let mut people = HashMap::new();
        people.insert(innkeeper_id, innkeeper);

        Self {
            name: name.into(),
            intro: intro.into(),
            room,
            innkeeper: innkeeper_id,
            people,
            roster: Vec::new(),
            hero,
            rebukes: 0,
            rebuke_limit: DEFAULT_REBUKE_LIMIT,
            rng,
        }
    }

    pub fn with_rebuke_limit(mut self, limit: u32) -> Self {
        self.rebuke_limit = limit.max(1);
        self
    }

    /// Adds a patron to the roster. Patrons are not in the room until a
    /// visit brings them in.
    pub fn register(&mut self, patron: Person) -> PersonId {
        let id = patron.id;
        debug!(person = %id, name = %patron.name, "patron registered");
        self.people.insert(id, patron);
        self.roster.push(id);
        id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn intro(&self) -> &str {
        &self.intro
    }

    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn room_mut(&mut self) -> &mut Room {
        &mut self.room
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn hero_mut(&mut self) -> &mut Hero {
        &mut self.hero
    }

    pub fn innkeeper_id(&self) -> PersonId {
        self.innkeeper
    }

    /// Registered patrons in registration order.
    pub fn roster(&self) -> &[PersonId] {
        &self.roster
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.get(&id)
    }

    pub fn person_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.people.get_mut(&id)
    }

    pub fn name_of(&self, id: PersonId) -> &str {
        self.people
            .get(&id)
            .map(|person| person.name.as_str())
            .unwrap_or("someone")
    }

    pub fn is_present(&self, id: PersonId) -> bool {
        self.room.contains(id)
    }

    /// Patrons in the room, not counting the innkeeper.
    pub fn patron_count(&self) -> usize {
        self.room
            .occupants()
            .iter()
            .filter(|id| **id != self.innkeeper)
            .count()
    }

    /// Resolves a name typed by the player to someone in the room.
    pub fn find_present(&self, name: &str) -> Option<PersonId> {
        if name.eq_ignore_ascii_case(INNKEEPER) {
            return Some(self.innkeeper);
        }
        self.room.occupants().iter().copied().find(|id| {
            self.people
                .get(id)
                .is_some_and(|person| person.name.eq_ignore_ascii_case(name))
        })
    }

    /// Brings a registered patron into the room.
    pub fn admit(&mut self, id: PersonId) -> Result<(), RoomError> {
        if !self.roster.contains(&id) {
            return Err(RoomError::Unknown(id));
        }
        self.room.add(id)?;
        info!(person = %id, name = self.name_of(id), "patron entered");
        Ok(())
    }

    /// Lets a patron leave. Fails without side effects if the patron is busy
    /// or not in the room.
    pub fn depart(&mut self, id: PersonId) -> Result<(), RoomError> {
        self.room.remove(id)?;
        info!(person = %id, name = self.name_of(id), "patron left");
        Ok(())
    }

    /// A patron storms out because of the hero, ending any conversation.
    pub fn rebuke(&mut self, id: PersonId) -> Result<Rebuke, RoomError> {
        if self.room.is_busy(id) {
            self.room.set_busy(None);
        }
        self.room.remove(id)?;
        self.rebukes += 1;

        let rebuke = Rebuke {
            name: self.name_of(id).to_owned(),
            rebukes: self.rebukes,
            game_over: self.rebukes >= self.rebuke_limit,
        };
        info!(
            person = %id,
            rebukes = rebuke.rebukes,
            game_over = rebuke.game_over,
            "patron stormed out"
        );
        Ok(rebuke)
    }

    pub fn rebukes(&self) -> u32 {
        self.rebukes
    }

    /// Shifts the affinity of every patron in the room.
    pub fn adjust_all_affinities(&mut self, delta: i32) {
        for id in self.room.occupants() {
            if *id == self.innkeeper {
                continue;
            }
            if let Some(person) = self.people.get_mut(id) {
                person.adjust_affinity(delta);
            }
        }
    }

    /// The hero's charisma roll against `id`'s current affinity.
    pub fn roll_charisma(&mut self, id: PersonId) -> bool {
        let affinity = self.people.get(&id).map_or(0, |person| person.affinity);
        self.hero.roll_charisma(affinity, &mut self.rng)
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
