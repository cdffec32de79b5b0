#![allow(dead_code)]

use rand::SeedableRng;
use rand::rngs::StdRng;
use rumor_core::{
    GameClock, Hero, Inn, MessageTable, Person, PersonId, Room, Scheduler, SchedulerHandle,
    Transcript,
};

pub const ROOM_DESCRIPTION: &str = "A smoky hall with a long bar.";

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

pub fn innkeeper() -> Person {
    Person::innkeeper("Maud", 0)
        .with_descriptions("A woman behind the bar.", "Flour on her sleeves.")
        .with_messages(MessageTable::new(lines(&["warm"]), lines(&["cold"])))
}

/// A patron with one line of each kind.
pub fn chatty(name: &str) -> Person {
    Person::patron(name, 0)
        .with_descriptions(format!("{name} by the fire."), format!("{name} up close."))
        .with_messages(MessageTable::new(
            vec![format!("{name} likes you")],
            vec![format!("{name} scowls")],
        ))
}

/// A patron with nothing at all to say.
pub fn silent(name: &str) -> Person {
    Person::patron(name, 0)
}

pub fn inn(hero: Hero, patrons: Vec<Person>) -> (Inn, Vec<PersonId>) {
    let mut inn = Inn::new(
        "The Test Inn",
        "Welcome.",
        Room::new("Hall", ROOM_DESCRIPTION),
        innkeeper(),
        hero,
        StdRng::seed_from_u64(7),
    );
    let ids = patrons
        .into_iter()
        .map(|patron| inn.register(patron))
        .collect();
    (inn, ids)
}

pub fn scheduler(inn: Inn) -> (Scheduler<Inn>, SchedulerHandle<Inn>, Transcript) {
    let transcript = Transcript::new();
    let (scheduler, handle) = Scheduler::new(inn, GameClock::new(), Box::new(transcript.clone()));
    (scheduler, handle, transcript)
}

/// Scheduler over an inn whose patrons are already in the room.
pub fn seated(hero: Hero, patrons: Vec<Person>) -> (Scheduler<Inn>, Vec<PersonId>, Transcript) {
    let (mut inn, ids) = inn(hero, patrons);
    for id in &ids {
        inn.admit(*id).unwrap();
    }
    let (scheduler, _handle, transcript) = scheduler(inn);
    (scheduler, ids, transcript)
}
