mod common;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rumor_core::commands::{ENTER, EnterCommand, LEAVE, Visit};
use rumor_core::{Hero, PatronRegistry, PersonId, SecondsRange, SeedRejection, Step};

use common::{chatty, inn, scheduler};

#[test]
fn enter_fires_at_arrival_and_queues_leave_at_arrival_plus_stay() {
    let (inn, ids) = inn(Hero::default(), vec![chatty("Rook")]);
    let rook = ids[0];
    let (mut scheduler, _handle, transcript) = scheduler(inn);

    scheduler.sched(Box::new(EnterCommand::new(Visit::new(rook, 0, 100))));
    scheduler.advance_to(0);

    assert!(scheduler.world().is_present(rook));
    assert!(transcript.contains("Rook has entered the room."));

    let pending = scheduler.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].ready_at, 100);
    assert_eq!(pending[0].name, LEAVE);
    assert_eq!(pending[0].subject, Some(rook));

    scheduler.advance_to(100);
    assert!(!scheduler.world().is_present(rook));
    assert!(transcript.contains("Rook has left the building."));
    assert!(scheduler.is_empty());
}

#[test]
fn busy_patron_retries_until_free() {
    let (inn, ids) = inn(Hero::default(), vec![chatty("Rook")]);
    let rook = ids[0];
    let (mut scheduler, _handle, _transcript) = scheduler(inn);

    scheduler.sched(Box::new(EnterCommand::new(Visit::new(rook, 0, 100))));
    scheduler.advance_to(99);
    scheduler.world_mut().room_mut().set_busy(Some(rook));

    scheduler.advance_to(100);
    assert!(scheduler.world().is_present(rook));
    let pending = scheduler.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!((pending[0].ready_at, pending[0].name), (130, LEAVE));

    scheduler.advance_to(129);
    assert!(scheduler.world().is_present(rook));
    scheduler.world_mut().room_mut().set_busy(None);

    scheduler.advance_to(130);
    assert!(!scheduler.world().is_present(rook));
    assert!(scheduler.is_empty());
}

#[test]
fn busy_patron_keeps_retrying_at_fixed_interval() {
    let (inn, ids) = inn(Hero::default(), vec![chatty("Rook")]);
    let rook = ids[0];
    let (mut scheduler, _handle, _transcript) = scheduler(inn);

    let enter = EnterCommand::with_retry_interval(Visit::new(rook, 10, 50), 15);
    scheduler.sched(Box::new(enter));
    scheduler.advance_to(10);
    scheduler.world_mut().room_mut().set_busy(Some(rook));

    let mut departures = Vec::new();
    while let Some(step) = scheduler.step() {
        if let Step::Fired { name, at, .. } = step {
            departures.push((name, at));
        }
        if departures.len() == 4 {
            scheduler.world_mut().room_mut().set_busy(None);
        }
    }

    assert_eq!(
        departures,
        vec![(LEAVE, 60), (LEAVE, 75), (LEAVE, 90), (LEAVE, 105), (LEAVE, 120)]
    );
    assert!(!scheduler.world().is_present(rook));
}

#[test]
fn leave_is_not_queued_before_the_patron_arrives() {
    let (inn, ids) = inn(Hero::default(), vec![chatty("Rook")]);
    let rook = ids[0];
    let (mut scheduler, _handle, _transcript) = scheduler(inn);

    scheduler.sched(Box::new(EnterCommand::new(Visit::new(rook, 50, 10))));

    let pending = scheduler.pending();
    assert_eq!(pending.len(), 1);
    assert_eq!((pending[0].ready_at, pending[0].name), (50, ENTER));
    assert!(!scheduler.world().is_present(rook));

    scheduler.advance_to(59);
    assert!(scheduler.world().is_present(rook));
    scheduler.advance_to(60);
    assert!(!scheduler.world().is_present(rook));
}

#[test]
fn busy_slot_moves_between_patrons() {
    let (inn, ids) = inn(Hero::default(), vec![chatty("Rook"), chatty("Wren")]);
    let (rook, wren) = (ids[0], ids[1]);
    let (mut scheduler, _handle, _transcript) = scheduler(inn);

    scheduler.sched(Box::new(EnterCommand::new(Visit::new(rook, 0, 40))));
    scheduler.sched(Box::new(EnterCommand::new(Visit::new(wren, 0, 40))));
    scheduler.advance_to(0);

    scheduler.world_mut().room_mut().set_busy(Some(rook));
    scheduler.world_mut().room_mut().set_busy(Some(wren));

    scheduler.advance_to(40);
    assert!(!scheduler.world().is_present(rook));
    assert!(scheduler.world().is_present(wren));
}

#[test]
fn departure_after_storming_out_is_dropped() {
    let (inn, ids) = inn(Hero::default(), vec![chatty("Rook")]);
    let rook = ids[0];
    let (mut scheduler, _handle, _transcript) = scheduler(inn);

    scheduler.sched(Box::new(EnterCommand::new(Visit::new(rook, 0, 100))));
    scheduler.advance_to(20);
    let rebuke = scheduler.world_mut().rebuke(rook).unwrap();
    assert_eq!(rebuke.rebukes, 1);

    assert_eq!(
        scheduler.step(),
        Some(Step::Fired {
            name: LEAVE,
            at: 100,
            completed: false
        })
    );
    assert!(scheduler.is_empty());
}

#[test]
fn second_arrival_of_a_present_patron_fails() {
    let (inn, ids) = inn(Hero::default(), vec![chatty("Rook")]);
    let rook = ids[0];
    let (mut scheduler, _handle, _transcript) = scheduler(inn);

    scheduler.sched(Box::new(EnterCommand::new(Visit::new(rook, 0, 100))));
    scheduler.sched(Box::new(EnterCommand::new(Visit::new(rook, 5, 100))));

    scheduler.advance_to(0);
    assert_eq!(
        scheduler.step(),
        Some(Step::Fired {
            name: ENTER,
            at: 5,
            completed: false
        })
    );
    // Only the first visit's departure is queued.
    assert_eq!(scheduler.len(), 1);
}

#[test]
fn seeding_rejects_bad_visits() {
    let (inn, ids) = inn(Hero::default(), vec![chatty("Rook"), chatty("Wren")]);
    let keeper = inn.innkeeper_id();
    let stranger = PersonId::new();
    let (mut scheduler, _handle, _transcript) = scheduler(inn);

    let registry = PatronRegistry::new(SecondsRange::new(0, 0), SecondsRange::new(60, 60), 0);
    let visits = [
        Visit::new(ids[0], 0, 60),
        Visit::new(keeper, 0, 60),
        Visit::new(stranger, 0, 60),
        Visit::new(ids[0], 30, 60),
        Visit::new(ids[1], 30, 60),
    ];

    let report = registry.seed(&mut scheduler, &visits);
    assert_eq!(report.scheduled, 2);
    assert_eq!(
        report.rejected,
        vec![
            (keeper, SeedRejection::Innkeeper),
            (stranger, SeedRejection::UnknownPatron),
            (ids[0], SeedRejection::Duplicate),
        ]
    );

    let entered: Vec<_> = scheduler
        .pending()
        .iter()
        .map(|entry| (entry.ready_at, entry.subject))
        .collect();
    assert_eq!(entered, vec![(0, Some(ids[0])), (30, Some(ids[1]))]);
}

#[test]
fn plan_sends_starters_in_first() {
    let roster: Vec<PersonId> = (0..5).map(|_| PersonId::new()).collect();
    let registry = PatronRegistry::new(SecondsRange::new(180, 3600), SecondsRange::new(600, 1800), 2);

    let visits = registry.plan(&roster, &mut StdRng::seed_from_u64(11));
    assert_eq!(visits.len(), roster.len());
    assert_eq!(visits.iter().filter(|visit| visit.arrival == 0).count(), 2);

    for (visit, patron) in visits.iter().zip(&roster) {
        assert_eq!(visit.patron, *patron);
        assert!(visit.arrival == 0 || (180..=3600).contains(&visit.arrival));
        assert!((600..=1800).contains(&visit.stay));
    }
}

#[test]
fn plan_is_reproducible_from_a_seed() {
    let roster: Vec<PersonId> = (0..4).map(|_| PersonId::new()).collect();
    let registry = PatronRegistry::new(SecondsRange::new(180, 3600), SecondsRange::new(600, 1800), 1);

    let first = registry.plan(&roster, &mut StdRng::seed_from_u64(3));
    let second = registry.plan(&roster, &mut StdRng::seed_from_u64(3));
    assert_eq!(first, second);
}

#[test]
fn more_starters_than_patrons_is_fine() {
    let roster = vec![PersonId::new()];
    let registry = PatronRegistry::new(SecondsRange::new(180, 3600), SecondsRange::new(600, 1800), 4);

    let visits = registry.plan(&roster, &mut StdRng::seed_from_u64(1));
    assert_eq!(visits[0].arrival, 0);
}

#[test]
fn seeded_day_empties_the_room() {
    let (inn, _ids) = inn(
        Hero::default(),
        vec![chatty("Rook"), chatty("Wren"), chatty("Hal")],
    );
    let roster = inn.roster().to_vec();
    let (mut scheduler, _handle, _transcript) = scheduler(inn);

    let registry = PatronRegistry::new(SecondsRange::new(60, 600), SecondsRange::new(60, 600), 1);
    let visits = registry.plan(&roster, &mut StdRng::seed_from_u64(5));
    let last = visits.iter().map(Visit::ends_after).max().unwrap();

    registry.seed(&mut scheduler, &visits);
    scheduler.advance_to(last);

    assert_eq!(scheduler.world().patron_count(), 0);
    assert!(scheduler.is_empty());
}
