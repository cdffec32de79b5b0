mod common;

use rumor_core::commands::{
    BribeCommand, BuyCommand, DEFAULT_WAIT, InspectCommand, InventoryCommand, LookCommand,
    QuitCommand, TalkCommand, WaitCommand, bribe_cost,
};
use rumor_core::{
    BoxedCommand, Command, CommandFactory, CommandName, Hero, Inn, MessageTable, Person,
    Scheduler, Step, UsageError,
};

use common::{ROOM_DESCRIPTION, chatty, seated, silent};

fn init(mut command: BoxedCommand<Inn>, args: &[&str]) -> BoxedCommand<Inn> {
    command.init(args).unwrap();
    command
}

/// Fires `command` and reports whether it completed.
fn fire(scheduler: &mut Scheduler<Inn>, command: BoxedCommand<Inn>) -> bool {
    scheduler.sched(command);
    match scheduler.step() {
        Some(Step::Fired { completed, .. }) => completed,
        other => panic!("expected a fired command, got {other:?}"),
    }
}

fn affinity(scheduler: &Scheduler<Inn>, name: &str) -> i32 {
    let inn = scheduler.world();
    let id = inn.find_present(name).unwrap();
    inn.person(id).unwrap().affinity
}

#[test]
fn talk_requires_to_or_with_and_a_name() {
    let cases: [&[&str]; 4] = [&[], &["Rook"], &["ABOUT", "Rook"], &["TO", "PATRON"]];
    for args in cases {
        let err = TalkCommand::new().init(args).unwrap_err();
        assert!(matches!(err, UsageError::Syntax { .. }), "{args:?}");
    }

    assert!(TalkCommand::new().init(&["with", "Rook"]).is_ok());
    assert!(TalkCommand::new().init(&["TO", "INNKEEPER"]).is_ok());
}

#[test]
fn talk_to_innkeeper_marks_busy_and_answers() {
    let (mut scheduler, _ids, transcript) = seated(Hero::default(), vec![]);
    let keeper = scheduler.world().innkeeper_id();

    assert!(fire(&mut scheduler, init(Box::new(TalkCommand::new()), &["TO", "innkeeper"])));
    assert_eq!(scheduler.world().room().busy(), Some(keeper));
    assert!(transcript.contains("Maud:\twarm") || transcript.contains("Maud:\tcold"));
}

#[test]
fn innkeeper_never_runs_out_of_things_to_say() {
    let (mut scheduler, _ids, transcript) = seated(Hero::default(), vec![]);

    for _ in 0..5 {
        assert!(fire(&mut scheduler, init(Box::new(TalkCommand::new()), &["TO", "Maud"])));
    }
    assert_eq!(transcript.lines().len(), 5);
    assert_eq!(scheduler.world().rebukes(), 0);
}

#[test]
fn talk_to_someone_absent_fails() {
    let (mut scheduler, _ids, transcript) = seated(Hero::default(), vec![]);

    assert!(!fire(&mut scheduler, init(Box::new(TalkCommand::new()), &["TO", "Rook"])));
    assert!(transcript.contains("Can't find that person"));
    assert_eq!(scheduler.world().room().busy(), None);
}

#[test]
fn patron_with_nothing_to_say_storms_out() {
    let (mut scheduler, ids, transcript) = seated(Hero::default(), vec![silent("Hal")]);

    assert!(fire(&mut scheduler, init(Box::new(TalkCommand::new()), &["TO", "Hal"])));
    assert!(transcript.contains("Hal stomps out of the building in annoyance."));
    assert!(!scheduler.world().is_present(ids[0]));
    assert_eq!(scheduler.world().room().busy(), None);
    assert_eq!(scheduler.world().rebukes(), 1);
    assert!(!scheduler.is_stopped());
}

#[test]
fn too_many_rebukes_end_the_game() {
    let (mut scheduler, _ids, transcript) =
        seated(Hero::default(), vec![silent("Hal"), silent("Dagny")]);

    fire(&mut scheduler, init(Box::new(TalkCommand::new()), &["TO", "Hal"]));
    fire(&mut scheduler, init(Box::new(TalkCommand::new()), &["WITH", "Dagny"]));

    assert_eq!(scheduler.world().rebukes(), 2);
    assert!(transcript.contains("GAME OVER!"));
    assert!(scheduler.is_stopped());
}

#[test]
fn buy_parses_product_and_recipient() {
    let mut buy = BuyCommand::new();
    buy.init(&["food", "FOR", "all"]).unwrap();
    assert_eq!(buy.timing().delay, 30);
    assert_eq!(buy.timing().duration, 300);

    buy.init(&["DRINK"]).unwrap();
    assert_eq!(buy.timing().delay, 10);
    assert_eq!(buy.timing().duration, 60);

    let bad: [&[&str]; 4] = [&["ALE"], &["DRINKS", "FOR"], &["DRINKS", "TO", "Rook"], &[]];
    for args in bad {
        assert!(BuyCommand::new().init(args).is_err(), "{args:?}");
    }
}

#[test]
fn buying_for_yourself_pleases_the_innkeeper() {
    let (mut scheduler, ids, _transcript) = seated(Hero::default(), vec![chatty("Rook")]);
    scheduler.world_mut().room_mut().set_busy(Some(ids[0]));

    assert!(fire(&mut scheduler, init(Box::new(BuyCommand::new()), &["DRINKS"])));
    assert_eq!(scheduler.world().hero().money(), 29);
    assert_eq!(affinity(&scheduler, "INNKEEPER"), 1);
    assert_eq!(scheduler.world().room().busy(), None);
}

#[test]
fn penniless_hero_annoys_the_innkeeper() {
    let (mut scheduler, _ids, transcript) = seated(Hero::new(0, 10), vec![]);

    assert!(fire(&mut scheduler, init(Box::new(BuyCommand::new()), &["FOOD"])));
    assert_eq!(affinity(&scheduler, "INNKEEPER"), -1);
    assert!(transcript.contains("You don't have enough money!"));
}

#[test]
fn buying_for_a_patron_keeps_them_around() {
    let (mut scheduler, ids, transcript) = seated(Hero::default(), vec![chatty("Rook")]);

    assert!(fire(
        &mut scheduler,
        init(Box::new(BuyCommand::new()), &["FOOD", "FOR", "rook"])
    ));
    assert_eq!(scheduler.world().hero().money(), 24);
    assert_eq!(affinity(&scheduler, "Rook"), 3);
    assert_eq!(affinity(&scheduler, "INNKEEPER"), 1);
    assert_eq!(scheduler.world().room().busy(), Some(ids[0]));
    assert!(transcript.contains("Rook: Oh, thanks!"));
}

#[test]
fn innkeeper_does_not_take_gifts() {
    let (mut scheduler, _ids, _transcript) = seated(Hero::default(), vec![]);

    assert!(!fire(
        &mut scheduler,
        init(Box::new(BuyCommand::new()), &["DRINKS", "FOR", "INNKEEPER"])
    ));
    assert_eq!(scheduler.world().hero().money(), 30);
}

#[test]
fn round_for_the_house() {
    let (mut scheduler, _ids, transcript) =
        seated(Hero::default(), vec![chatty("Rook"), chatty("Wren")]);

    assert!(fire(
        &mut scheduler,
        init(Box::new(BuyCommand::new()), &["FOOD", "FOR", "ALL"])
    ));
    assert_eq!(scheduler.world().hero().money(), 18);
    assert_eq!(affinity(&scheduler, "Rook"), 3);
    assert_eq!(affinity(&scheduler, "Wren"), 3);
    assert_eq!(affinity(&scheduler, "INNKEEPER"), 2);
    assert!(transcript.contains("All the people cheer"));
}

#[test]
fn unpaid_round_angers_everyone() {
    let (mut scheduler, _ids, transcript) =
        seated(Hero::new(5, 10), vec![chatty("Rook"), chatty("Wren")]);

    assert!(!fire(
        &mut scheduler,
        init(Box::new(BuyCommand::new()), &["FOOD", "FOR", "ALL"])
    ));
    assert_eq!(scheduler.world().hero().money(), 5);
    assert_eq!(affinity(&scheduler, "Rook"), -3);
    assert_eq!(affinity(&scheduler, "Wren"), -3);
    assert!(transcript.contains("boo"));
}

#[test]
fn round_in_an_empty_inn_costs_nothing() {
    let (mut scheduler, _ids, _transcript) = seated(Hero::default(), vec![]);

    assert!(fire(
        &mut scheduler,
        init(Box::new(BuyCommand::new()), &["DRINKS", "FOR", "ALL"])
    ));
    assert_eq!(scheduler.world().hero().money(), 30);
}

#[test]
fn bribe_costs_at_least_two() {
    assert_eq!(bribe_cost(5), 2);
    assert_eq!(bribe_cost(0), 2);
    assert_eq!(bribe_cost(-1), 2);
    assert_eq!(bribe_cost(-7), 7);
}

#[test]
fn bribe_forces_a_friendly_answer() {
    let grump = Person::patron("Dagny", -5)
        .with_messages(MessageTable::new(vec!["the ridge".into()], vec!["go away".into()]));
    let (mut scheduler, ids, transcript) = seated(Hero::default(), vec![grump]);

    assert!(fire(&mut scheduler, init(Box::new(BribeCommand::new()), &["Dagny"])));
    assert_eq!(scheduler.world().hero().money(), 25);
    assert!(transcript.contains("Dagny:\tthe ridge"));
    assert_eq!(scheduler.world().room().busy(), Some(ids[0]));
}

#[test]
fn bribe_without_the_money_fails() {
    let (mut scheduler, _ids, transcript) = seated(Hero::new(1, 10), vec![chatty("Rook")]);

    assert!(!fire(&mut scheduler, init(Box::new(BribeCommand::new()), &["Rook"])));
    assert_eq!(scheduler.world().hero().money(), 1);
    assert!(transcript.contains("not enough money for the bribe"));
}

#[test]
fn bribed_patron_with_no_secrets_left_slips_out() {
    let (mut scheduler, ids, transcript) = seated(Hero::default(), vec![silent("Hal")]);

    assert!(fire(&mut scheduler, init(Box::new(BribeCommand::new()), &["Hal"])));
    assert!(!scheduler.world().is_present(ids[0]));
    assert_eq!(scheduler.world().rebukes(), 0);
    assert!(transcript.contains("Hal pockets the coin"));
}

#[test]
fn wait_accepts_minutes_and_hours() {
    let mut wait = WaitCommand::new();
    wait.init(&[]).unwrap();
    assert_eq!(wait.span(), DEFAULT_WAIT);

    wait.init(&["30", "m"]).unwrap();
    assert_eq!(wait.timing().duration, 30 * 60);
    assert_eq!(wait.timing().delay, 0);

    wait.init(&["24", "HOURS"]).unwrap();
    assert_eq!(wait.span(), 24 * 3600);

    let bad: [&[&str]; 6] = [
        &["0", "MIN"],
        &["60", "MINUTES"],
        &["25", "HR"],
        &["3", "DAYS"],
        &["ten", "M"],
        &["10"],
    ];
    for args in bad {
        assert!(WaitCommand::new().init(args).is_err(), "{args:?}");
    }
}

#[test]
fn look_describes_the_room_and_everyone_in_it() {
    let (mut scheduler, _ids, transcript) = seated(Hero::default(), vec![chatty("Rook")]);

    assert!(fire(&mut scheduler, Box::new(LookCommand)));
    assert!(transcript.contains(ROOM_DESCRIPTION));
    assert!(transcript.contains("Maud: A woman behind the bar."));
    assert!(transcript.contains("Rook: Rook by the fire."));
}

#[test]
fn look_takes_no_parameters() {
    assert_eq!(
        LookCommand.init(&["around"]),
        Err(UsageError::NoParameters { name: "Look" })
    );
}

#[test]
fn inspect_shows_the_near_description() {
    let (mut scheduler, _ids, transcript) = seated(Hero::default(), vec![chatty("Rook")]);

    assert!(fire(&mut scheduler, init(Box::new(InspectCommand::new()), &["ROOK"])));
    assert!(transcript.contains("Rook: Rook up close."));

    assert!(!fire(&mut scheduler, init(Box::new(InspectCommand::new()), &["Wren"])));
    assert!(transcript.contains("I don't see that person here."));
}

#[test]
fn inventory_reports_money() {
    let (mut scheduler, _ids, transcript) = seated(Hero::new(12, 10), vec![]);

    assert!(fire(&mut scheduler, Box::new(InventoryCommand)));
    assert!(transcript.contains("Hero has 12 gold pieces."));
}

#[test]
fn help_lists_every_keyword() {
    let (mut scheduler, _ids, transcript) = seated(Hero::default(), vec![]);

    assert!(fire(&mut scheduler, CommandFactory::new().create(CommandName::Help)));
    let lines = transcript.lines();
    for keyword in ["BRIBE", "BUY", "ORDER", "HELP", "QUIT", "EXIT", "TALK", "WAIT"] {
        assert!(
            lines.iter().any(|line| line.starts_with(keyword)),
            "{keyword} missing"
        );
    }
}

#[test]
fn quit_stops_the_scheduler() {
    let (mut scheduler, _ids, transcript) = seated(Hero::default(), vec![]);

    assert!(fire(&mut scheduler, Box::new(QuitCommand)));
    assert!(scheduler.is_stopped());
    assert!(transcript.contains("Farewell"));
}
