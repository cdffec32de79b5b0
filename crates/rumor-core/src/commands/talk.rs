use tracing::{debug, warn};

use crate::command::{Command, Context, Timing, UsageError};
use crate::ids::PersonId;
use crate::inn::{Inn, Polarity};

pub const TALK_DESCRIPTION: &str = "Talk to the Innkeeper, or talk to a Person by Name.";
const TALK_USAGE: &str = "TALK (TO | WITH) (<Name> | INNKEEPER)";

pub(crate) const NOT_FOUND: &str = "Can't find that person to talk with.";

#[derive(Debug, Clone, Default)]
pub struct TalkCommand {
    target: Option<String>,
}

impl TalkCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command<Inn> for TalkCommand {
    fn name(&self) -> &'static str {
        "Talk"
    }

    fn description(&self) -> &'static str {
        TALK_DESCRIPTION
    }

    fn usage(&self) -> Option<&'static str> {
        Some(TALK_USAGE)
    }

    fn timing(&self) -> Timing {
        Timing::new(0, 30)
    }

    fn init(&mut self, args: &[&str]) -> Result<(), UsageError> {
        let syntax = UsageError::Syntax { usage: TALK_USAGE };

        let [preposition, target] = args else {
            return Err(syntax);
        };
        if !preposition.eq_ignore_ascii_case("TO") && !preposition.eq_ignore_ascii_case("WITH") {
            return Err(syntax);
        }
        // "PATRON" is a keyword, not a name.
        if target.eq_ignore_ascii_case("PATRON") {
            return Err(syntax);
        }

        self.target = Some((*target).to_owned());
        Ok(())
    }

    fn exec(&mut self, ctx: &mut Context<'_, Inn>) -> bool {
        let Some(target) = self.target.as_deref() else {
            warn!("talk fired without a target");
            return false;
        };
        let Some(id) = ctx.world().find_present(target) else {
            ctx.say(NOT_FOUND);
            return false;
        };

        debug!(person = %id, "talking");
        let inn = ctx.world_mut();
        inn.room_mut().set_busy(Some(id));
        let polarity = Polarity::from(inn.roll_charisma(id));

        converse(ctx, id, polarity);
        true
    }
}

/// Has `id` answer the hero. A patron with nothing left to say storms out,
/// and too many of those ends the game.
pub(crate) fn converse(ctx: &mut Context<'_, Inn>, id: PersonId, polarity: Polarity) {
    let inn = ctx.world_mut();
    let name = inn.name_of(id).to_owned();
    let is_innkeeper = id == inn.innkeeper_id();
    let message = inn
        .person_mut(id)
        .and_then(|person| person.next_message(polarity));

    if let Some(message) = message {
        ctx.say(format!("{name}:\t{message}"));
        return;
    }
    if is_innkeeper {
        ctx.say(format!("{name} has nothing to say."));
        return;
    }

    match ctx.world_mut().rebuke(id) {
        Ok(rebuke) => {
            ctx.say(format!("{} stomps out of the building in annoyance.", rebuke.name));
            if rebuke.game_over {
                let keeper = ctx.world().name_of(ctx.world().innkeeper_id()).to_owned();
                ctx.say(format!(
                    "{keeper} has ejected you from the Inn for scaring away the customers!"
                ));
                ctx.say("GAME OVER!");
                ctx.quit();
            }
        }
        Err(err) => warn!(person = %id, error = %err, "rebuke failed"),
    }
}

