use tracing::{debug, info};

use crate::command::{Command, Context, Timing, UsageError};
use crate::inn::{Inn, Polarity};

use super::talk::NOT_FOUND;

pub const BRIBE_DESCRIPTION: &str = "Bribe a Patron to get a positive message.";
const BRIBE_USAGE: &str = "BRIBE (<Name> | INNKEEPER)";

/// Smallest bribe anyone accepts.
pub const MIN_BRIBE: u32 = 2;

/// What it costs to buy a friendly answer from someone with `affinity`.
pub fn bribe_cost(affinity: i32) -> u32 {
    let owed = affinity.saturating_neg().max(0);
    u32::try_from(owed).unwrap_or(u32::MAX).max(MIN_BRIBE)
}

#[derive(Debug, Clone, Default)]
pub struct BribeCommand {
    target: Option<String>,
}

impl BribeCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command<Inn> for BribeCommand {
    fn name(&self) -> &'static str {
        "Bribe"
    }

    fn description(&self) -> &'static str {
        BRIBE_DESCRIPTION
    }

    fn usage(&self) -> Option<&'static str> {
        Some(BRIBE_USAGE)
    }

    fn timing(&self) -> Timing {
        Timing::new(10, 30)
    }

    fn init(&mut self, args: &[&str]) -> Result<(), UsageError> {
        let [target] = args else {
            return Err(UsageError::Syntax { usage: BRIBE_USAGE });
        };
        self.target = Some((*target).to_owned());
        Ok(())
    }

    fn exec(&mut self, ctx: &mut Context<'_, Inn>) -> bool {
        let Some(id) = self
            .target
            .as_deref()
            .and_then(|target| ctx.world().find_present(target))
        else {
            ctx.say(NOT_FOUND);
            return false;
        };

        let inn = ctx.world_mut();
        inn.room_mut().set_busy(Some(id));

        let affinity = inn.person(id).map_or(0, |person| person.affinity);
        let cost = bribe_cost(affinity);
        if !inn.hero_mut().spend(cost) {
            ctx.say("You don't have enough money for the bribe!");
            return false;
        }
        debug!(person = %id, cost, "bribe paid");

        let name = inn.name_of(id).to_owned();
        let message = inn
            .person_mut(id)
            .and_then(|person| person.next_message(Polarity::Positive));

        match message {
            Some(message) => ctx.say(format!("{name}:\t{message}")),
            None => {
                // Told everything they know; they take the coin and go.
                let inn = ctx.world_mut();
                inn.room_mut().set_busy(None);
                if inn.depart(id).is_ok() {
                    info!(person = %id, "patron left after bribe");
                    ctx.say(format!("{name} pockets the coin and slips out the door."));
                }
            }
        }
        true
    }
}
