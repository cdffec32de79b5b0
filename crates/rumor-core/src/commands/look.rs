use crate::command::{Command, Context, Timing, UsageError};
use crate::inn::Inn;

pub const LOOK_DESCRIPTION: &str = "Give a rough description of the Room and any People inside it.";
pub const INSPECT_DESCRIPTION: &str = "Look closely at the Innkeeper or a Patron.";
pub const INVENTORY_DESCRIPTION: &str = "Check how much money the Hero has available.";

const INSPECT_USAGE: &str = "INSPECT (<Name> | INNKEEPER)";

#[derive(Debug, Clone, Copy, Default)]
pub struct LookCommand;

impl Command<Inn> for LookCommand {
    fn name(&self) -> &'static str {
        "Look"
    }

    fn description(&self) -> &'static str {
        LOOK_DESCRIPTION
    }

    fn timing(&self) -> Timing {
        Timing::new(0, 4)
    }

    fn exec(&mut self, ctx: &mut Context<'_, Inn>) -> bool {
        let inn = ctx.world();
        let mut lines = vec![format!("{}: {}", inn.room().name, inn.room().description)];

        for id in inn.room().occupants() {
            if let Some(person) = inn.person(*id) {
                lines.push(format!("{}: {}", person.name, person.far_description));
            }
        }
        if inn.patron_count() == 0 {
            lines.push("There are no Patrons here.".to_owned());
        }

        for line in lines {
            ctx.say(line);
        }
        true
    }
}

#[derive(Debug, Clone, Default)]
pub struct InspectCommand {
    target: Option<String>,
}

impl InspectCommand {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command<Inn> for InspectCommand {
    fn name(&self) -> &'static str {
        "Inspect"
    }

    fn description(&self) -> &'static str {
        INSPECT_DESCRIPTION
    }

    fn usage(&self) -> Option<&'static str> {
        Some(INSPECT_USAGE)
    }

    fn timing(&self) -> Timing {
        Timing::new(0, 10)
    }

    fn init(&mut self, args: &[&str]) -> Result<(), UsageError> {
        let [target] = args else {
            return Err(UsageError::Syntax {
                usage: INSPECT_USAGE,
            });
        };
        self.target = Some((*target).to_owned());
        Ok(())
    }

    fn exec(&mut self, ctx: &mut Context<'_, Inn>) -> bool {
        let inn = ctx.world();
        let found = self
            .target
            .as_deref()
            .and_then(|target| inn.find_present(target))
            .and_then(|id| inn.person(id))
            .map(|person| format!("{}: {}", person.name, person.near_description));

        match found {
            Some(line) => {
                ctx.say(line);
                true
            }
            None => {
                ctx.say("I don't see that person here.");
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryCommand;

impl Command<Inn> for InventoryCommand {
    fn name(&self) -> &'static str {
        "Inventory"
    }

    fn description(&self) -> &'static str {
        INVENTORY_DESCRIPTION
    }

    fn timing(&self) -> Timing {
        Timing::new(0, 5)
    }

    fn exec(&mut self, ctx: &mut Context<'_, Inn>) -> bool {
        let money = ctx.world().hero().money();
        ctx.say(format!("Hero has {money} gold pieces."));
        true
    }
}
