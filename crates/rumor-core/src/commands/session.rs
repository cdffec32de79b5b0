use tracing::info;

use crate::command::{Command, Context, Timing};
use crate::inn::Inn;

pub const HELP_DESCRIPTION: &str = "List all commands and what they do.";
pub const QUIT_DESCRIPTION: &str = "End the game and leave the Inn.";

/// Lists the player commands. Built by the factory from its catalog.
#[derive(Debug, Clone, Default)]
pub struct HelpCommand {
    entries: Vec<(&'static str, &'static str)>,
}

impl HelpCommand {
    pub fn new(entries: Vec<(&'static str, &'static str)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(&'static str, &'static str)] {
        &self.entries
    }
}

impl Command<Inn> for HelpCommand {
    fn name(&self) -> &'static str {
        "Help"
    }

    fn description(&self) -> &'static str {
        HELP_DESCRIPTION
    }

    fn timing(&self) -> Timing {
        Timing::IMMEDIATE
    }

    fn exec(&mut self, ctx: &mut Context<'_, Inn>) -> bool {
        let width = self
            .entries
            .iter()
            .map(|(keyword, _)| keyword.len())
            .max()
            .unwrap_or(0);

        for (keyword, description) in &self.entries {
            ctx.say(format!("{keyword:<width$}  {description}"));
        }
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QuitCommand;

impl Command<Inn> for QuitCommand {
    fn name(&self) -> &'static str {
        "Quit"
    }

    fn description(&self) -> &'static str {
        QUIT_DESCRIPTION
    }

    fn timing(&self) -> Timing {
        Timing::IMMEDIATE
    }

    fn exec(&mut self, ctx: &mut Context<'_, Inn>) -> bool {
        info!(now = ctx.now(), "player quit");
        ctx.say("You drain your mug and head out into the night. Farewell!");
        ctx.quit();
        true
    }
}
