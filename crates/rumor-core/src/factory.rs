use std::fmt::Display;

use crate::command::BoxedCommand;
use crate::commands::{
    BRIBE_DESCRIPTION, BUY_DESCRIPTION, BribeCommand, BuyCommand, HELP_DESCRIPTION, HelpCommand,
    INSPECT_DESCRIPTION, INVENTORY_DESCRIPTION, InspectCommand, InventoryCommand,
    LOOK_DESCRIPTION, LookCommand, QUIT_DESCRIPTION, QuitCommand, TALK_DESCRIPTION, TalkCommand,
    WAIT_DESCRIPTION, WaitCommand,
};
use crate::inn::Inn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    Bribe,
    Buy,
    Help,
    Inspect,
    Inventory,
    Look,
    Quit,
    Talk,
    Wait,
}

/// Every word the player may start a line with. Several words can map to
/// the same command.
const KEYWORDS: &[(&str, CommandName)] = &[
    ("BRIBE", CommandName::Bribe),
    ("BUY", CommandName::Buy),
    ("ORDER", CommandName::Buy),
    ("HELP", CommandName::Help),
    ("INSPECT", CommandName::Inspect),
    ("INVENTORY", CommandName::Inventory),
    ("LOOK", CommandName::Look),
    ("QUIT", CommandName::Quit),
    ("EXIT", CommandName::Quit),
    ("TALK", CommandName::Talk),
    ("WAIT", CommandName::Wait),
];

impl Display for CommandName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl CommandName {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandName::Bribe => "Bribe",
            CommandName::Buy => "Buy",
            CommandName::Help => "Help",
            CommandName::Inspect => "Inspect",
            CommandName::Inventory => "Inventory",
            CommandName::Look => "Look",
            CommandName::Quit => "Quit",
            CommandName::Talk => "Talk",
            CommandName::Wait => "Wait",
        }
    }

    /// Case-insensitive keyword lookup.
    pub fn lookup(word: &str) -> Option<CommandName> {
        KEYWORDS
            .iter()
            .find(|(keyword, _)| keyword.eq_ignore_ascii_case(word))
            .map(|(_, name)| *name)
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommandName::Bribe => BRIBE_DESCRIPTION,
            CommandName::Buy => BUY_DESCRIPTION,
            CommandName::Help => HELP_DESCRIPTION,
            CommandName::Inspect => INSPECT_DESCRIPTION,
            CommandName::Inventory => INVENTORY_DESCRIPTION,
            CommandName::Look => LOOK_DESCRIPTION,
            CommandName::Quit => QUIT_DESCRIPTION,
            CommandName::Talk => TALK_DESCRIPTION,
            CommandName::Wait => WAIT_DESCRIPTION,
        }
    }
}

/// Builds fresh, uninitialized player commands by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandFactory;

impl CommandFactory {
    pub fn new() -> Self {
        Self
    }

    pub fn create(&self, name: CommandName) -> BoxedCommand<Inn> {
        match name {
            CommandName::Bribe => Box::new(BribeCommand::new()),
            CommandName::Buy => Box::new(BuyCommand::new()),
            CommandName::Help => Box::new(HelpCommand::new(self.catalog())),
            CommandName::Inspect => Box::new(InspectCommand::new()),
            CommandName::Inventory => Box::new(InventoryCommand),
            CommandName::Look => Box::new(LookCommand),
            CommandName::Quit => Box::new(QuitCommand),
            CommandName::Talk => Box::new(TalkCommand::new()),
            CommandName::Wait => Box::new(WaitCommand::new()),
        }
    }

    /// Keyword and description for every accepted word, in help order.
    pub fn catalog(&self) -> Vec<(&'static str, &'static str)> {
        KEYWORDS
            .iter()
            .map(|(keyword, name)| (*keyword, name.description()))
            .collect()
    }
}
