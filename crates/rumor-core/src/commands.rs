//! Concrete commands over the [`Inn`](crate::inn::Inn): the internal patron
//! visit pair and everything the player can type.

mod bribe;
mod buy;
mod look;
mod session;
mod talk;
mod visit;
mod wait;

pub use bribe::{BRIBE_DESCRIPTION, BribeCommand, MIN_BRIBE, bribe_cost};
pub use buy::{BUY_DESCRIPTION, BuyCommand, Product, Recipient};
pub use look::{
    INSPECT_DESCRIPTION, INVENTORY_DESCRIPTION, InspectCommand, InventoryCommand,
    LOOK_DESCRIPTION, LookCommand,
};
pub use session::{HELP_DESCRIPTION, HelpCommand, QUIT_DESCRIPTION, QuitCommand};
pub use talk::{TALK_DESCRIPTION, TalkCommand};
pub use visit::{DEFAULT_RETRY_INTERVAL, ENTER, EnterCommand, LEAVE, LeaveCommand, Visit};
pub use wait::{DEFAULT_WAIT, WAIT_DESCRIPTION, WaitCommand};
