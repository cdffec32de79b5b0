//! Rumor Mill: a discrete-event text adventure set in a single inn.
//!
//! The [`scheduler`] orders every timed action in the game, whether typed by
//! the player or generated internally (patrons arriving and departing), and
//! fires them against the [`inn`] in simulated-time order.

pub mod clock;
pub mod command;
pub mod commands;
pub mod config;
pub mod content;
pub mod factory;
pub mod ids;
pub mod inn;
pub mod parser;
pub mod registry;
pub mod scheduler;

pub use clock::{GameClock, Seconds};
pub use command::{BoxedCommand, Command, Context, Narrator, Timing, Transcript, UsageError};
pub use config::{ConfigError, GameConfig, SecondsRange};
pub use content::InnContent;
pub use factory::{CommandFactory, CommandName};
pub use ids::PersonId;
pub use inn::{Hero, Inn, MessageTable, Person, Polarity, Role, Room, RoomError};
pub use parser::{CommandParser, ParseError};
pub use registry::{PatronRegistry, SeedRejection, SeedReport};
pub use scheduler::{Pending, Scheduler, SchedulerError, SchedulerHandle, Step};
