use std::fmt;

use crate::command::BoxedCommand;

pub(crate) enum SchedulerMessage<W> {
    Schedule(BoxedCommand<W>),
    Shutdown,
}

impl<W> fmt::Debug for SchedulerMessage<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedulerMessage::Schedule(command) => {
                f.debug_tuple("Schedule").field(command).finish()
            }
            SchedulerMessage::Shutdown => f.write_str("Shutdown"),
        }
    }
}
