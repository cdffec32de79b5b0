use tracing::debug;

use crate::clock::{SECS_PER_HOUR, SECS_PER_MINUTE, Seconds};
use crate::command::{Command, Context, Timing, UsageError};
use crate::inn::Inn;

pub const WAIT_DESCRIPTION: &str = "Do nothing for the given amount of time.";
const WAIT_USAGE: &str = "WAIT [N (M | MIN | MINUTES)] | [N (H | HR | HOURS)], \
                          where 1 <= N <= 59 minutes or 1 <= N <= 24 hours";

/// A bare `WAIT` lets five minutes go by.
pub const DEFAULT_WAIT: Seconds = 5 * SECS_PER_MINUTE;

#[derive(Debug, Clone)]
pub struct WaitCommand {
    span: Seconds,
}

impl WaitCommand {
    pub fn new() -> Self {
        Self { span: DEFAULT_WAIT }
    }

    pub fn span(&self) -> Seconds {
        self.span
    }
}

impl Default for WaitCommand {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_span(amount: &str, unit: &str) -> Option<Seconds> {
    let amount: Seconds = amount.parse().ok()?;
    let is = |names: &[&str]| names.iter().any(|name| unit.eq_ignore_ascii_case(name));

    if is(&["M", "MIN", "MINUTES"]) && (1..60).contains(&amount) {
        Some(amount * SECS_PER_MINUTE)
    } else if is(&["H", "HR", "HOURS"]) && (1..=24).contains(&amount) {
        Some(amount * SECS_PER_HOUR)
    } else {
        None
    }
}

impl Command<Inn> for WaitCommand {
    fn name(&self) -> &'static str {
        "Wait"
    }

    fn description(&self) -> &'static str {
        WAIT_DESCRIPTION
    }

    fn usage(&self) -> Option<&'static str> {
        Some(WAIT_USAGE)
    }

    /// Waiting starts at once and occupies the hero for the whole span.
    fn timing(&self) -> Timing {
        Timing::new(0, self.span)
    }

    fn init(&mut self, args: &[&str]) -> Result<(), UsageError> {
        match args {
            [] => {
                self.span = DEFAULT_WAIT;
                Ok(())
            }
            [amount, unit] => {
                self.span =
                    parse_span(amount, unit).ok_or(UsageError::Syntax { usage: WAIT_USAGE })?;
                Ok(())
            }
            _ => Err(UsageError::Syntax { usage: WAIT_USAGE }),
        }
    }

    fn exec(&mut self, ctx: &mut Context<'_, Inn>) -> bool {
        debug!(span = self.span, "hero waits");
        let minutes = self.span / SECS_PER_MINUTE;
        ctx.say(format!("You wait for {minutes} minutes."));
        true
    }
}
