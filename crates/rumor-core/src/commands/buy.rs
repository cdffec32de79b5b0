//! Food and drink: the cheapest way to make friends in a tavern.

use tracing::debug;

use crate::command::{Command, Context, Timing, UsageError};
use crate::ids::PersonId;
use crate::inn::Inn;

use super::talk::NOT_FOUND;

pub const BUY_DESCRIPTION: &str = "Buy drinks or food for yourself, a Patron, or for everyone.";
const BUY_USAGE: &str = "BUY (DRINKS | FOOD) [FOR (<Name> | ALL)]";

/// The innkeeper gains this much per patron served.
const INNKEEPER_AFFINITY: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Product {
    Drink,
    Food,
}

impl Product {
    pub fn parse(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("DRINK") || word.eq_ignore_ascii_case("DRINKS") {
            Some(Product::Drink)
        } else if word.eq_ignore_ascii_case("FOOD") {
            Some(Product::Food)
        } else {
            None
        }
    }

    pub fn price(self) -> u32 {
        match self {
            Product::Drink => 1,
            Product::Food => 6,
        }
    }

    /// Affinity a patron gains from being served.
    pub fn affinity(self) -> i32 {
        match self {
            Product::Drink => 1,
            Product::Food => 3,
        }
    }

    pub fn timing(self) -> Timing {
        match self {
            Product::Drink => Timing::new(10, 60),
            Product::Food => Timing::new(30, 300),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    Hero,
    Named(String),
    All,
}

#[derive(Debug, Clone)]
pub struct BuyCommand {
    product: Product,
    recipient: Recipient,
}

impl BuyCommand {
    pub fn new() -> Self {
        Self {
            product: Product::Drink,
            recipient: Recipient::Hero,
        }
    }

    pub fn product(&self) -> Product {
        self.product
    }

    pub fn recipient(&self) -> &Recipient {
        &self.recipient
    }

    fn buy_for_hero(&self, ctx: &mut Context<'_, Inn>) -> bool {
        let inn = ctx.world_mut();
        inn.room_mut().set_busy(None);

        let keeper = inn.innkeeper_id();
        let paid = inn.hero_mut().spend(self.product.price());
        let delta = if paid {
            INNKEEPER_AFFINITY
        } else {
            -INNKEEPER_AFFINITY
        };
        adjust(inn, keeper, delta);
        let name = inn.name_of(keeper).to_owned();

        if paid {
            ctx.say("Aaaaaahh! That's good!");
            ctx.say(format!("{name}: Good doing business with you."));
        } else {
            ctx.say("You don't have enough money!");
            ctx.say(format!(
                "{name}: Get on with you and bother someone else, you penniless beggar!"
            ));
        }
        true
    }

    fn buy_for(&self, ctx: &mut Context<'_, Inn>, target: &str) -> bool {
        let Some(id) = ctx.world().find_present(target) else {
            ctx.say(NOT_FOUND);
            return false;
        };

        let inn = ctx.world_mut();
        let keeper = inn.innkeeper_id();
        if id == keeper {
            let name = inn.name_of(keeper).to_owned();
            ctx.say(format!(
                "{name}: I have all I need. How about buying for someone else instead?"
            ));
            return false;
        }

        if !inn.hero_mut().spend(self.product.price()) {
            ctx.say("You don't have enough money!");
            return false;
        }

        // Served patrons stay put until the hero moves on.
        inn.room_mut().set_busy(Some(id));
        adjust(inn, id, self.product.affinity());
        adjust(inn, keeper, INNKEEPER_AFFINITY);

        let name = inn.name_of(id).to_owned();
        ctx.say(format!("{name}: Oh, thanks! I can really use that!"));
        true
    }

    fn buy_for_all(&self, ctx: &mut Context<'_, Inn>) -> bool {
        let inn = ctx.world_mut();
        let patrons = inn.patron_count();
        if patrons == 0 {
            ctx.say("There are no Patrons in the Inn right now.");
            return true;
        }

        let served = u32::try_from(patrons).unwrap_or(u32::MAX);
        let bill = served.saturating_mul(self.product.price());
        debug!(patrons, bill, "round for the house");

        if !inn.hero_mut().spend(bill) {
            inn.adjust_all_affinities(-self.product.affinity());
            ctx.say("You don't have enough money!");
            ctx.say("All the people boo, including the Innkeeper!");
            return false;
        }

        inn.adjust_all_affinities(self.product.affinity());
        let keeper = inn.innkeeper_id();
        let bonus = i32::try_from(served)
            .unwrap_or(i32::MAX)
            .saturating_mul(INNKEEPER_AFFINITY);
        adjust(inn, keeper, bonus);

        let name = inn.name_of(keeper).to_owned();
        ctx.say("All the people cheer, including the Innkeeper!");
        ctx.say(format!("{name} smiles broadly."));
        true
    }
}

impl Default for BuyCommand {
    fn default() -> Self {
        Self::new()
    }
}

fn adjust(inn: &mut Inn, id: PersonId, delta: i32) {
    if let Some(person) = inn.person_mut(id) {
        person.adjust_affinity(delta);
    }
}

impl Command<Inn> for BuyCommand {
    fn name(&self) -> &'static str {
        "Buy"
    }

    fn description(&self) -> &'static str {
        BUY_DESCRIPTION
    }

    fn usage(&self) -> Option<&'static str> {
        Some(BUY_USAGE)
    }

    fn timing(&self) -> Timing {
        self.product.timing()
    }

    fn init(&mut self, args: &[&str]) -> Result<(), UsageError> {
        let syntax = UsageError::Syntax { usage: BUY_USAGE };

        let (product, recipient) = match args {
            [product] => (product, Recipient::Hero),
            [product, keyword, target] if keyword.eq_ignore_ascii_case("FOR") => {
                let recipient = if target.eq_ignore_ascii_case("ALL") {
                    Recipient::All
                } else {
                    Recipient::Named((*target).to_owned())
                };
                (product, recipient)
            }
            _ => return Err(syntax),
        };

        self.product = Product::parse(product).ok_or(syntax)?;
        self.recipient = recipient;
        Ok(())
    }

    fn exec(&mut self, ctx: &mut Context<'_, Inn>) -> bool {
        match &self.recipient {
            Recipient::Hero => self.buy_for_hero(ctx),
            Recipient::Named(target) => self.buy_for(ctx, target),
            Recipient::All => self.buy_for_all(ctx),
        }
    }
}
