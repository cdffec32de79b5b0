use rand::Rng;

pub const DEFAULT_MONEY: u32 = 30;
pub const DEFAULT_CHARISMA: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hero {
    money: u32,
    charisma: i32,
}

impl Hero {
    pub fn new(money: u32, charisma: i32) -> Self {
        Self { money, charisma }
    }

    pub fn money(&self) -> u32 {
        self.money
    }

    pub fn charisma(&self) -> i32 {
        self.charisma
    }

    /// Pays `amount` if the purse covers it. Nothing is spent otherwise.
    pub fn spend(&mut self, amount: u32) -> bool {
        match self.money.checked_sub(amount) {
            Some(left) => {
                self.money = left;
                true
            }
            None => false,
        }
    }

    /// A d20 under charisma plus the listener's affinity wins a friendly reply.
    pub fn roll_charisma<R: Rng + ?Sized>(&self, affinity: i32, rng: &mut R) -> bool {
        let roll: i32 = rng.gen_range(1..=20);
        roll < self.charisma.saturating_add(affinity)
    }
}

impl Default for Hero {
    fn default() -> Self {
        Self::new(DEFAULT_MONEY, DEFAULT_CHARISMA)
    }
}
