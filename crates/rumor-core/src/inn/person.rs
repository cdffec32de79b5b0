use crate::ids::PersonId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Innkeeper,
    Patron,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

impl From<bool> for Polarity {
    fn from(friendly: bool) -> Self {
        if friendly {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }
}

/// Ordered friendly and unfriendly lines a person can say, each with its own
/// cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageTable {
    positive: Vec<String>,
    negative: Vec<String>,
    next_positive: usize,
    next_negative: usize,
}

impl MessageTable {
    pub fn new(positive: Vec<String>, negative: Vec<String>) -> Self {
        Self {
            positive,
            negative,
            next_positive: 0,
            next_negative: 0,
        }
    }

    /// Returns the next unread message of the given polarity, if any remain.
    pub fn next(&mut self, polarity: Polarity) -> Option<String> {
        let (messages, cursor) = match polarity {
            Polarity::Positive => (&self.positive, &mut self.next_positive),
            Polarity::Negative => (&self.negative, &mut self.next_negative),
        };
        let message = messages.get(*cursor)?.clone();
        *cursor += 1;
        Some(message)
    }

    pub fn reset(&mut self, polarity: Polarity) {
        match polarity {
            Polarity::Positive => self.next_positive = 0,
            Polarity::Negative => self.next_negative = 0,
        }
    }

    pub fn remaining(&self, polarity: Polarity) -> usize {
        match polarity {
            Polarity::Positive => self.positive.len().saturating_sub(self.next_positive),
            Polarity::Negative => self.negative.len().saturating_sub(self.next_negative),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub role: Role,
    pub far_description: String,
    pub near_description: String,
    pub affinity: i32,
    pub messages: MessageTable,
}

impl Person {
    pub fn new(name: impl Into<String>, role: Role, affinity: i32) -> Self {
        Self {
            id: PersonId::new(),
            name: name.into(),
            role,
            far_description: String::new(),
            near_description: String::new(),
            affinity,
            messages: MessageTable::default(),
        }
    }

    pub fn patron(name: impl Into<String>, affinity: i32) -> Self {
        Self::new(name, Role::Patron, affinity)
    }

    pub fn innkeeper(name: impl Into<String>, affinity: i32) -> Self {
        Self::new(name, Role::Innkeeper, affinity)
    }

    pub fn with_descriptions(mut self, far: impl Into<String>, near: impl Into<String>) -> Self {
        self.far_description = far.into();
        self.near_description = near.into();
        self
    }

    pub fn with_messages(mut self, messages: MessageTable) -> Self {
        self.messages = messages;
        self
    }

    pub fn is_innkeeper(&self) -> bool {
        self.role == Role::Innkeeper
    }

    pub fn adjust_affinity(&mut self, delta: i32) {
        self.affinity = self.affinity.saturating_add(delta);
    }

    /// Next thing this person says. The innkeeper starts over when a table
    /// runs dry; a patron who runs dry has nothing more to say.
    pub fn next_message(&mut self, polarity: Polarity) -> Option<String> {
        match self.messages.next(polarity) {
            Some(message) => Some(message),
            None if self.is_innkeeper() => {
                self.messages.reset(polarity);
                self.messages.next(polarity)
            }
            None => None,
        }
    }
}
