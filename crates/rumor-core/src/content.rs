//! Inn content as authored in TOML: who works there, who drops by, and what
//! they have to say.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{ConfigError, GameConfig};
use crate::inn::{Hero, Inn, MessageTable, Person, Room};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomContent {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonContent {
    pub name: String,
    #[serde(default)]
    pub far: String,
    #[serde(default)]
    pub near: String,
    #[serde(default)]
    pub affinity: i32,
    #[serde(default)]
    pub positive: Vec<String>,
    #[serde(default)]
    pub negative: Vec<String>,
}

impl PersonContent {
    fn into_person(self, innkeeper: bool) -> Person {
        let person = if innkeeper {
            Person::innkeeper(self.name, self.affinity)
        } else {
            Person::patron(self.name, self.affinity)
        };
        person
            .with_descriptions(self.far, self.near)
            .with_messages(MessageTable::new(self.positive, self.negative))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InnContent {
    pub name: String,
    #[serde(default)]
    pub intro: String,
    pub room: RoomContent,
    pub innkeeper: PersonContent,
    #[serde(default)]
    pub patrons: Vec<PersonContent>,
}

impl InnContent {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let content: InnContent = toml::from_str(input)?;
        if content.innkeeper.name.trim().is_empty() {
            return Err(ConfigError::Invalid("the innkeeper needs a name".into()));
        }
        Ok(content)
    }

    /// Builds the inn with every patron registered but none in the room yet.
    pub fn build(self, config: &GameConfig, rng: StdRng) -> Inn {
        let room = Room::new(self.room.name, self.room.description);
        let hero = Hero::new(config.hero_money, config.hero_charisma);
        let innkeeper = self.innkeeper.into_person(true);

        let mut inn = Inn::new(self.name, self.intro, room, innkeeper, hero, rng)
            .with_rebuke_limit(config.rebuke_limit);

        for patron in self.patrons {
            inn.register(patron.into_person(false));
        }

        info!(inn = inn.name(), patrons = inn.roster().len(), "inn built");
        inn
    }
}
