use serde::{Deserialize, Serialize};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable};

/// A stored monster. Its stats are never changed by a battle; the engine
/// works on its own copy.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[diesel(table_name = crate::repository::schema::monsters)]
#[serde(rename_all = "camelCase")]
pub struct Monster {
    pub id: i32,
    pub name: String,
    pub image_url: String,
    pub attack: i32,
    pub defense: i32,
    pub hp: i32,
    pub speed: i32,
    pub created_at: Option<chrono::NaiveDateTime>,
    pub updated_at: Option<chrono::NaiveDateTime>,
}

/// Payload for creating or replacing a monster. Also the row type of the CSV import.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = crate::repository::schema::monsters)]
#[serde(rename_all = "camelCase")]
pub struct NewMonster {
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    pub attack: i32,
    pub defense: i32,
    pub hp: i32,
    pub speed: i32,
}

impl NewMonster {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Monster name is required".to_string());
        }
        let stats = [
            ("attack", self.attack),
            ("defense", self.defense),
            ("hp", self.hp),
            ("speed", self.speed),
        ];
        for (stat, value) in stats {
            if value < 0 {
                return Err(format!("Monster {stat} must not be negative"));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::repository::schema::monsters)]
pub struct MonsterChanges {
    pub name: String,
    pub image_url: String,
    pub attack: i32,
    pub defense: i32,
    pub hp: i32,
    pub speed: i32,
    pub updated_at: chrono::NaiveDateTime,
}

impl MonsterChanges {
    pub fn new(monster: NewMonster, updated_at: chrono::NaiveDateTime) -> Self {
        MonsterChanges {
            name: monster.name,
            image_url: monster.image_url,
            attack: monster.attack,
            defense: monster.defense,
            hp: monster.hp,
            speed: monster.speed,
            updated_at,
        }
    }

    pub fn apply_to(self, monster: &mut Monster) {
        monster.name = self.name;
        monster.image_url = self.image_url;
        monster.attack = self.attack;
        monster.defense = self.defense;
        monster.hp = self.hp;
        monster.speed = self.speed;
        monster.updated_at = Some(self.updated_at);
    }
}
