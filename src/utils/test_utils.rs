use std::sync::Arc;

use actix_web::web::Data;

use crate::engine::battle_engine;
use crate::models::battle::{Battle, NewBattle};
use crate::models::monster::{Monster, NewMonster};
use crate::repository::{BattleOfMonstersRepository, MemoryStore, RepositoryError, Result, Storage};

pub fn storage_data(store: &MemoryStore) -> Data<dyn Storage> {
    let storage: Arc<dyn Storage> = Arc::new(store.clone());
    Data::from(storage)
}

fn test_monster(name: &str, attack: i32, defense: i32, hp: i32, speed: i32) -> NewMonster {
    NewMonster {
        name: name.to_string(),
        image_url: format!("https://example.com/monsters/{}.png", name.to_lowercase().replace(' ', "-")),
        attack,
        defense,
        hp,
        speed,
    }
}

pub fn test_monsters() -> Vec<NewMonster> {
    vec![
        test_monster("Dead Unicorn", 60, 40, 15, 80),
        test_monster("Old Shark", 50, 20, 100, 90),
        test_monster("Red Dragon", 90, 80, 90, 70),
        test_monster("Robot Bear", 50, 40, 80, 60),
        test_monster("Angel", 45, 35, 70, 60),
        test_monster("Wolf", 45, 25, 60, 80),
        test_monster("Sea Serpent", 70, 30, 90, 50),
    ]
}

pub fn init_test_monsters(store: &MemoryStore) -> Vec<Monster> {
    let mut repository = store.repository().unwrap();
    let monsters = test_monsters()
        .into_iter()
        .map(|monster| repository.save_monster(monster).unwrap())
        .collect();
    repository.commit_changes().unwrap();
    monsters
}

pub fn init_test_battle(store: &MemoryStore) -> Battle {
    let monsters = init_test_monsters(store);
    let mut repository = store.repository().unwrap();
    let battle = repository
        .save_battle(NewBattle {
            monster_a: monsters[2].id,
            monster_b: monsters[3].id,
            winner: battle_engine::resolve(&monsters[2], &monsters[3]),
        })
        .unwrap();
    repository.commit_changes().unwrap();
    battle
}

/// Storage whose every unit of work fails to open.
pub struct FailingStorage;

impl FailingStorage {
    pub fn data() -> Data<dyn Storage> {
        let storage: Arc<dyn Storage> = Arc::new(FailingStorage);
        Data::from(storage)
    }
}

impl Storage for FailingStorage {
    fn repository(&self) -> Result<Box<dyn BattleOfMonstersRepository>> {
        Err(RepositoryError::LockPoisoned)
    }
}
