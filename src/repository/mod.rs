//! Persistence for monsters and battles.
//!
//! A [`Storage`] hands out one [`BattleOfMonstersRepository`] per request.
//! The repository is a unit of work: writes stay pending until
//! [`BattleOfMonstersRepository::commit_changes`] and are discarded if it is
//! dropped first.

pub mod battle_repository;
pub mod database;
pub mod error;
pub mod memory;
pub mod monster_repository;
pub mod schema;

pub use database::Database;
pub use error::{RepositoryError, Result};
pub use memory::MemoryStore;

use crate::models::battle::{Battle, NewBattle};
use crate::models::monster::{Monster, NewMonster};

pub trait BattleOfMonstersRepository {
    fn list_monsters(&mut self) -> Result<Vec<Monster>>;
    fn find_monster(&mut self, id: i32) -> Result<Option<Monster>>;
    fn save_monster(&mut self, monster: NewMonster) -> Result<Monster>;
    /// Fails with [`RepositoryError::NotFound`] when no monster has this id.
    fn update_monster(&mut self, id: i32, monster: NewMonster) -> Result<Monster>;
    /// Fails with [`RepositoryError::NotFound`] when no monster has this id.
    fn delete_monster(&mut self, id: i32) -> Result<()>;

    fn list_battles(&mut self) -> Result<Vec<Battle>>;
    fn find_battle(&mut self, id: i32) -> Result<Option<Battle>>;
    fn save_battle(&mut self, battle: NewBattle) -> Result<Battle>;
    /// Fails with [`RepositoryError::NotFound`] when no battle has this id.
    fn delete_battle(&mut self, id: i32) -> Result<()>;

    /// Flushes every pending write.
    fn commit_changes(&mut self) -> Result<()>;
}

pub trait Storage: Send + Sync {
    fn repository(&self) -> Result<Box<dyn BattleOfMonstersRepository>>;
}
