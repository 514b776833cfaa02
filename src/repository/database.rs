use diesel::connection::{AnsiTransactionManager, TransactionManager};
use diesel::r2d2::{self, ConnectionManager};
use diesel::PgConnection;
use tracing::warn;

use crate::models::battle::{Battle, NewBattle};
use crate::models::monster::{Monster, NewMonster};
use crate::repository::error::Result;
use crate::repository::{battle_repository, monster_repository, BattleOfMonstersRepository, Storage};

type DBPool = r2d2::Pool<ConnectionManager<PgConnection>>;
type DBConnection = r2d2::PooledConnection<ConnectionManager<PgConnection>>;

/// Postgres storage backed by an r2d2 connection pool.
pub struct Database {
    pool: DBPool,
}

impl Database {
    pub fn new(database_url: &str, pool_size: u32) -> Result<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool: DBPool = r2d2::Pool::builder()
            .max_size(pool_size)
            .build(manager)?;
        Ok(Database { pool })
    }

    pub fn get_connection(&self) -> Result<DBConnection> {
        Ok(self.pool.get()?)
    }
}

impl Storage for Database {
    fn repository(&self) -> Result<Box<dyn BattleOfMonstersRepository>> {
        Ok(Box::new(PgRepository {
            connection: self.get_connection()?,
            in_transaction: false,
        }))
    }
}

/// Unit of work over a single pooled connection. The transaction is opened
/// on the first write, so read-only requests never hold one.
pub struct PgRepository {
    connection: DBConnection,
    in_transaction: bool,
}

impl PgRepository {
    fn reader(&mut self) -> &mut PgConnection {
        &mut *self.connection
    }

    fn writer(&mut self) -> Result<&mut PgConnection> {
        if !self.in_transaction {
            AnsiTransactionManager::begin_transaction(&mut *self.connection)?;
            self.in_transaction = true;
        }
        Ok(&mut *self.connection)
    }
}

impl BattleOfMonstersRepository for PgRepository {
    fn list_monsters(&mut self) -> Result<Vec<Monster>> {
        monster_repository::get_monsters(self.reader())
    }

    fn find_monster(&mut self, id: i32) -> Result<Option<Monster>> {
        monster_repository::get_monster_by_id(self.reader(), id)
    }

    fn save_monster(&mut self, monster: NewMonster) -> Result<Monster> {
        monster_repository::create_monster(self.writer()?, &monster)
    }

    fn update_monster(&mut self, id: i32, monster: NewMonster) -> Result<Monster> {
        monster_repository::update_monster_by_id(self.writer()?, id, monster)
    }

    fn delete_monster(&mut self, id: i32) -> Result<()> {
        monster_repository::delete_monster_by_id(self.writer()?, id)
    }

    fn list_battles(&mut self) -> Result<Vec<Battle>> {
        battle_repository::get_battles(self.reader())
    }

    fn find_battle(&mut self, id: i32) -> Result<Option<Battle>> {
        battle_repository::get_battle_by_id(self.reader(), id)
    }

    fn save_battle(&mut self, battle: NewBattle) -> Result<Battle> {
        battle_repository::create_battle(self.writer()?, &battle)
    }

    fn delete_battle(&mut self, id: i32) -> Result<()> {
        battle_repository::delete_battle_by_id(self.writer()?, id)
    }

    fn commit_changes(&mut self) -> Result<()> {
        if self.in_transaction {
            AnsiTransactionManager::commit_transaction(&mut *self.connection)?;
            self.in_transaction = false;
        }
        Ok(())
    }
}

impl Drop for PgRepository {
    fn drop(&mut self) {
        if self.in_transaction {
            if let Err(err) = AnsiTransactionManager::rollback_transaction(&mut *self.connection) {
                warn!(error = %err, "failed to roll back uncommitted changes");
            }
        }
    }
}
