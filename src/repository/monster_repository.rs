use chrono::prelude::*;
use diesel::prelude::*;
use diesel::PgConnection;
use crate::models::monster::{Monster, MonsterChanges, NewMonster};
use crate::repository::schema::monsters::dsl::*;
use crate::repository::error::{RepositoryError, Result};

pub fn get_monsters(connection: &mut PgConnection) -> Result<Vec<Monster>> {
    Ok(monsters.order(id.asc()).load::<Monster>(connection)?)
}

pub fn get_monster_by_id(connection: &mut PgConnection, monster_id: i32) -> Result<Option<Monster>> {
    Ok(monsters.find(monster_id).first::<Monster>(connection).optional()?)
}

pub fn create_monster(connection: &mut PgConnection, monster: &NewMonster) -> Result<Monster> {
    Ok(diesel::insert_into(monsters)
        .values(monster)
        .get_result::<Monster>(connection)?)
}

pub fn update_monster_by_id(
    connection: &mut PgConnection,
    monster_id: i32,
    monster: NewMonster,
) -> Result<Monster> {
    let changes = MonsterChanges::new(monster, Utc::now().naive_utc());
    diesel::update(monsters.find(monster_id))
        .set(&changes)
        .get_result::<Monster>(connection)
        .optional()?
        .ok_or(RepositoryError::NotFound)
}

pub fn delete_monster_by_id(connection: &mut PgConnection, monster_id: i32) -> Result<()> {
    match diesel::delete(monsters.find(monster_id)).execute(connection)? {
        0 => Err(RepositoryError::NotFound),
        _ => Ok(()),
    }
}
