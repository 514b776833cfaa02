use diesel::prelude::*;
use diesel::PgConnection;
use crate::models::battle::{Battle, NewBattle};
use crate::repository::schema::battles::dsl::*;
use crate::repository::error::{RepositoryError, Result};

pub fn get_battles(connection: &mut PgConnection) -> Result<Vec<Battle>> {
    Ok(battles.order(id.asc()).load::<Battle>(connection)?)
}

pub fn get_battle_by_id(connection: &mut PgConnection, battle_id: i32) -> Result<Option<Battle>> {
    Ok(battles.find(battle_id).first::<Battle>(connection).optional()?)
}

pub fn delete_battle_by_id(connection: &mut PgConnection, battle_id: i32) -> Result<()> {
    match diesel::delete(battles.find(battle_id)).execute(connection)? {
        0 => Err(RepositoryError::NotFound),
        _ => Ok(()),
    }
}

pub fn create_battle(connection: &mut PgConnection, battle: &NewBattle) -> Result<Battle> {
    Ok(diesel::insert_into(battles)
        .values(battle)
        .get_result::<Battle>(connection)?)
}
