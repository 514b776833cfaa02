use serde::{Deserialize, Serialize};
use diesel::{Identifiable, Insertable, Queryable};
use crate::error::ApiError;

/// A resolved and persisted battle. `winner` is always `monster_a` or `monster_b`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Queryable, Identifiable)]
#[diesel(table_name = crate::repository::schema::battles)]
#[serde(rename_all = "camelCase")]
pub struct Battle {
    pub id: i32,
    pub monster_a: i32,
    pub monster_b: i32,
    pub winner: i32,
    pub created_at: Option<chrono::NaiveDateTime>,
}

/// A resolved battle waiting for the store to assign it an id.
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = crate::repository::schema::battles)]
pub struct NewBattle {
    pub monster_a: i32,
    pub monster_b: i32,
    pub winner: i32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateBattleRequest {
    pub monster_a: Option<i32>,
    pub monster_b: Option<i32>,
}

impl CreateBattleRequest {
    /// Both ids must be present before any lookup happens.
    pub fn monster_ids(&self) -> Result<(i32, i32), ApiError> {
        match (self.monster_a, self.monster_b) {
            (Some(monster_a), Some(monster_b)) => Ok((monster_a, monster_b)),
            _ => Err(ApiError::MissingIdentifier),
        }
    }
}
