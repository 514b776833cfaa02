use std::io::Write;
use std::path::Path;

use actix_web::{web, get, post, delete, put, HttpResponse};
use actix_multipart::Multipart;
use futures::TryStreamExt;
use tempfile::NamedTempFile;
use tracing::{info, warn};
use crate::error::ApiError;
use crate::models::monster::NewMonster;
use crate::repository::{RepositoryError, Storage};

#[get("/monster")]
pub async fn get_monsters(db: web::Data<dyn Storage>) -> Result<HttpResponse, ApiError> {
    let monsters = db.repository()?.list_monsters()?;
    Ok(HttpResponse::Ok().json(monsters))
}

#[post("/monster")]
pub async fn create_monster(db: web::Data<dyn Storage>, new_monster: web::Json<NewMonster>) -> Result<HttpResponse, ApiError> {
    let new_monster = new_monster.into_inner();
    new_monster.validate().map_err(ApiError::InvalidMonster)?;

    let mut repository = db.repository()?;
    let monster = repository.save_monster(new_monster)?;
    repository.commit_changes()?;
    Ok(HttpResponse::Created().json(monster))
}

#[get("/monster/{id}")]
pub async fn get_monster_by_id(db: web::Data<dyn Storage>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    match db.repository()?.find_monster(id.into_inner())? {
        Some(monster) => Ok(HttpResponse::Ok().json(monster)),
        None => Err(ApiError::MonsterNotFound),
    }
}

#[delete("/monster/{id}")]
pub async fn delete_monster_by_id(db: web::Data<dyn Storage>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let mut repository = db.repository()?;
    repository.delete_monster(id.into_inner()).map_err(not_found_as_monster)?;
    repository.commit_changes()?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/monster/{id}")]
pub async fn update_monster_by_id(db: web::Data<dyn Storage>, id: web::Path<i32>, updated_monster: web::Json<NewMonster>) -> Result<HttpResponse, ApiError> {
    let updated_monster = updated_monster.into_inner();
    updated_monster.validate().map_err(ApiError::InvalidMonster)?;

    let mut repository = db.repository()?;
    let monster = repository
        .update_monster(id.into_inner(), updated_monster)
        .map_err(not_found_as_monster)?;
    repository.commit_changes()?;
    Ok(HttpResponse::Ok().json(monster))
}

/// Imports every row of the uploaded CSV file, or none of them.
#[post("/monster/import_csv")]
pub async fn import_csv(db: web::Data<dyn Storage>, mut payload: Multipart) -> Result<HttpResponse, ApiError> {
    let mut temp_file: Option<NamedTempFile> = None;

    while let Some(mut field) = payload.try_next().await? {
        if field.content_disposition().get_filename().is_none() {
            return Err(ApiError::MissingFile);
        }

        let mut file = NamedTempFile::new()?;
        while let Some(chunk) = field.try_next().await? {
            file.write_all(&chunk)?;
        }
        file.flush()?;
        temp_file = Some(file);
    }

    let temp_file = temp_file.ok_or(ApiError::MissingFile)?;
    let new_monsters = read_monsters(temp_file.path())?;

    let mut repository = db.repository()?;
    let monsters = new_monsters
        .into_iter()
        .map(|new_monster| repository.save_monster(new_monster))
        .collect::<Result<Vec<_>, _>>()?;
    repository.commit_changes()?;

    info!(count = monsters.len(), "imported monsters from csv");
    Ok(HttpResponse::Ok().json(monsters))
}

fn read_monsters(path: &Path) -> Result<Vec<NewMonster>, ApiError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(ApiError::InvalidCsv)?;

    let mut new_monsters = Vec::new();
    for result in reader.deserialize::<NewMonster>() {
        let monster = result.map_err(|err| {
            warn!(error = %err, "rejected csv row");
            ApiError::InvalidCsv(err)
        })?;
        monster.validate().map_err(ApiError::InvalidMonster)?;
        new_monsters.push(monster);
    }

    if new_monsters.is_empty() {
        return Err(ApiError::EmptyImport);
    }
    Ok(new_monsters)
}

fn not_found_as_monster(err: RepositoryError) -> ApiError {
    match err {
        RepositoryError::NotFound => ApiError::MonsterNotFound,
        err => ApiError::Repository(err),
    }
}
