use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use battle_of_monsters::{api, logging};
use battle_of_monsters::config::{AppConfig, StorageBackend};
use battle_of_monsters::repository::{Database, MemoryStore, Storage};
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init();

    let config = AppConfig::from_env();

    let storage: Arc<dyn Storage> = match config.storage {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres backend")?;
            Arc::new(Database::new(database_url, config.pool_size)?)
        }
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
    };
    let storage = web::Data::from(storage);

    info!(host = %config.host, port = config.port, storage = ?config.storage, "starting server");

    HttpServer::new(move || {
        App::new()
            .app_data(storage.clone())
            .wrap(Logger::default())
            .configure(api::config::config)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
