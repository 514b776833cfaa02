use actix_web::{web, get, post, delete, HttpResponse};
use tracing::{debug, warn};
use crate::engine::battle_engine;
use crate::error::ApiError;
use crate::models::battle::{CreateBattleRequest, NewBattle};
use crate::repository::{BattleOfMonstersRepository, Storage};

#[get("/battle")]
pub async fn get_battles(db: web::Data<dyn Storage>) -> Result<HttpResponse, ApiError> {
    let battles = db.repository()?.list_battles()?;
    Ok(HttpResponse::Ok().json(battles))
}

#[get("/battle/{id}")]
pub async fn get_battle_by_id(db: web::Data<dyn Storage>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    match db.repository()?.find_battle(id.into_inner())? {
        Some(battle) => Ok(HttpResponse::Ok().json(battle)),
        None => Err(ApiError::BattleNotFound),
    }
}

#[post("/battle")]
pub async fn create_battle(db: web::Data<dyn Storage>, battle_request: web::Json<CreateBattleRequest>) -> Result<HttpResponse, ApiError> {
    let (monster_a_id, monster_b_id) = battle_request.monster_ids()?;

    let mut repository = db.repository()?;
    let battle = start_battle(repository.as_mut(), monster_a_id, monster_b_id)?;
    let battle = repository.save_battle(battle)?;
    repository.commit_changes()?;

    Ok(HttpResponse::Ok().json(battle))
}

/// Any failure while deleting is reported as not found.
#[delete("/battle/{id}")]
pub async fn delete_battle_by_id(db: web::Data<dyn Storage>, id: web::Path<i32>) -> Result<HttpResponse, ApiError> {
    let battle_id = id.into_inner();
    let deleted = db.repository().and_then(|mut repository| {
        repository.delete_battle(battle_id)?;
        repository.commit_changes()
    });

    match deleted {
        Ok(()) => Ok(HttpResponse::Ok().finish()),
        Err(err) => {
            warn!(battle_id, error = %err, "failed to delete battle");
            Err(ApiError::BattleNotFound)
        }
    }
}

/// Loads both monsters and lets the engine decide the winner. The engine
/// only ever sees copies; nothing it does is written back.
fn start_battle(
    repository: &mut dyn BattleOfMonstersRepository,
    monster_a_id: i32,
    monster_b_id: i32,
) -> Result<NewBattle, ApiError> {
    let monster_a = repository.find_monster(monster_a_id)?.ok_or(ApiError::MonsterNotFound)?;
    let monster_b = repository.find_monster(monster_b_id)?.ok_or(ApiError::MonsterNotFound)?;

    let outcome = battle_engine::simulate(&monster_a, &monster_b);
    debug!(
        monster_a = monster_a.id,
        monster_b = monster_b.id,
        first_attacker = outcome.first_attacker,
        rounds = outcome.rounds,
        winner = outcome.winner,
        "battle resolved"
    );

    Ok(NewBattle {
        monster_a: monster_a.id,
        monster_b: monster_b.id,
        winner: outcome.winner,
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{test, http, App};
    use crate::models::battle::Battle;
    use crate::repository::MemoryStore;
    use crate::utils::test_utils::{init_test_battle, init_test_monsters, storage_data, FailingStorage};

    use super::*;

    async fn post_battle(store: &MemoryStore, battle_request: &CreateBattleRequest) -> actix_web::dev::ServiceResponse {
        let app = App::new().app_data(storage_data(store)).service(create_battle);
        let app = test::init_service(app).await;

        let req = test::TestRequest::post()
            .uri("/battle")
            .set_json(battle_request)
            .to_request();
        test::call_service(&app, req).await
    }

    #[actix_rt::test]
    async fn test_should_get_all_battles_correctly() {
        let store = MemoryStore::new();
        let test_battle = init_test_battle(&store);
        let app = App::new().app_data(storage_data(&store)).service(get_battles);

        let app = test::init_service(app).await;

        let req = test::TestRequest::get().uri("/battle").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), http::StatusCode::OK);
        let battles: Vec<Battle> = test::read_body_json(resp).await;
        assert_eq!(battles, vec![test_battle]);
    }

    #[actix_rt::test]
    async fn test_should_get_404_error_if_battle_does_not_exists() {
        let store = MemoryStore::new();
        let app = App::new().app_data(storage_data(&store)).service(get_battle_by_id);

        let app = test::init_service(app).await;

        let req = test::TestRequest::get().uri("/battle/123").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND)
    }

    #[actix_rt::test]
    async fn test_should_get_a_single_battle_correctly() {
        let store = MemoryStore::new();
        let test_battle = init_test_battle(&store);
        let app = App::new().app_data(storage_data(&store)).service(get_battle_by_id);

        let app = test::init_service(app).await;

        let req = test::TestRequest::get().uri(&format!("/battle/{}", test_battle.id)).to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
    }

    #[actix_rt::test]
    async fn test_should_create_a_battle_with_a_bad_request_response_if_one_parameter_is_null() {
        let store = MemoryStore::new();
        let test_monsters = init_test_monsters(&store);

        let battle_request = CreateBattleRequest {
            monster_a: None,
            monster_b: Some(test_monsters[1].id),
        };
        let resp = post_battle(&store, &battle_request).await;

        assert_eq!(resp.status(), http::StatusCode::BAD_REQUEST);
        let message: String = test::read_body_json(resp).await;
        assert_eq!(message, "Missing ID");
        assert!(store.repository().unwrap().list_battles().unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_should_create_a_battle_with_404_error_if_one_parameter_has_a_monster_id_does_not_exists() {
        let store = MemoryStore::new();
        let test_monsters = init_test_monsters(&store);

        let battle_request = CreateBattleRequest {
            monster_a: Some(9999),
            monster_b: Some(test_monsters[1].id),
        };
        let resp = post_battle(&store, &battle_request).await;

        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
        assert!(store.repository().unwrap().list_battles().unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_should_create_battle_correctly_with_monster_a_winning() {
        let store = MemoryStore::new();
        let test_monsters = init_test_monsters(&store);

        // Old Shark is faster and outlasts Dead Unicorn in the second round.
        let battle_request = CreateBattleRequest {
            monster_a: Some(test_monsters[1].id),
            monster_b: Some(test_monsters[0].id),
        };
        let resp = post_battle(&store, &battle_request).await;

        assert_eq!(resp.status(), http::StatusCode::OK);
        let battle: Battle = test::read_body_json(resp).await;
        assert_eq!(battle.winner, battle.monster_a);
    }

    #[actix_rt::test]
    async fn test_should_create_battle_correctly_with_monster_b_winning() {
        let store = MemoryStore::new();
        let test_monsters = init_test_monsters(&store);

        // Wolf strikes first but Sea Serpent hits harder.
        let battle_request = CreateBattleRequest {
            monster_a: Some(test_monsters[5].id),
            monster_b: Some(test_monsters[6].id),
        };
        let resp = post_battle(&store, &battle_request).await;

        let battle: Battle = test::read_body_json(resp).await;
        assert_eq!(battle.winner, battle.monster_b);
    }

    #[actix_rt::test]
    async fn test_should_create_battle_correctly_with_monster_a_winning_if_theirs_speeds_same_and_monster_a_has_higher_attack() {
        let store = MemoryStore::new();
        let test_monsters = init_test_monsters(&store);

        let battle_request = CreateBattleRequest {
            monster_a: Some(test_monsters[0].id),
            monster_b: Some(test_monsters[5].id),
        };
        let resp = post_battle(&store, &battle_request).await;

        let battle: Battle = test::read_body_json(resp).await;
        assert_eq!(battle.winner, battle.monster_a);
    }

    #[actix_rt::test]
    async fn test_should_create_battle_correctly_with_monster_b_winning_if_theirs_speeds_same_and_monster_b_has_higher_attack() {
        let store = MemoryStore::new();
        let test_monsters = init_test_monsters(&store);

        let battle_request = CreateBattleRequest {
            monster_a: Some(test_monsters[5].id),
            monster_b: Some(test_monsters[0].id),
        };
        let resp = post_battle(&store, &battle_request).await;

        let battle: Battle = test::read_body_json(resp).await;
        assert_eq!(battle.winner, battle.monster_b);
    }

    #[actix_rt::test]
    async fn test_should_persist_battle_without_touching_monster_stats() {
        let store = MemoryStore::new();
        let test_monsters = init_test_monsters(&store);

        let battle_request = CreateBattleRequest {
            monster_a: Some(test_monsters[1].id),
            monster_b: Some(test_monsters[0].id),
        };
        let resp = post_battle(&store, &battle_request).await;
        let battle: Battle = test::read_body_json(resp).await;

        let mut repository = store.repository().unwrap();
        assert_eq!(repository.list_battles().unwrap(), vec![battle]);
        assert_eq!(repository.list_monsters().unwrap(), test_monsters);
    }

    #[actix_rt::test]
    async fn test_should_delete_a_battle_correctly() {
        let store = MemoryStore::new();
        let test_battle = init_test_battle(&store);
        let app = App::new().app_data(storage_data(&store)).service(delete_battle_by_id);

        let app = test::init_service(app).await;

        let req = test::TestRequest::delete().uri(&format!("/battle/{}", test_battle.id)).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), http::StatusCode::OK);
        assert!(store.repository().unwrap().list_battles().unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_should_delete_with_404_error_if_battle_does_not_exists() {
        let store = MemoryStore::new();
        let app = App::new().app_data(storage_data(&store)).service(delete_battle_by_id);

        let app = test::init_service(app).await;

        let req = test::TestRequest::delete().uri("/battle/999").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_should_delete_with_404_error_if_storage_fails() {
        let app = App::new().app_data(FailingStorage::data()).service(delete_battle_by_id);

        let app = test::init_service(app).await;

        let req = test::TestRequest::delete().uri("/battle/13").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), http::StatusCode::NOT_FOUND);
    }
}
