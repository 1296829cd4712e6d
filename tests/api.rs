//! Integration tests for the REST API.

mod common;

use actix_web::{http::StatusCode, test, App};
use common::FailingStore;
use serde_json::{json, Value};
use tournament_engine::config::ServerConfig;
use tournament_engine::{
    add_participant, api, create_tournament, MemoryStore, ParticipantKind, TournamentKind,
};

macro_rules! app {
    () => {
        test::init_service(App::new().app_data(api::new_state()).configure(api::configure)).await
    };
}

fn find_match<'a>(matches: &'a [Value], round: u64, slot: u64) -> &'a Value {
    matches
        .iter()
        .find(|m| m["round"] == round && m["slot"] == slot)
        .unwrap()
}

#[actix_web::test]
async fn health() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["ok"], true);
}

#[actix_web::test]
async fn knockout_flow() {
    let app = app!();

    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Cup", "type": "knockout" }))
        .to_request();
    let t: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(t["status"], "draft");
    assert_eq!(t["type"], "knockout");
    let id = t["id"].as_str().unwrap().to_string();

    for name in ["A", "B", "C", "D"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{id}/participants"))
            .set_json(json!({ "name": name }))
            .to_request();
        let p: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(p["type"], "player");
    }

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/draw"))
        .to_request();
    let drawn: Value = test::call_and_read_body_json(&app, req).await;
    let matches = drawn.as_array().unwrap();
    assert_eq!(matches.len(), 3);

    let first = find_match(matches, 1, 1);
    let winner = first["participant_1"].clone();
    let req = test::TestRequest::put()
        .uri(&format!("/api/matches/{}/result", first["id"].as_str().unwrap()))
        .set_json(json!({ "winner_id": winner, "score": "3-2" }))
        .to_request();
    let recorded: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(recorded["match"]["winner"], winner);
    assert_eq!(recorded["match"]["score"], "3-2");
    assert_eq!(recorded["advancement"]["effect"], "propagated");
    assert_eq!(recorded["advancement"]["side"], "one");

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{id}/bracket"))
        .to_request();
    let bracket: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(bracket[0]["label"], "Semi-final");
    assert_eq!(bracket[1]["label"], "Final");
    assert_eq!(bracket[1]["matches"][0]["participant_1"], winner);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{id}"))
        .to_request();
    let details: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(details["status"], "active");
    assert_eq!(details["participants"].as_array().unwrap().len(), 4);
    assert_eq!(details["matches"].as_array().unwrap().len(), 3);

    // Final is not ready yet.
    let final_id = find_match(matches, 2, 1)["id"].as_str().unwrap().to_string();
    let req = test::TestRequest::put()
        .uri(&format!("/api/matches/{final_id}/result"))
        .set_json(json!({ "winner_id": winner, "score": "1-0" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{id}/standings"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn group_standings_and_leaderboard() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "League", "type": "group" }))
        .to_request();
    let t: Value = test::call_and_read_body_json(&app, req).await;
    let id = t["id"].as_str().unwrap().to_string();

    for name in ["A", "B", "C"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{id}/participants"))
            .set_json(json!({ "name": name, "type": "team" }))
            .to_request();
        test::call_service(&app, req).await;
    }
    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/draw"))
        .to_request();
    let drawn: Value = test::call_and_read_body_json(&app, req).await;
    let m = &drawn[0];
    let match_id = m["id"].as_str().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/predictions")
        .set_json(json!({
            "match_id": match_id,
            "user_name": "ana",
            "predicted_winner_id": m["participant_2"],
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&format!("/api/matches/{match_id}/result"))
        .set_json(json!({ "winner_id": m["participant_2"], "score": "21-19" }))
        .to_request();
    let recorded: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(recorded["advancement"]["effect"], "recorded");

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{id}/standings"))
        .to_request();
    let table: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(table[0]["participant_id"], m["participant_2"]);
    assert_eq!(table[0]["points"], 3);
    assert_eq!(table.as_array().unwrap().len(), 3);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{id}/leaderboard"))
        .to_request();
    let board: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        board,
        json!([{ "predictor": "ana", "total_predictions": 1, "correct_predictions": 1 }])
    );
}

#[actix_web::test]
async fn draw_validation_errors_are_bad_requests() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Tiny", "type": "knockout" }))
        .to_request();
    let t: Value = test::call_and_read_body_json(&app, req).await;
    let id = t["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/participants"))
        .set_json(json!({ "name": "Solo" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/draw"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("At least 2"));
}

#[actix_web::test]
async fn participants_can_be_renamed_and_removed() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Club night", "type": "group" }))
        .to_request();
    let t: Value = test::call_and_read_body_json(&app, req).await;
    let id = t["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/participants"))
        .set_json(json!({ "name": "Kim" }))
        .to_request();
    let p: Value = test::call_and_read_body_json(&app, req).await;
    let pid = p["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/api/participants/{pid}"))
        .set_json(json!({ "name": "Kim L." }))
        .to_request();
    let renamed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(renamed["name"], "Kim L.");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/participants/{pid}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/participants/{pid}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn deleted_tournament_is_gone() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Gone", "type": "group" }))
        .to_request();
    let t: Value = test::call_and_read_body_json(&app, req).await;
    let id = t["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/tournaments/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{id}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/api/tournaments").to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list, json!([]));
}

#[actix_web::test]
async fn result_without_score_is_a_bad_request() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/tournaments")
        .set_json(json!({ "name": "Final", "type": "knockout" }))
        .to_request();
    let t: Value = test::call_and_read_body_json(&app, req).await;
    let id = t["id"].as_str().unwrap().to_string();
    for name in ["A", "B"] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/tournaments/{id}/participants"))
            .set_json(json!({ "name": name }))
            .to_request();
        test::call_service(&app, req).await;
    }
    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{id}/draw"))
        .to_request();
    let drawn: Value = test::call_and_read_body_json(&app, req).await;
    let m = &drawn[0];
    let match_id = m["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/matches/{match_id}/result"))
        .set_json(json!({ "winner_id": m["participant_1"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{id}"))
        .to_request();
    let details: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(details["matches"][0]["winner"], Value::Null);
    assert_eq!(details["matches"][0]["score"], Value::Null);
}

#[actix_web::test]
async fn storage_failure_is_an_internal_server_error() {
    let mut inner = MemoryStore::new();
    let t = create_tournament(&mut inner, "Cup", TournamentKind::Knockout).unwrap();
    for name in ["A", "B", "C", "D"] {
        add_participant(&mut inner, t.id, name, ParticipantKind::Player).unwrap();
    }
    let mut store = FailingStore::new(inner);
    store.fail_writes = true;

    let app = test::init_service(
        App::new()
            .app_data(api::state_with(store))
            .configure(api::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/tournaments/{}/draw", t.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Storage error: disk full");

    let req = test::TestRequest::get()
        .uri(&format!("/api/tournaments/{}", t.id))
        .to_request();
    let details: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(details["status"], "draft");
    assert_eq!(details["matches"], json!([]));
}

#[::core::prelude::v1::test]
fn server_config_falls_back_to_defaults() {
    assert_eq!(ServerConfig::from_vars(None, None), ServerConfig::default());
    let cfg = ServerConfig::from_vars(Some("127.0.0.1".into()), Some("not-a-port".into()));
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8080);
    let cfg = ServerConfig::from_vars(Some(" ".into()), Some("9000".into()));
    assert_eq!(cfg.bind_addr(), ("0.0.0.0", 9000));
}
