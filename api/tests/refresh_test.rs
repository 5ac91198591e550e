//! Integration tests for POST /api/v1/auth/refresh

mod common;

use actix_web::{test, web, App};
use cadence_api::routes;
use cadence_core::Role;
use common::*;
use serde_json::{json, Value};

macro_rules! init_app {
    ($authority:expr) => {
        test::init_service(
            App::new()
                .app_data($authority.clone())
                .configure(routes::configure)
                .default_service(web::route().to(routes::not_found)),
        )
        .await
    };
}

#[actix_web::test]
async fn test_refresh_issues_working_pair() {
    let (authority, clock) = authority();
    let refresh = refresh_token(&authority, USER, NOW);
    let app = init_app!(authority);

    clock.advance(7200);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["access_expires_in"], 3600);
    assert_eq!(body["data"]["refresh_expires_in"], 86400);

    let access = body["data"]["access_token"].as_str().unwrap().to_string();
    let req = test::TestRequest::get()
        .uri("/api/v1/auth/me")
        .insert_header(bearer(&access))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], USER);
    assert_eq!(body["data"]["issued_at"], NOW + 7200);
}

#[actix_web::test]
async fn test_refresh_rejects_access_token() {
    let (authority, _) = authority();
    let access = access_token(&authority, USER, Role::User, NOW);
    let app = init_app!(authority);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": access }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_TYPE_MISMATCH");
}

#[actix_web::test]
async fn test_refresh_rejects_revoked_token() {
    let (authority, _) = authority();
    let refresh = refresh_token(&authority, USER, NOW);
    authority.revoke_all(USER, NOW).await.unwrap();
    let app = init_app!(authority);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({ "refresh_token": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "TOKEN_REVOKED");
}

#[actix_web::test]
async fn test_refresh_rejects_malformed_body() {
    let (authority, _) = authority();
    let app = init_app!(authority);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"token\": 1}")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "BAD_REQUEST");
}
