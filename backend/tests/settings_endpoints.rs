//! End-to-end HTTP tests for the accessibility settings endpoints.
//!
//! These drive the real Actix application over the in-memory adapters, so
//! they exercise the full path: identity extraction, validation, the domain
//! service, and the store.

use actix_web::{http::StatusCode, test, web};
use serde_json::{json, Value};
use uuid::Uuid;

use backend::inbound::http::health::HealthState;
use backend::inbound::http::identity::USER_ID_HEADER;
use backend::server::{build_app, ServerConfig};

const SETTINGS_PATH: &str = "/api/v1/users/me/accessibility-settings";

async fn spawn_app() -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let config = ServerConfig::in_memory("127.0.0.1:0".parse().expect("valid socket address"));
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    let http_state = web::Data::new(backend::server::build_http_state(&config));
    test::init_service(build_app(health, http_state)).await
}

fn full_flags(value: bool) -> Value {
    json!({
        "voiceNavigation": value,
        "screenReader": value,
        "highContrast": value,
        "largeText": value,
        "keyboardNav": value,
    })
}

#[actix_web::test]
async fn first_read_provisions_all_false_defaults() {
    let app = spawn_app().await;
    let user = Uuid::new_v4().to_string();

    let req = test::TestRequest::get()
        .uri(SETTINGS_PATH)
        .insert_header((USER_ID_HEADER, user.as_str()))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["userId"], user.as_str());
    for flag in [
        "voiceNavigation",
        "screenReader",
        "highContrast",
        "largeText",
        "keyboardNav",
    ] {
        assert_eq!(body[flag], false, "{flag} must default to false");
    }
}

#[actix_web::test]
async fn update_round_trips_through_a_subsequent_read() {
    let app = spawn_app().await;
    let user = Uuid::new_v4().to_string();

    let put = test::TestRequest::put()
        .uri(SETTINGS_PATH)
        .insert_header((USER_ID_HEADER, user.as_str()))
        .set_json(json!({
            "voiceNavigation": true,
            "screenReader": false,
            "highContrast": true,
            "largeText": false,
            "keyboardNav": true,
        }))
        .to_request();
    let put_res = test::call_service(&app, put).await;
    assert_eq!(put_res.status(), StatusCode::OK);

    let get = test::TestRequest::get()
        .uri(SETTINGS_PATH)
        .insert_header((USER_ID_HEADER, user.as_str()))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, get).await).await;

    assert_eq!(body["voiceNavigation"], true);
    assert_eq!(body["screenReader"], false);
    assert_eq!(body["highContrast"], true);
    assert_eq!(body["keyboardNav"], true);
}

#[actix_web::test]
async fn repeated_reads_return_the_same_record() {
    let app = spawn_app().await;
    let user = Uuid::new_v4().to_string();

    let first: Value = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri(SETTINGS_PATH)
                .insert_header((USER_ID_HEADER, user.as_str()))
                .to_request(),
        )
        .await,
    )
    .await;
    let second: Value = test::read_body_json(
        test::call_service(
            &app,
            test::TestRequest::get()
                .uri(SETTINGS_PATH)
                .insert_header((USER_ID_HEADER, user.as_str()))
                .to_request(),
        )
        .await,
    )
    .await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(first["createdAt"], second["createdAt"]);
}

#[actix_web::test]
async fn requests_without_identity_are_unauthorised() {
    let app = spawn_app().await;

    let get = test::TestRequest::get().uri(SETTINGS_PATH).to_request();
    let res = test::call_service(&app, get).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let put = test::TestRequest::put()
        .uri(SETTINGS_PATH)
        .set_json(full_flags(true))
        .to_request();
    let res = test::call_service(&app, put).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn malformed_identity_is_unauthorised() {
    let app = spawn_app().await;

    let req = test::TestRequest::get()
        .uri(SETTINGS_PATH)
        .insert_header((USER_ID_HEADER, "not-a-uuid"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "unauthorized");
}

#[actix_web::test]
async fn validation_errors_name_every_offending_field() {
    let app = spawn_app().await;
    let user = Uuid::new_v4().to_string();

    let put = test::TestRequest::put()
        .uri(SETTINGS_PATH)
        .insert_header((USER_ID_HEADER, user.as_str()))
        .set_json(json!({
            "voiceNavigation": "yes",
            "screenReader": true,
            "highContrast": 1,
            "largeText": true,
        }))
        .to_request();
    let res = test::call_service(&app, put).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["code"], "invalid_request");

    let errors = body["details"]["errors"]
        .as_array()
        .expect("details list offending fields");
    let fields: Vec<&str> = errors
        .iter()
        .filter_map(|entry| entry["field"].as_str())
        .collect();
    assert_eq!(fields, vec!["voiceNavigation", "highContrast", "keyboardNav"]);
    assert!(errors
        .iter()
        .all(|entry| entry["expected"] == "boolean"));
}

#[actix_web::test]
async fn invalid_update_leaves_stored_settings_untouched() {
    let app = spawn_app().await;
    let user = Uuid::new_v4().to_string();

    let put = test::TestRequest::put()
        .uri(SETTINGS_PATH)
        .insert_header((USER_ID_HEADER, user.as_str()))
        .set_json(full_flags(true))
        .to_request();
    assert_eq!(test::call_service(&app, put).await.status(), StatusCode::OK);

    let bad_put = test::TestRequest::put()
        .uri(SETTINGS_PATH)
        .insert_header((USER_ID_HEADER, user.as_str()))
        .set_json(json!({ "voiceNavigation": "nope" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, bad_put).await.status(),
        StatusCode::BAD_REQUEST
    );

    let get = test::TestRequest::get()
        .uri(SETTINGS_PATH)
        .insert_header((USER_ID_HEADER, user.as_str()))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, get).await).await;
    assert_eq!(body["voiceNavigation"], true, "stored flags must be intact");
}

#[actix_web::test]
async fn unknown_payload_fields_are_ignored() {
    let app = spawn_app().await;
    let user = Uuid::new_v4().to_string();

    let mut payload = full_flags(false);
    payload["theme"] = json!("midnight");
    let put = test::TestRequest::put()
        .uri(SETTINGS_PATH)
        .insert_header((USER_ID_HEADER, user.as_str()))
        .set_json(payload)
        .to_request();
    let res = test::call_service(&app, put).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert!(body.get("theme").is_none());
}

#[actix_web::test]
async fn every_flag_combination_persists_faithfully() {
    let app = spawn_app().await;
    let flags = [
        "voiceNavigation",
        "screenReader",
        "highContrast",
        "largeText",
        "keyboardNav",
    ];

    for combination in 0_u32..32 {
        let user = Uuid::new_v4().to_string();
        let mut payload = serde_json::Map::new();
        for (bit, flag) in flags.iter().enumerate() {
            payload.insert((*flag).to_owned(), json!(combination & (1 << bit) != 0));
        }

        let put = test::TestRequest::put()
            .uri(SETTINGS_PATH)
            .insert_header((USER_ID_HEADER, user.as_str()))
            .set_json(Value::Object(payload.clone()))
            .to_request();
        let body: Value = test::read_body_json(test::call_service(&app, put).await).await;

        for flag in &flags {
            assert_eq!(
                body[*flag], payload[*flag],
                "combination {combination} must round-trip {flag}"
            );
        }
    }
}

#[actix_web::test]
async fn responses_carry_a_trace_identifier() {
    let app = spawn_app().await;
    let user = Uuid::new_v4().to_string();

    let req = test::TestRequest::get()
        .uri(SETTINGS_PATH)
        .insert_header((USER_ID_HEADER, user.as_str()))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert!(res.headers().contains_key("trace-id"));
}

#[actix_web::test]
async fn health_probes_respond() {
    let app = spawn_app().await;

    let ready = test::TestRequest::get().uri("/health/ready").to_request();
    assert_eq!(test::call_service(&app, ready).await.status(), StatusCode::OK);

    let live = test::TestRequest::get().uri("/health/live").to_request();
    assert_eq!(test::call_service(&app, live).await.status(), StatusCode::OK);
}
