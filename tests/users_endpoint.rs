mod common;

use axum::http::StatusCode;
use common::{make_users, test_app};
use guild_board::config::USERS;
use serde_json::json;

#[tokio::test]
async fn list_responds_200_with_empty_list() {
    let app = test_app();
    let res = app.get("/api/users").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn list_responds_with_all_users() {
    let app = test_app();
    let seeded = app.seed(&USERS, &make_users()).await;
    let res = app.get("/api/users").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!(seeded));
}

#[tokio::test]
async fn get_unknown_user_responds_404() {
    let app = test_app();
    let res = app.get("/api/users/123456").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, json!({"error": {"message": "User doesn't exist"}}));
}

#[tokio::test]
async fn non_numeric_id_responds_404() {
    let app = test_app();
    app.seed(&USERS, &make_users()).await;
    let res = app.get("/api/users/first").await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.error_message(), Some("User doesn't exist"));
}

#[tokio::test]
async fn create_user_echoes_every_field() {
    let app = test_app();
    let new_user = json!({
        "username": "Test new user",
        "password": "Test password",
        "email_address": "test@test.com",
        "role": "player"
    });
    let res = app.post("/api/users", new_user.clone()).await;
    assert_eq!(res.status, StatusCode::CREATED);
    for key in ["username", "password", "email_address", "role"] {
        assert_eq!(res.body[key], new_user[key]);
    }
    let id = res.body["id"].as_i64().expect("generated id");
    assert_eq!(res.location(), Some(format!("/api/users/{}", id).as_str()));

    let fetched = app.get(&format!("/api/users/{}", id)).await;
    assert_eq!(fetched.body, res.body);
}

#[tokio::test]
async fn create_reports_each_missing_field() {
    for field in ["username", "password", "email_address", "role"] {
        let app = test_app();
        let mut body = json!({
            "username": "Test user name",
            "password": "Test password",
            "email_address": "test@test.com",
            "role": "player"
        });
        body.as_object_mut().unwrap().remove(field);
        let res = app.post("/api/users", body).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            res.error_message().map(str::to_string),
            Some(format!("Missing '{}' in request body", field))
        );
    }
}

#[tokio::test]
async fn create_without_json_content_type_reports_first_field() {
    let app = test_app();
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/users")
        .body(axum::body::Body::from("username=x"))
        .unwrap();
    let res = common::send(&app.router, req).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_message(), Some("Missing 'username' in request body"));
}

#[tokio::test]
async fn malformed_json_responds_400() {
    let app = test_app();
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"username\": "))
        .unwrap();
    let res = common::send(&app.router, req).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.error_message().is_some());

    let res = app.post("/api/users", json!(["username"])).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.error_message(), Some("Request body must be a JSON object"));
}

#[tokio::test]
async fn patch_updates_user() {
    let app = test_app();
    let seeded = app.seed(&USERS, &make_users()).await;
    let update = json!({
        "username": "updated username",
        "password": "updated password",
        "email_address": "updated@test.com",
        "role": "dm"
    });
    let res = app.patch("/api/users/1", update.clone()).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let mut expected = update;
    expected["id"] = seeded[0]["id"].clone();
    assert_eq!(app.get("/api/users/1").await.body, expected);
}

#[tokio::test]
async fn patch_without_known_fields_lists_fields_in_order() {
    let app = test_app();
    app.seed(&USERS, &make_users()).await;
    let res = app.patch("/api/users/1", json!({"irrelevantField": "foo"})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        res.error_message(),
        Some("Request body must contain one of: 'username', 'password', 'email_address', 'role'")
    );
}

#[tokio::test]
async fn patch_with_only_falsy_values_responds_400() {
    let app = test_app();
    app.seed(&USERS, &make_users()).await;
    let res = app.patch("/api/users/1", json!({"username": "", "role": null})).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_subset_leaves_other_fields() {
    let app = test_app();
    let seeded = app.seed(&USERS, &make_users()).await;
    let res = app
        .patch("/api/users/2", json!({"role": "admin", "fieldToIgnore": "nope"}))
        .await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let mut expected = seeded[1].clone();
    expected["role"] = json!("admin");
    let fetched = app.get("/api/users/2").await;
    assert_eq!(fetched.body, expected);
    assert!(fetched.body.get("fieldToIgnore").is_none());
}

#[tokio::test]
async fn users_cannot_be_deleted() {
    let app = test_app();
    app.seed(&USERS, &make_users()).await;
    assert_eq!(app.delete("/api/users/1").await.status, StatusCode::METHOD_NOT_ALLOWED);
}
