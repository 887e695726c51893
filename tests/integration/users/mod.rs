//! User lookup integration tests

use axum::http::{Method, StatusCode};
use orgdesk_github::{DirectoryError, GitHubUser};
use serde_json::json;

use crate::common::{json_request, raw_request, TestApp};

const LOOKUP: &str = "/api/getByUsername";

#[tokio::test]
async fn test_lookup_octocat_returns_avatar_and_id() {
    let app = TestApp::new();

    let (status, body) = app
        .send(json_request(
            Method::POST,
            LOOKUP,
            Some(json!({ "username": "octocat" })),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "avatar": "https://avatars.githubusercontent.com/u/583231?v=4",
            "id": 583231
        })
    );
}

#[tokio::test]
async fn test_lookup_unknown_user_returns_not_found_message() {
    let app = TestApp::new();

    let (status, body) = app
        .send(json_request(
            Method::POST,
            LOOKUP,
            Some(json!({ "username": "doesnotexist123" })),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Not Found" }));
}

#[tokio::test]
async fn test_lookup_missing_username_variants_make_no_call() {
    let app = TestApp::new();

    let requests = vec![
        json_request(Method::POST, LOOKUP, Some(json!({}))),
        json_request(Method::POST, LOOKUP, Some(json!({ "username": "" }))),
        json_request(Method::POST, LOOKUP, Some(json!({ "username": "   " }))),
        json_request(Method::POST, LOOKUP, Some(json!({ "username": null }))),
        json_request(Method::POST, LOOKUP, Some(json!({ "username": 42 }))),
        json_request(Method::POST, LOOKUP, None),
        raw_request(Method::POST, LOOKUP, "{not json"),
    ];

    for req in requests {
        let (status, body) = app.send(req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "error": "Missing username" }));
    }

    assert!(app.client.recorded_calls().is_empty());
}

#[tokio::test]
async fn test_lookup_accepts_body_without_content_type() {
    let app = TestApp::new();

    let (status, body) = app
        .send(raw_request(Method::POST, LOOKUP, r#"{"username":"octocat"}"#))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 583231);
}

#[tokio::test]
async fn test_lookup_resolved_ids_are_positive_with_avatar() {
    let app = TestApp::new();
    for (id, login) in [(1u64, "mojombo"), (2, "defunkt"), (3, "pjhyett")] {
        app.client.behavior().add_user(GitHubUser {
            id,
            login: login.to_string(),
            avatar_url: format!("https://avatars.githubusercontent.com/u/{}?v=4", id),
        });
    }

    for login in ["mojombo", "defunkt", "pjhyett", "octocat"] {
        let (status, body) = app
            .send(json_request(
                Method::POST,
                LOOKUP,
                Some(json!({ "username": login })),
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["id"].as_u64().unwrap() > 0);
        assert!(!body["avatar"].as_str().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_lookup_bad_credentials() {
    let app = TestApp::new();
    app.client.behavior().fail_lookups(DirectoryError::Api {
        status: 401,
        message: "Bad credentials".to_string(),
    });

    let (status, body) = app
        .send(json_request(
            Method::POST,
            LOOKUP,
            Some(json!({ "username": "octocat" })),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Bad credentials" }));
}

#[tokio::test]
async fn test_lookup_network_fault_hides_raw_error() {
    let app = TestApp::new();
    app.client.behavior().fail_lookups(DirectoryError::Request(
        "HTTP request failed: error sending request for url (https://api.github.com/users/octocat)"
            .to_string(),
    ));

    let (status, body) = app
        .send(json_request(
            Method::POST,
            LOOKUP,
            Some(json!({ "username": "octocat" })),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Unable to reach GitHub" }));
}

#[tokio::test]
async fn test_lookup_rejects_get() {
    let app = TestApp::new();
    let status = app
        .send_status(json_request(Method::GET, LOOKUP, None))
        .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
