//! Full-stack tests: router, GitHub client, and a stubbed GitHub API

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use orgdesk_app::create_app;
use orgdesk_common::Config;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{json_request, parse_body, TEST_ORG};

fn github_config(server: &MockServer) -> Config {
    config_for(&server.uri())
}

fn config_for(api_url: &str) -> Config {
    Config {
        github_token: Some("ghp_test".to_string()),
        github_org: Some(TEST_ORG.to_string()),
        github_api_url: api_url.to_string(),
        directory_provider: "github".to_string(),
        cors_allowed_origins: None,
        port: 3000,
    }
}

fn router(server: &MockServer) -> Router {
    create_app(&github_config(server)).unwrap()
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    (status, parse_body(resp).await)
}

fn octocat() -> Value {
    json!({
        "login": "octocat",
        "id": 583231,
        "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
        "type": "User"
    })
}

#[test_log::test(tokio::test)]
async fn test_lookup_through_github_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .and(header("authorization", "Bearer ghp_test"))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(octocat()))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(
        router(&server),
        json_request(
            Method::POST,
            "/api/getByUsername",
            Some(json!({ "username": "octocat" })),
        ),
    )
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

#[test_log::test(tokio::test)]
async fn test_lookup_unknown_user_through_github_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/doesnotexist123"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/users/users#get-a-user"
        })))
        .mount(&server)
        .await;

    let (status, body) = send(
        router(&server),
        json_request(
            Method::POST,
            "/api/getByUsername",
            Some(json!({ "username": "doesnotexist123" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Not Found" }));
}

#[test_log::test(tokio::test)]
async fn test_missing_username_sends_nothing_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(octocat()))
        .expect(0)
        .mount(&server)
        .await;

    let (status, body) = send(
        router(&server),
        json_request(Method::POST, "/api/getByUsername", Some(json!({}))),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Missing username" }));
}

#[test_log::test(tokio::test)]
async fn test_list_members_follows_pagination() {
    let server = MockServer::start().await;
    let members_path = format!("/orgs/{}/members", TEST_ORG);
    let page1: Vec<Value> = (0..100)
        .map(|i| json!({ "login": format!("member{}", i), "id": i + 1 }))
        .collect();
    let page2: Vec<Value> = (100..105)
        .map(|i| json!({ "login": format!("member{}", i), "id": i + 1 }))
        .collect();
    let next = format!(
        "<{}{}?per_page=100&page=2>; rel=\"next\", <{}{}?per_page=100&page=2>; rel=\"last\"",
        server.uri(),
        members_path,
        server.uri(),
        members_path
    );

    Mock::given(method("GET"))
        .and(path(members_path.as_str()))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page2))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(members_path.as_str()))
        .and(query_param("per_page", "100"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page1)
                .insert_header("link", next.as_str()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(
        router(&server),
        json_request(Method::GET, "/api/listMembers", None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let members = body.as_array().unwrap();
    assert_eq!(members.len(), 105);
    assert_eq!(members[0]["login"], "member0");
    assert_eq!(members[104]["login"], "member104");
}

#[test_log::test(tokio::test)]
async fn test_invitation_through_github_client() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(octocat()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/orgs/{}/invitations", TEST_ORG).as_str()))
        .and(body_json(json!({ "invitee_id": 583231, "role": "direct_member" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 1,
            "login": "octocat",
            "role": "direct_member",
            "created_at": "2024-05-01T14:00:00+02:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (status, body) = send(
        router(&server),
        json_request(
            Method::POST,
            "/api/createInvitation",
            Some(json!({ "username": "octocat" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let invited_at = chrono::DateTime::parse_from_rfc3339(body["invitedAt"].as_str().unwrap())
        .unwrap();
    assert_eq!(invited_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");
}

#[test_log::test(tokio::test)]
async fn test_invitation_validation_failure_from_github() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(octocat()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/orgs/{}/invitations", TEST_ORG).as_str()))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "message": "Validation Failed",
            "errors": [{
                "resource": "OrganizationInvitation",
                "code": "unprocessable",
                "message": "Invitee is already a part of this organization"
            }]
        })))
        .mount(&server)
        .await;

    let (status, body) = send(
        router(&server),
        json_request(
            Method::POST,
            "/api/createInvitation",
            Some(json!({ "username": "octocat" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Invitee is already a part of this organization"
        })
    );
}

#[test_log::test(tokio::test)]
async fn test_unreachable_github_reports_generic_message() {
    let app = create_app(&config_for("http://127.0.0.1:1")).unwrap();
    let (status, body) = send(
        app,
        json_request(
            Method::POST,
            "/api/getByUsername",
            Some(json!({ "username": "octocat" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Unable to reach GitHub" }));
}

#[test_log::test(tokio::test)]
async fn test_unconfigured_org_answers_not_found_without_calling_github() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = github_config(&server);
    config.github_org = None;

    let (status, body) = send(
        create_app(&config).unwrap(),
        json_request(Method::GET, "/api/listMembers", None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "Not Found" }));
}
