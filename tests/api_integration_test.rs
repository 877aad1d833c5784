//! Blog API client against a real HTTP server (wiremock).

mod common;

use common::{client_for, post_json, token_response, FAR_FUTURE};
use quill::api::{CreatePostOutcome, ImageUpload, LoginOutcome, LoginRequest, PostDraft, Registration};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// list_posts
// ============================================================================

#[tokio::test]
async fn test_list_posts_keeps_backend_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([post_json(3, "third"), post_json(1, "first")])),
        )
        .mount(&server)
        .await;

    let posts = client_for(&server.uri()).list_posts().await;
    let ids: Vec<i64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 1]);
    assert_eq!(posts[0].title, "third");
}

#[tokio::test]
async fn test_list_posts_server_error_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    assert!(client_for(&server.uri()).list_posts().await.is_empty());
}

#[tokio::test]
async fn test_list_posts_non_array_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .mount(&server)
        .await;

    assert!(client_for(&server.uri()).list_posts().await.is_empty());
}

#[tokio::test]
async fn test_list_posts_unreachable_is_empty() {
    // Nothing listens on port 9 on a test machine
    let client = client_for("http://127.0.0.1:9");
    assert!(client.list_posts().await.is_empty());
}

// ============================================================================
// register
// ============================================================================

#[tokio::test]
async fn test_register_sends_multipart_and_returns_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .and(body_string_contains("name=\"email\""))
        .and(body_string_contains("alice@example.com"))
        .and(body_string_contains("name=\"username\""))
        .and(body_string_contains("name=\"password\""))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"id": 7, "username": "alice"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = client_for(&server.uri())
        .register(&Registration::new("alice@example.com", "alice", "pw"))
        .await
        .unwrap();
    assert_eq!(body, json!({"id": 7, "username": "alice"}));
}

#[tokio::test]
async fn test_register_validation_errors_pass_through() {
    let server = MockServer::start().await;
    let errors = json!({"username": ["A user with that username already exists."]});
    Mock::given(method("POST"))
        .and(path("/api/register/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(errors.clone()))
        .mount(&server)
        .await;

    let body = client_for(&server.uri())
        .register(&Registration::new("a@b.c", "alice", "pw"))
        .await
        .unwrap();
    assert_eq!(body, errors);
}

// ============================================================================
// login
// ============================================================================

#[tokio::test]
async fn test_login_posts_json_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .and(body_json(json!({"username": "alice", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response(FAR_FUTURE)))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client_for(&server.uri())
        .login(&LoginRequest::new("alice", "pw"))
        .await
        .unwrap();

    match outcome {
        LoginOutcome::Authenticated(tokens) => assert_eq!(tokens.refresh, "refresh-token"),
        other => panic!("expected tokens, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_rejected_with_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({"detail": "No active account found with the given credentials"}),
        ))
        .mount(&server)
        .await;

    let outcome = client_for(&server.uri())
        .login(&LoginRequest::new("alice", "wrong"))
        .await
        .unwrap();

    match outcome {
        LoginOutcome::Rejected { message, .. } => {
            assert_eq!(message, "No active account found with the given credentials")
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_without_detail_is_invalid_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"password": ["required"]})))
        .mount(&server)
        .await;

    let outcome = client_for(&server.uri())
        .login(&LoginRequest::new("", ""))
        .await
        .unwrap();

    assert!(matches!(
        outcome,
        LoginOutcome::Rejected { ref message, .. } if message == "Invalid credentials"
    ));
}

// ============================================================================
// create_post
// ============================================================================

#[tokio::test]
async fn test_create_post_sends_bearer_and_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/"))
        .and(header("Authorization", "Bearer access-token"))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("Hello"))
        .and(body_string_contains("name=\"content\""))
        .and(body_string_contains("name=\"image\"; filename=\"cat.png\""))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_json(12, "Hello")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri()).with_auth("access-token");
    let draft = PostDraft::new("Hello", "World")
        .with_image(ImageUpload::new("cat.png", b"\x89PNG".to_vec()));

    match client.create_post(&draft).await {
        CreatePostOutcome::Created(post) => assert_eq!(post.id, 12),
        other => panic!("expected created post, got {:?}", other),
    }
}

#[tokio::test]
async fn test_create_post_without_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(post_json(1, "x")))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = client_for(&server.uri())
        .create_post(&PostDraft::new("t", "c"))
        .await;

    assert_eq!(
        outcome,
        CreatePostOutcome::Failed {
            message: "User not authenticated. No access token found.".to_string()
        }
    );
}

#[tokio::test]
async fn test_create_post_expired_token_reports_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(
            json!({"detail": "Given token not valid for any token type"}),
        ))
        .mount(&server)
        .await;

    let outcome = client_for(&server.uri())
        .with_auth("stale")
        .create_post(&PostDraft::new("t", "c"))
        .await;

    assert_eq!(
        outcome,
        CreatePostOutcome::Failed {
            message: "Given token not valid for any token type".to_string()
        }
    );
}

#[tokio::test]
async fn test_create_post_html_error_is_generic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/posts/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<h1>Server Error</h1>"))
        .mount(&server)
        .await;

    let outcome = client_for(&server.uri())
        .with_auth("tok")
        .create_post(&PostDraft::new("t", "c"))
        .await;

    assert_eq!(
        outcome,
        CreatePostOutcome::Failed {
            message: "Failed to create post.".to_string()
        }
    );
}

// ============================================================================
// health
// ============================================================================

#[tokio::test]
async fn test_health_ok() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    assert!(client_for(&server.uri()).health().await.unwrap());
}

#[tokio::test]
async fn test_health_unreachable_is_error() {
    assert!(client_for("http://127.0.0.1:9").health().await.is_err());
}
