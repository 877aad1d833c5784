//! Non-interactive subcommands.
//!
//! Each command writes its output to the given writer so it can be checked
//! in tests; the dispatcher in `cli::mod` passes stdout and turns a
//! [`QuillError`] into a report with a recovery hint.

use std::io::Write;

use crate::api::{BlogApiClient, LoginOutcome, LoginRequest, Registration};
use crate::auth::{end_session, establish_session, restore_session, AuthState};
use crate::error::{AuthError, QuillError, QuillResult};
use crate::traits::SessionStore;

/// Print every post, newest as the backend orders them.
pub async fn posts_command<W: Write>(client: &BlogApiClient, out: &mut W) -> QuillResult<()> {
    let posts = client.list_posts().await;
    if posts.is_empty() {
        writeln!(out, "No posts.")?;
        return Ok(());
    }

    for post in &posts {
        writeln!(out, "#{} {}", post.id, post.title)?;
        if let Some(created) = post.created_at.as_deref() {
            writeln!(out, "   {}", created)?;
        }
        for line in post.content.lines() {
            writeln!(out, "   {}", line)?;
        }
        if let Some(image) = post.image.as_deref() {
            writeln!(out, "   image: {}", image)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Create an account and print whatever the backend answered.
pub async fn register_command<W: Write>(
    client: &BlogApiClient,
    registration: &Registration,
    out: &mut W,
) -> QuillResult<()> {
    let body = client.register(registration).await?;
    writeln!(out, "{:#}", body)?;
    Ok(())
}

/// Log in and store the session.
pub async fn login_command<W: Write>(
    client: &BlogApiClient,
    store: &dyn SessionStore,
    request: &LoginRequest,
    out: &mut W,
) -> QuillResult<()> {
    match client.login(request).await? {
        LoginOutcome::Authenticated(tokens) => {
            let session = establish_session(store, tokens).await?;
            tracing::info!("Session stored, expires at {}", session.expires_at);
            writeln!(out, "Login successful!")?;
            Ok(())
        }
        LoginOutcome::Rejected { message, .. } => {
            Err(AuthError::LoginRejected { message }.into())
        }
    }
}

/// Remove the stored session.
pub async fn logout_command<W: Write>(store: &dyn SessionStore, out: &mut W) -> QuillResult<()> {
    end_session(store).await?;
    writeln!(out, "Logged out.")?;
    Ok(())
}

/// Print the API URL, backend health and session state at `now`.
///
/// An expired session is removed, as the TUI does on startup.
pub async fn status_command<W: Write>(
    client: &BlogApiClient,
    store: &dyn SessionStore,
    now: i64,
    out: &mut W,
) -> QuillResult<()> {
    writeln!(out, "API URL:  {}", client.base_url())?;

    let health = match client.health().await {
        Ok(true) => "ok".to_string(),
        Ok(false) => "unhealthy".to_string(),
        Err(e) => format!("unreachable ({})", QuillError::from(e).user_message()),
    };
    writeln!(out, "Backend:  {}", health)?;

    let check = restore_session(store, now).await;
    let session = match &check.state {
        AuthState::LoggedIn(session) => {
            format!("logged in, expires in {}", format_duration(session.seconds_remaining(now)))
        }
        AuthState::LoggedOut if check.expired => "expired (removed)".to_string(),
        AuthState::LoggedOut => "logged out".to_string(),
    };
    writeln!(out, "Session:  {}", session)?;
    Ok(())
}

fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    if seconds >= 86_400 {
        format!("{}d {}h", seconds / 86_400, (seconds % 86_400) / 3_600)
    } else if seconds >= 3_600 {
        format!("{}h {}m", seconds / 3_600, (seconds % 3_600) / 60)
    } else if seconds >= 60 {
        format!("{}m", seconds / 60)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemorySessionStore, MockHttpClient, MockResponse};
    use crate::auth::claims::encode_test_token;
    use crate::auth::Session;
    use crate::error::ErrorCategory;
    use crate::traits::HttpError;
    use serde_json::json;
    use std::sync::Arc;

    fn client(http: &MockHttpClient) -> BlogApiClient {
        BlogApiClient::new("http://api.test", Arc::new(http.clone()))
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[tokio::test]
    async fn test_posts_command_prints_posts() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://api.test/posts/",
            MockResponse::json(
                200,
                json!([{"id": 2, "title": "Hello", "content": "a\nb", "image": "http://i/x.png"}]),
            ),
        );

        let mut buf = Vec::new();
        posts_command(&client(&http), &mut buf).await.unwrap();
        let text = output(buf);
        assert!(text.contains("#2 Hello"));
        assert!(text.contains("   b"));
        assert!(text.contains("image: http://i/x.png"));
    }

    #[tokio::test]
    async fn test_posts_command_empty() {
        let http = MockHttpClient::new();
        let mut buf = Vec::new();
        posts_command(&client(&http), &mut buf).await.unwrap();
        assert_eq!(output(buf), "No posts.\n");
    }

    #[tokio::test]
    async fn test_register_prints_body() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://api.test/api/register/",
            MockResponse::json(400, json!({"username": ["already exists"]})),
        );

        let mut buf = Vec::new();
        register_command(
            &client(&http),
            &Registration::new("a@b.c", "alice", "pw"),
            &mut buf,
        )
        .await
        .unwrap();
        assert!(output(buf).contains("already exists"));
    }

    #[tokio::test]
    async fn test_login_command_stores_session() {
        let http = MockHttpClient::new();
        let access = encode_test_token(&json!({"exp": 2_000_000_000i64}));
        http.set_response(
            "http://api.test/api/token/",
            MockResponse::json(200, json!({"access": access, "refresh": "r"})),
        );
        let store = InMemorySessionStore::new();

        let mut buf = Vec::new();
        login_command(
            &client(&http),
            &store,
            &LoginRequest::new("alice", "pw"),
            &mut buf,
        )
        .await
        .unwrap();

        assert_eq!(output(buf), "Login successful!\n");
        assert_eq!(store.current().unwrap().expires_at, 2_000_000_000);
    }

    #[tokio::test]
    async fn test_login_command_rejected() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://api.test/api/token/",
            MockResponse::json(401, json!({})),
        );
        let store = InMemorySessionStore::new();

        let mut buf = Vec::new();
        let err = login_command(
            &client(&http),
            &store,
            &LoginRequest::new("alice", "bad"),
            &mut buf,
        )
        .await
        .unwrap_err();

        assert_eq!(err.user_message(), "Login failed: Invalid credentials");
        assert_eq!(err.error_code(), "AUTH_LOGIN_REJECTED");
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_login_command_unreachable_backend() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        let store = InMemorySessionStore::new();

        let mut buf = Vec::new();
        let err = login_command(
            &client(&http),
            &store,
            &LoginRequest::new("alice", "pw"),
            &mut buf,
        )
        .await
        .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn test_logout_command_store_failure() {
        let store = InMemorySessionStore::new();
        store.set_clear_should_fail(true);

        let mut buf = Vec::new();
        let err = logout_command(&store, &mut buf).await.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::System);
        assert!(buf.is_empty());
    }

    #[tokio::test]
    async fn test_logout_command() {
        let store = InMemorySessionStore::with_session(Session::new("a", "r", 10));
        let mut buf = Vec::new();
        logout_command(&store, &mut buf).await.unwrap();
        assert_eq!(store.current(), None);
        assert_eq!(output(buf), "Logged out.\n");
    }

    #[tokio::test]
    async fn test_status_command_reports_expired_session() {
        let http = MockHttpClient::new();
        http.set_response(
            "http://api.test/health/",
            MockResponse::json(200, json!({"status": "ok"})),
        );
        let store = InMemorySessionStore::with_session(Session::new("a", "r", 100));

        let mut buf = Vec::new();
        status_command(&client(&http), &store, 200, &mut buf)
            .await
            .unwrap();
        let text = output(buf);

        assert!(text.contains("API URL:  http://api.test"));
        assert!(text.contains("Backend:  ok"));
        assert!(text.contains("Session:  expired (removed)"));
        assert_eq!(store.current(), None);
    }

    #[tokio::test]
    async fn test_status_command_logged_in() {
        let http = MockHttpClient::new();
        let store = InMemorySessionStore::with_session(Session::new("a", "r", 7_300));

        let mut buf = Vec::new();
        status_command(&client(&http), &store, 100, &mut buf)
            .await
            .unwrap();
        let text = output(buf);
        assert!(text.contains("Session:  logged in, expires in 2h 0m"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(-5), "0s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(600), "10m");
        assert_eq!(format_duration(90_000), "1d 1h");
    }
}
