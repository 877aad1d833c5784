//! Application state and key handling for the terminal UI.
//!
//! [`App`] owns the auth state and the three views. Network calls run on
//! spawned tasks that report back through an unbounded channel as
//! [`AppMessage`]s; the UI loop feeds them to [`App::handle_message`].

pub mod composer;
pub mod feed;
pub mod login;
pub mod messages;
pub mod session_writer;
pub mod status;
pub mod text_field;

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::api::{BlogApiClient, CreatePostOutcome, LoginOutcome};
use crate::auth::{restore_session, AuthState, SessionCheck, SESSION_EXPIRED_MESSAGE};
use crate::error::QuillError;
use crate::traits::SessionStore;

pub use composer::{ComposerField, PostComposer};
pub use feed::PostFeed;
pub use login::{LoginField, LoginForm};
pub use messages::AppMessage;
pub use session_writer::SessionWriter;
pub use status::{StatusKind, StatusLine};
pub use text_field::TextField;

/// Root application state.
pub struct App {
    /// Whether a usable session is held
    pub auth: AuthState,
    /// Header notice (session expired, logged out, login succeeded)
    pub notice: Option<StatusLine>,
    pub login: LoginForm,
    pub composer: PostComposer,
    pub feed: PostFeed,
    pub should_quit: bool,
    pub needs_redraw: bool,
    /// Animation counter, bumped by the UI loop
    pub tick_count: u64,
    /// Receiver taken by the UI loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender cloned into spawned tasks
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    client: BlogApiClient,
    store: Arc<dyn SessionStore>,
    /// Started on the first store write
    writer: Option<SessionWriter>,
}

impl App {
    pub fn new(client: BlogApiClient, store: Arc<dyn SessionStore>) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            auth: AuthState::LoggedOut,
            notice: None,
            login: LoginForm::new(),
            composer: PostComposer::new(),
            feed: PostFeed::new(),
            should_quit: false,
            needs_redraw: true,
            tick_count: 0,
            message_rx: Some(message_rx),
            message_tx,
            client,
            store,
            writer: None,
        }
    }

    pub fn api_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn is_logged_in(&self) -> bool {
        self.auth.is_logged_in()
    }

    /// Check the stored session at `now`, then fetch the post list.
    pub async fn start(&mut self, now: i64) {
        let check = restore_session(self.store.as_ref(), now).await;
        self.apply_session_check(check);
        self.refresh_posts();
    }

    /// Adopt the result of a startup session check.
    pub fn apply_session_check(&mut self, check: SessionCheck) {
        if check.expired {
            self.notice = Some(StatusLine::error(SESSION_EXPIRED_MESSAGE));
        }
        self.client
            .set_auth_token(check.state.access_token().map(str::to_string));
        self.auth = check.state;
        self.mark_dirty();
    }

    fn session_writer(&mut self) -> SessionWriter {
        self.writer
            .get_or_insert_with(|| SessionWriter::spawn(Arc::clone(&self.store)))
            .clone()
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.feed.loading || self.login.submitting || self.composer.submitting {
            self.mark_dirty();
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        self.mark_dirty();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::Esc => self.quit(),
            KeyCode::Char('r') if ctrl => self.refresh_posts(),
            KeyCode::Char('l') if ctrl => {
                if self.is_logged_in() {
                    self.logout();
                }
            }
            KeyCode::Up => self.feed.scroll_up(),
            KeyCode::Down => self.feed.scroll_down(),
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            KeyCode::Enter
                if key.modifiers.contains(KeyModifiers::ALT)
                    && self.is_logged_in()
                    && self.composer.focus == ComposerField::Content =>
            {
                self.composer.content.insert('\n');
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => self.focused_field().backspace(),
            KeyCode::Char(c) if !ctrl => self.focused_field().insert(c),
            _ => {}
        }
    }

    /// Insert pasted text into the focused field.
    pub fn handle_paste(&mut self, text: &str) {
        let single_line = !(self.is_logged_in() && self.composer.focus == ComposerField::Content);
        let text = if single_line {
            text.replace(['\r', '\n'], " ")
        } else {
            text.replace("\r\n", "\n")
        };
        self.focused_field().insert_str(&text);
        self.mark_dirty();
    }

    fn focused_field(&mut self) -> &mut TextField {
        if self.is_logged_in() {
            self.composer.focused_field()
        } else {
            self.login.focused_field()
        }
    }

    fn focus_next(&mut self) {
        if self.is_logged_in() {
            self.composer.focus_next();
        } else {
            self.login.focus_next();
        }
    }

    fn focus_prev(&mut self) {
        if self.is_logged_in() {
            self.composer.focus_prev();
        } else {
            self.login.focus_prev();
        }
    }

    fn submit(&mut self) {
        if self.is_logged_in() {
            self.submit_post();
        } else {
            self.submit_login();
        }
    }

    /// Send the login form's credentials.
    pub fn submit_login(&mut self) {
        let request = self.login.begin_submit();
        let client = self.client.clone();
        let writer = self.session_writer();
        let tx = self.message_tx.clone();

        tokio::spawn(async move {
            let message = match client.login(&request).await {
                Ok(LoginOutcome::Authenticated(tokens)) => {
                    match writer.establish(tokens).await {
                        Ok(session) => AppMessage::LoginSucceeded(session),
                        Err(e) => {
                            tracing::error!("Could not establish session: {}", e);
                            AppMessage::LoginFailed(QuillError::from(e).user_message())
                        }
                    }
                }
                Ok(LoginOutcome::Rejected { message, .. }) => AppMessage::LoginFailed(message),
                Err(e) => {
                    tracing::warn!("Login request failed: {}", e);
                    AppMessage::LoginFailed(QuillError::from(e).user_message())
                }
            };
            let _ = tx.send(message);
        });
    }

    /// Validate the composer and publish its draft.
    pub fn submit_post(&mut self) {
        let draft = match self.composer.begin_submit() {
            Ok(draft) => draft,
            Err(message) => {
                tracing::debug!("Draft rejected: {}", message);
                return;
            }
        };
        let client = self.client.clone();
        let tx = self.message_tx.clone();

        tokio::spawn(async move {
            let message = match client.create_post(&draft).await {
                CreatePostOutcome::Created(post) => AppMessage::PostCreated(post),
                CreatePostOutcome::Failed { message } => AppMessage::PostFailed(message),
            };
            let _ = tx.send(message);
        });
    }

    /// Flip the feed's refresh signal and fetch the list again.
    pub fn refresh_posts(&mut self) {
        self.feed.request_refresh();
        let client = self.client.clone();
        let tx = self.message_tx.clone();

        tokio::spawn(async move {
            let posts = client.list_posts().await;
            let _ = tx.send(AppMessage::PostsLoaded(posts));
        });
    }

    /// Drop the session and return to the login form.
    pub fn logout(&mut self) {
        self.auth = AuthState::LoggedOut;
        self.client.set_auth_token(None);
        self.composer = PostComposer::new();
        self.login.reset();
        self.notice = Some(StatusLine::info("Logged out."));
        self.mark_dirty();
        self.session_writer().clear();
    }

    /// Apply a result from a background task.
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::PostsLoaded(posts) => {
                tracing::debug!("Loaded {} posts", posts.len());
                self.feed.set_posts(posts);
            }
            AppMessage::LoginSucceeded(session) => {
                self.client
                    .set_auth_token(Some(session.access_token.clone()));
                self.auth = AuthState::LoggedIn(session);
                self.login.on_success();
                self.composer = PostComposer::new();
                self.notice = Some(StatusLine::success(login::LOGIN_SUCCESS_MESSAGE));
            }
            AppMessage::LoginFailed(reason) => self.login.on_failure(&reason),
            AppMessage::PostCreated(post) => {
                self.composer.on_created(&post);
                self.refresh_posts();
            }
            AppMessage::PostFailed(message) => self.composer.on_failed(&message),
        }
        self.mark_dirty();
    }
}
