//! UI rendering for quill
//!
//! Layout, top to bottom:
//! - Header with the app name, backend URL, auth state and the notice line
//! - Left panel: login form (logged out) or post composer (logged in)
//! - Right panel: post feed
//! - Footer with keybind hints

mod components;
mod panels;
mod theme;

pub use theme::{
    status_color, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER,
    COLOR_INPUT_BG, COLOR_LINK, COLOR_SUCCESS,
};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use panels::{render_composer_panel, render_feed_panel, render_login_panel};

/// Render the whole screen.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Panels
            Constraint::Length(1), // Keybinds
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(2, 3)])
        .split(chunks[1]);

    if app.is_logged_in() {
        render_composer_panel(frame, columns[0], app);
    } else {
        render_login_panel(frame, columns[0], app);
    }
    render_feed_panel(frame, columns[1], app);

    render_keybinds(frame, chunks[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let auth = if app.is_logged_in() {
        Span::styled("logged in", Style::default().fg(COLOR_SUCCESS))
    } else {
        Span::styled("logged out", Style::default().fg(COLOR_DIM))
    };

    let title = Line::from(vec![
        Span::styled(
            "quill",
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}  ", app.api_url()), Style::default().fg(COLOR_DIM)),
        auth,
    ]);

    let notice = match &app.notice {
        Some(notice) => Line::from(Span::styled(
            notice.text.as_str(),
            Style::default().fg(status_color(notice.kind)),
        )),
        None => Line::from(""),
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(Paragraph::new(vec![title, notice]).block(block), area);
}

/// Keybind hints for the current state.
pub fn keybind_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints = vec![("Tab", "next field"), ("Enter", "submit")];
    if app.is_logged_in() {
        hints.push(("Alt-Enter", "newline"));
    }
    hints.push(("Up/Down", "scroll"));
    hints.push(("Ctrl-R", "refresh"));
    if app.is_logged_in() {
        hints.push(("Ctrl-L", "log out"));
    }
    hints.push(("Esc", "quit"));
    hints
}

fn render_keybinds(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = Vec::new();
    for (key, action) in keybind_hints(app) {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{}  ", action),
            Style::default().fg(COLOR_DIM),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{InMemorySessionStore, MockHttpClient};
    use crate::api::{BlogApiClient, Post};
    use crate::app::{AppMessage, StatusLine};
    use crate::auth::Session;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn create_test_app() -> App {
        let client = BlogApiClient::new("http://api.test", Arc::new(MockHttpClient::new()));
        App::new(client, Arc::new(InMemorySessionStore::new()))
    }

    fn render_to_string(app: &App) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_logged_out_shows_login_form() {
        let app = create_test_app();
        let screen = render_to_string(&app);
        assert!(screen.contains("Log in"));
        assert!(screen.contains("Username"));
        assert!(!screen.contains("New post"));
        assert!(screen.contains("http://api.test"));
    }

    #[tokio::test]
    async fn test_logged_in_shows_composer_and_posts() {
        let mut app = create_test_app();
        app.handle_message(AppMessage::LoginSucceeded(Session::new("a", "r", i64::MAX)));
        app.handle_message(AppMessage::PostsLoaded(vec![Post {
            id: 1,
            title: "First post".to_string(),
            content: "Body".to_string(),
            image: None,
            author: None,
            created_at: None,
            updated_at: None,
        }]));

        let screen = render_to_string(&app);
        assert!(screen.contains("New post"));
        assert!(screen.contains("First post"));
        assert!(screen.contains("Login successful!"));
        assert!(screen.contains("log out"));
    }

    #[test]
    fn test_notice_rendered() {
        let mut app = create_test_app();
        app.notice = Some(StatusLine::error("Session expired. Please log in again."));
        let screen = render_to_string(&app);
        assert!(screen.contains("Session expired. Please log in again."));
    }

    #[test]
    fn test_empty_feed_message() {
        let app = create_test_app();
        assert!(render_to_string(&app).contains("No posts yet."));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let app = create_test_app();
        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();
    }
}
