//! Left and right panel rendering
//!
//! The left panel holds the login form or the post composer, depending on
//! the auth state. The right panel holds the post feed.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::api::Post;
use crate::app::{App, ComposerField, LoginField, StatusLine};

use super::components::{render_input_field, InputFieldConfig};
use super::theme::{status_color, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_HEADER, COLOR_LINK};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

fn panel_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(COLOR_HEADER).add_modifier(Modifier::BOLD),
        ))
}

fn render_status(frame: &mut Frame, area: Rect, status: Option<&StatusLine>) {
    let Some(status) = status else {
        return;
    };
    if area.is_empty() {
        return;
    }
    let line = Line::from(Span::styled(
        status.text.as_str(),
        Style::default().fg(status_color(status.kind)),
    ));
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

/// Take `height` rows off the top of `area`.
fn take_rows(area: &mut Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let top = Rect { height, ..*area };
    area.y += height;
    area.height -= height;
    top
}

// ============================================================================
// Left Panel: Login
// ============================================================================

pub fn render_login_panel(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel_block("Log in");
    let mut inner = block.inner(area);
    frame.render_widget(block, area);

    let form = &app.login;

    let username = InputFieldConfig::for_field("Username", &form.username)
        .focused(form.focus == LoginField::Username);
    let used = render_input_field(frame, inner, &username);
    take_rows(&mut inner, used);

    let password = InputFieldConfig::for_field("Password", &form.password)
        .focused(form.focus == LoginField::Password);
    let used = render_input_field(frame, inner, &password);
    take_rows(&mut inner, used + 1);

    let mut status_area = take_rows(&mut inner, 2);
    status_area.x += 2;
    status_area.width = status_area.width.saturating_sub(4);
    render_status(frame, status_area, form.status.as_ref());
}

// ============================================================================
// Left Panel: Composer
// ============================================================================

pub fn render_composer_panel(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel_block("New post");
    let mut inner = block.inner(area);
    frame.render_widget(block, area);

    let composer = &app.composer;

    let title = InputFieldConfig::for_field("Title", &composer.title)
        .focused(composer.focus == ComposerField::Title);
    let used = render_input_field(frame, inner, &title);
    take_rows(&mut inner, used);

    // Content gets what is left after the image field and status line
    let content_rows = inner.height.saturating_sub(4 + 3).clamp(1, 12);
    let content = InputFieldConfig::for_field("Content", &composer.content)
        .focused(composer.focus == ComposerField::Content)
        .rows(content_rows);
    let used = render_input_field(frame, inner, &content);
    take_rows(&mut inner, used);

    let image = InputFieldConfig::for_field("Image (optional path)", &composer.image_path)
        .focused(composer.focus == ComposerField::Image)
        .placeholder("~/pictures/photo.png");
    let used = render_input_field(frame, inner, &image);
    take_rows(&mut inner, used);

    let mut status_area = take_rows(&mut inner, 2);
    status_area.x += 2;
    status_area.width = status_area.width.saturating_sub(4);
    render_status(frame, status_area, composer.status.as_ref());
}

// ============================================================================
// Right Panel: Feed
// ============================================================================

pub fn render_feed_panel(frame: &mut Frame, area: Rect, app: &App) {
    let feed = &app.feed;
    let title = if feed.loading {
        let frame_idx = (app.tick_count / 4) as usize % SPINNER.len();
        format!("Posts {}", SPINNER[frame_idx])
    } else {
        format!("Posts ({})", feed.posts.len())
    };
    let block = panel_block(&title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = if feed.is_empty() {
        let text = if feed.loading { "Loading..." } else { "No posts yet." };
        vec![Line::from(Span::styled(text, Style::default().fg(COLOR_DIM)))]
    } else {
        feed.visible().iter().flat_map(post_lines).collect()
    };

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Lines for one post: title, metadata, body, image URL, separator.
pub fn post_lines(post: &Post) -> Vec<Line<'_>> {
    let mut lines = vec![Line::from(Span::styled(
        post.title.as_str(),
        Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
    ))];

    let mut meta = format!("#{}", post.id);
    if let Some(author) = post.author {
        meta.push_str(&format!(" by user {}", author));
    }
    if let Some(created) = post.created_at.as_deref() {
        meta.push_str(&format!(" on {}", format_timestamp(created)));
    }
    lines.push(Line::from(Span::styled(meta, Style::default().fg(COLOR_DIM))));

    lines.extend(post.content.lines().map(Line::from));

    if let Some(image) = post.image.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("image: ", Style::default().fg(COLOR_DIM)),
            Span::styled(image, Style::default().fg(COLOR_LINK)),
        ]));
    }

    lines.push(Line::from(""));
    lines
}

/// Show an RFC 3339 timestamp as `YYYY-MM-DD HH:MM`; anything else as given.
fn format_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
