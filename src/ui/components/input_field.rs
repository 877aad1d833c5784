//! Input Field Component
//!
//! A labelled text input with focus handling and password masking.
//! Multi-line values grow the box up to the height it is given.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::TextField;
use crate::ui::theme::{COLOR_BORDER, COLOR_DIM, COLOR_INPUT_BG};

/// Configuration for rendering an input field
#[derive(Debug, Clone)]
pub struct InputFieldConfig<'a> {
    /// Label displayed above the input
    pub label: &'a str,
    /// Current value of the input
    pub value: &'a str,
    /// Whether the input is currently focused
    pub focused: bool,
    /// Whether to mask the value (for passwords)
    pub is_password: bool,
    /// Optional placeholder text when empty
    pub placeholder: Option<&'a str>,
    /// Rows of text inside the box
    pub rows: u16,
}

impl<'a> InputFieldConfig<'a> {
    /// Create a new input field configuration
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
            is_password: false,
            placeholder: None,
            rows: 1,
        }
    }

    /// Configuration for a [`TextField`], picking up its masking.
    pub fn for_field(label: &'a str, field: &'a TextField) -> Self {
        Self::new(label, field.value()).password(field.is_masked())
    }

    /// Set whether the input is focused
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set whether to mask the value (for passwords)
    pub fn password(mut self, is_password: bool) -> Self {
        self.is_password = is_password;
        self
    }

    /// Set placeholder text
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Set the number of text rows inside the box
    pub fn rows(mut self, rows: u16) -> Self {
        self.rows = rows.max(1);
        self
    }
}

/// Calculate the height needed for an input field
///
/// Label (1) plus the box: border, `rows` of content, border.
pub fn calculate_input_field_height(config: &InputFieldConfig) -> u16 {
    1 + config.rows + 2
}

/// Render an input field with label and input box
///
/// Returns the height consumed by this input field.
pub fn render_input_field(frame: &mut Frame, area: Rect, config: &InputFieldConfig) -> u16 {
    let height = calculate_input_field_height(config).min(area.height);
    if height < 2 || area.width < 6 {
        return 0;
    }

    let label_style = if config.focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(COLOR_DIM)
    };

    let label_area = Rect {
        x: area.x + 2,
        y: area.y,
        width: area.width.saturating_sub(4),
        height: 1,
    };
    let label = Paragraph::new(Line::from(Span::styled(config.label, label_style)));
    frame.render_widget(label, label_area);

    let input_area = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: height - 1,
    };

    let border_color = if config.focused {
        Color::White
    } else {
        COLOR_BORDER
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(COLOR_INPUT_BG));

    let show_placeholder = config.value.is_empty() && config.placeholder.is_some();
    let mut content = if config.is_password {
        "\u{2022}".repeat(config.value.chars().count())
    } else if let (true, Some(placeholder)) = (show_placeholder, config.placeholder) {
        placeholder.to_string()
    } else {
        config.value.to_string()
    };

    let text_style = if show_placeholder || !config.focused {
        Style::default().fg(COLOR_DIM)
    } else {
        Style::default().fg(Color::White)
    };

    if config.focused {
        if show_placeholder {
            content.clear();
        }
        content.push('\u{2588}'); // Block cursor
    }

    let lines: Vec<Line> = content
        .split('\n')
        .map(|line| Line::from(Span::styled(line.to_string(), text_style)))
        .collect();

    // Keep the end of long values (and the cursor) in view
    let inner_rows = input_area.height.saturating_sub(2);
    let scroll = (lines.len() as u16).saturating_sub(inner_rows);

    let input_text = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(input_text, input_area);
    height
}
