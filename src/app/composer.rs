//! Post composer state.

use std::path::PathBuf;

use crate::api::{ImageUpload, Post, PostDraft};
use crate::app::status::StatusLine;
use crate::app::text_field::TextField;
use crate::error::classify_io_error;

pub const POST_CREATED_MESSAGE: &str = "Post created!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerField {
    Title,
    Content,
    Image,
}

impl ComposerField {
    fn next(self) -> Self {
        match self {
            ComposerField::Title => ComposerField::Content,
            ComposerField::Content => ComposerField::Image,
            ComposerField::Image => ComposerField::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            ComposerField::Title => ComposerField::Image,
            ComposerField::Content => ComposerField::Title,
            ComposerField::Image => ComposerField::Content,
        }
    }
}

/// Title, content and an optional image path for the next post.
#[derive(Debug, Clone)]
pub struct PostComposer {
    pub title: TextField,
    pub content: TextField,
    /// Path to an image file on disk; empty means no image
    pub image_path: TextField,
    pub focus: ComposerField,
    pub status: Option<StatusLine>,
    pub submitting: bool,
}

impl Default for PostComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl PostComposer {
    pub fn new() -> Self {
        Self {
            title: TextField::new(),
            content: TextField::new(),
            image_path: TextField::new(),
            focus: ComposerField::Title,
            status: None,
            submitting: false,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            ComposerField::Title => &mut self.title,
            ComposerField::Content => &mut self.content,
            ComposerField::Image => &mut self.image_path,
        }
    }

    /// Validate the fields and build a draft.
    ///
    /// Title and content are required. A non-empty image path must point to
    /// a readable file. On error the message is also set as the status and
    /// nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<PostDraft, String> {
        let draft = self.build_draft();
        match &draft {
            Ok(_) => {
                self.submitting = true;
                self.status = Some(StatusLine::info("Publishing..."));
            }
            Err(message) => self.status = Some(StatusLine::error(message.clone())),
        }
        draft
    }

    fn build_draft(&self) -> Result<PostDraft, String> {
        if self.title.is_blank() {
            return Err("Title is required.".to_string());
        }
        if self.content.is_blank() {
            return Err("Content is required.".to_string());
        }

        let mut draft = PostDraft::new(self.title.value(), self.content.value());

        let raw_path = self.image_path.value().trim();
        if !raw_path.is_empty() {
            let path = expand_home(raw_path);
            let image = ImageUpload::from_path(&path).map_err(|e| {
                classify_io_error(e, Some(path.as_path()), "read image").user_message()
            })?;
            draft = draft.with_image(image);
        }

        Ok(draft)
    }

    /// The post was created: clear everything.
    pub fn on_created(&mut self, post: &Post) {
        tracing::debug!("Composer cleared after post {}", post.id);
        *self = Self::new();
        self.status = Some(StatusLine::success(POST_CREATED_MESSAGE));
    }

    /// The post was not created: keep the fields for another try.
    pub fn on_failed(&mut self, message: &str) {
        self.submitting = false;
        self.status = Some(StatusLine::error(message));
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => PathBuf::from(path),
        },
        None => PathBuf::from(path),
    }
}
