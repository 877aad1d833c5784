//! Post list state.

use crate::api::Post;

/// The fetched posts, in the order the backend returned them.
#[derive(Debug, Clone, Default)]
pub struct PostFeed {
    pub posts: Vec<Post>,
    /// A fetch is in flight
    pub loading: bool,
    /// Flips every time a refetch is requested
    pub refresh_signal: bool,
    /// Index of the first post shown
    pub scroll: usize,
}

impl PostFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a refetch as requested.
    pub fn request_refresh(&mut self) {
        self.refresh_signal = !self.refresh_signal;
        self.loading = true;
    }

    /// Replace the list with a fresh fetch result.
    pub fn set_posts(&mut self, posts: Vec<Post>) {
        self.posts = posts;
        self.loading = false;
        self.scroll = self.scroll.min(self.posts.len().saturating_sub(1));
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll + 1 < self.posts.len() {
            self.scroll += 1;
        }
    }

    /// Posts from the scroll position on.
    pub fn visible(&self) -> &[Post] {
        self.posts.get(self.scroll..).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
