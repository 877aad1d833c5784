//! AppMessage enum for results coming back from background tasks.

use crate::api::Post;
use crate::auth::Session;

/// Messages sent to the UI loop by spawned API calls.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A post list fetch finished (empty on any failure)
    PostsLoaded(Vec<Post>),
    /// Login succeeded and the session has been stored
    LoginSucceeded(Session),
    /// Login failed; carries the reason shown after "Login failed: "
    LoginFailed(String),
    /// The backend created a post
    PostCreated(Post),
    /// Post creation failed; carries the message to show
    PostFailed(String),
}
