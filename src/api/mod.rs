//! Blog backend API.

pub mod client;
pub mod types;

pub use client::{
    describe_error, ApiError, BlogApiClient, CREATE_POST_FAILED_MESSAGE, DEFAULT_API_URL,
    INVALID_CREDENTIALS_MESSAGE, NOT_AUTHENTICATED_MESSAGE,
};
pub use types::{
    guess_content_type, CreatePostOutcome, ImageUpload, LoginOutcome, LoginRequest, Post,
    PostDraft, Registration, TokenPair,
};
