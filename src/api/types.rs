//! Request and response types for the blog API.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::traits::{FilePart, MultipartForm};

/// A blog post as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    /// Absolute URL of the post image, if one was uploaded
    #[serde(default)]
    pub image: Option<String>,
    /// Author primary key
    #[serde(default)]
    pub author: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Login credentials. Only lives for the duration of one submit.
#[derive(Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration details for a new account.
#[derive(Clone)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl Registration {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build the multipart body sent to the register endpoint.
    pub fn to_form(&self) -> MultipartForm {
        MultipartForm::new()
            .text("email", &self.email)
            .text("username", &self.username)
            .text("password", &self.password)
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token pair returned by the token endpoint.
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// An image attached to a post draft.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl ImageUpload {
    /// Create an upload from in-memory bytes.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = guess_content_type(&file_name).map(str::to_string);
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Read an image from disk.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self::new(file_name, bytes))
    }

    fn to_part(&self) -> FilePart {
        FilePart {
            name: "image".to_string(),
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

/// MIME type for common image extensions.
pub fn guess_content_type(file_name: &str) -> Option<&'static str> {
    let ext = Path::new(file_name)
        .extension()?
        .to_str()?
        .to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// A post being composed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub image: Option<ImageUpload>,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image);
        self
    }

    /// The post as submitted, under the id the backend assigned.
    pub fn to_post(&self, id: i64) -> Post {
        Post {
            id,
            title: self.title.clone(),
            content: self.content.clone(),
            image: None,
            author: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Build the multipart body sent to the create-post endpoint.
    pub fn to_form(&self) -> MultipartForm {
        let form = MultipartForm::new()
            .text("title", &self.title)
            .text("content", &self.content);
        match &self.image {
            Some(image) => form.file(image.to_part()),
            None => form,
        }
    }
}

/// Result of a login call.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// The backend issued a token pair.
    Authenticated(TokenPair),
    /// The backend refused. `message` is its `detail` field, or a generic
    /// message; `body` is the raw response object.
    Rejected {
        message: String,
        body: serde_json::Value,
    },
}

/// Result of a create-post call.
#[derive(Debug, Clone, PartialEq)]
pub enum CreatePostOutcome {
    /// The backend created the post.
    Created(Post),
    /// Nothing was created; `message` is shown to the user.
    Failed { message: String },
}

impl CreatePostOutcome {
    pub fn failed(message: impl Into<String>) -> Self {
        CreatePostOutcome::Failed {
            message: message.into(),
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, CreatePostOutcome::Created(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_deserialize_full() {
        let post: Post = serde_json::from_value(json!({
            "id": 1,
            "author": 2,
            "title": "Hello",
            "content": "World",
            "image": "http://localhost:8000/media/post_images/cat.png",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        }))
        .unwrap();

        assert_eq!(post.id, 1);
        assert_eq!(post.author, Some(2));
        assert_eq!(
            post.image.as_deref(),
            Some("http://localhost:8000/media/post_images/cat.png")
        );
    }

    #[test]
    fn test_post_deserialize_minimal() {
        let post: Post =
            serde_json::from_value(json!({"id": 5, "title": "t", "content": "c", "image": null}))
                .unwrap();
        assert_eq!(post.id, 5);
        assert!(post.image.is_none());
        assert!(post.author.is_none());
    }

    #[test]
    fn test_login_request_serializes_json_fields() {
        let value = serde_json::to_value(LoginRequest::new("alice", "pw")).unwrap();
        assert_eq!(value, json!({"username": "alice", "password": "pw"}));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let login = format!("{:?}", LoginRequest::new("alice", "hunter2"));
        assert!(login.contains("alice"));
        assert!(!login.contains("hunter2"));

        let reg = format!("{:?}", Registration::new("a@b.c", "alice", "hunter2"));
        assert!(!reg.contains("hunter2"));

        let pair = TokenPair {
            access: "secret-access".to_string(),
            refresh: "secret-refresh".to_string(),
        };
        let pair = format!("{:?}", pair);
        assert!(!pair.contains("secret"));
    }

    #[test]
    fn test_registration_form_fields() {
        let form = Registration::new("a@b.c", "alice", "pw").to_form();
        assert_eq!(form.field("email"), Some("a@b.c"));
        assert_eq!(form.field("username"), Some("alice"));
        assert_eq!(form.field("password"), Some("pw"));
        assert!(form.files.is_empty());
    }

    #[test]
    fn test_draft_form_without_image() {
        let form = PostDraft::new("Title", "Body").to_form();
        assert_eq!(form.field("title"), Some("Title"));
        assert_eq!(form.field("content"), Some("Body"));
        assert!(form.files.is_empty());
    }

    #[test]
    fn test_draft_form_with_image() {
        let draft =
            PostDraft::new("Title", "Body").with_image(ImageUpload::new("cat.PNG", vec![1u8, 2, 3]));
        let form = draft.to_form();

        assert_eq!(form.files.len(), 1);
        assert_eq!(form.files[0].name, "image");
        assert_eq!(form.files[0].file_name, "cat.PNG");
        assert_eq!(form.files[0].content_type.as_deref(), Some("image/png"));
        assert_eq!(form.files[0].bytes, Bytes::from_static(&[1, 2, 3]));
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("a.jpg"), Some("image/jpeg"));
        assert_eq!(guess_content_type("a.JPEG"), Some("image/jpeg"));
        assert_eq!(guess_content_type("a.webp"), Some("image/webp"));
        assert_eq!(guess_content_type("a.txt"), None);
        assert_eq!(guess_content_type("noext"), None);
    }

    #[test]
    fn test_image_upload_from_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("photo.gif");
        std::fs::write(&path, b"GIF89a").unwrap();

        let upload = ImageUpload::from_path(&path).unwrap();
        assert_eq!(upload.file_name, "photo.gif");
        assert_eq!(upload.content_type.as_deref(), Some("image/gif"));
        assert_eq!(upload.bytes, Bytes::from_static(b"GIF89a"));
    }

    #[test]
    fn test_image_upload_from_missing_path() {
        let result = ImageUpload::from_path(Path::new("/definitely/not/here.png"));
        assert!(result.is_err());
    }
}
