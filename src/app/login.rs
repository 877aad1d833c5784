//! Login form state.

use crate::api::LoginRequest;
use crate::app::status::StatusLine;
use crate::app::text_field::TextField;

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

/// Credentials being typed plus the result of the last attempt.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: TextField,
    pub password: TextField,
    pub focus: LoginField,
    pub status: Option<StatusLine>,
    /// A login request is in flight.
    pub submitting: bool,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: TextField::new(),
            password: TextField::masked(),
            focus: LoginField::Username,
            status: None,
            submitting: false,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    pub fn focus_prev(&mut self) {
        // Two fields: previous and next coincide
        self.focus_next();
    }

    pub fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    /// Take the typed credentials for sending.
    ///
    /// Fields are sent as typed; the backend decides what is acceptable.
    pub fn begin_submit(&mut self) -> LoginRequest {
        self.submitting = true;
        self.status = Some(StatusLine::info("Logging in..."));
        LoginRequest::new(self.username.value(), self.password.value())
    }

    pub fn on_success(&mut self) {
        self.submitting = false;
        self.password.clear();
        self.status = Some(StatusLine::success(LOGIN_SUCCESS_MESSAGE));
    }

    /// Record a failure. `reason` is the backend detail or a generic reason.
    pub fn on_failure(&mut self, reason: &str) {
        self.submitting = false;
        self.status = Some(StatusLine::error(format!("Login failed: {}", reason)));
    }

    /// Reset to an empty form, as after logout.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::status::StatusKind;

    #[test]
    fn test_focus_cycles() {
        let mut form = LoginForm::new();
        assert_eq!(form.focus, LoginField::Username);
        form.focus_next();
        assert_eq!(form.focus, LoginField::Password);
        form.focus_prev();
        assert_eq!(form.focus, LoginField::Username);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut form = LoginForm::new();
        form.focused_field().insert_str("alice");
        form.focus_next();
        form.focused_field().insert_str("pw");
        assert_eq!(form.username.value(), "alice");
        assert_eq!(form.password.value(), "pw");
        assert!(form.password.is_masked());
    }

    #[test]
    fn test_submit_builds_request() {
        let mut form = LoginForm::new();
        form.username.set("alice");
        form.password.set("secret");

        let request = form.begin_submit();
        assert_eq!(request.username, "alice");
        assert_eq!(request.password, "secret");
        assert!(form.submitting);
    }

    #[test]
    fn test_success_clears_password() {
        let mut form = LoginForm::new();
        form.username.set("alice");
        form.password.set("secret");
        form.begin_submit();
        form.on_success();

        assert!(!form.submitting);
        assert_eq!(form.password.value(), "");
        assert_eq!(form.username.value(), "alice");
        assert_eq!(
            form.status,
            Some(StatusLine::success("Login successful!"))
        );
    }

    #[test]
    fn test_failure_message() {
        let mut form = LoginForm::new();
        form.password.set("wrong");
        form.begin_submit();
        form.on_failure("Invalid credentials");

        let status = form.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Login failed: Invalid credentials");
        // Kept so the user can correct it
        assert_eq!(form.password.value(), "wrong");
    }
}
