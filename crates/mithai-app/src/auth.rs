//! Login and registration flows.
//!
//! Form state plus submit logic: a successful response feeds the session
//! store, which reports where to navigate; a failure sets an inline error
//! and leaves the session exactly as it was.

use mithai_client::AuthApi;
use mithai_session::{Destination, SessionStore};
use tracing::debug;

const LOGIN_FAILED: &str = "Invalid username or password. Please try again.";
const REGISTER_FAILED: &str = "Registration failed. Please try again.";

/// State of the login form.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    /// Inline error from the last attempt.
    pub error: Option<String>,
    busy: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a submit is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Clear the inline error, as when the user edits a field.
    pub fn touch(&mut self) {
        self.error = None;
    }

    /// Submit the credentials. Returns the landing destination on success.
    pub async fn submit<G: AuthApi>(
        &mut self,
        api: &G,
        session: &SessionStore,
    ) -> Option<Destination> {
        self.busy = true;
        self.error = None;

        let outcome = api.login(&self.username, &self.password).await;
        self.busy = false;

        match outcome {
            Ok(auth) => {
                let role = auth.role();
                Some(session.login(auth.access_token, role))
            }
            Err(e) => {
                debug!(error = %e, "login rejected");
                self.error = Some(LOGIN_FAILED.to_string());
                None
            }
        }
    }
}

/// State of the registration form.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    busy: bool,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn touch(&mut self) {
        self.error = None;
    }

    /// Submit the registration; a created account logs straight in.
    pub async fn submit<G: AuthApi>(
        &mut self,
        api: &G,
        session: &SessionStore,
    ) -> Option<Destination> {
        self.busy = true;
        self.error = None;

        let outcome = api
            .register(&self.username, &self.email, &self.password)
            .await;
        self.busy = false;

        match outcome {
            Ok(auth) => {
                let role = auth.role();
                Some(session.login(auth.access_token, role))
            }
            Err(e) => {
                debug!(error = %e, "registration rejected");
                self.error = Some(REGISTER_FAILED.to_string());
                None
            }
        }
    }
}
