use std::sync::Arc;

use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{SessionUser, User},
    store::{time_based_id, AppStore},
};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Second entry of the password, checked when present
    #[serde(default)]
    pub confirm_password: Option<String>,
}

/// Mock local accounts: a user list plus a "current user" pointer in storage
#[derive(Clone)]
pub struct Accounts {
    store: Arc<AppStore>,
}

impl Accounts {
    pub fn new(store: Arc<AppStore>) -> Self {
        Self { store }
    }

    /// Creates an account and signs it in
    pub fn register(&self, request: RegisterRequest) -> AppResult<SessionUser> {
        let username = request.username.trim();
        let email = request.email.trim();
        if username.is_empty() || email.is_empty() || request.password.is_empty() {
            return Err(AppError::InvalidInput(
                "Username, email and password are required".to_string(),
            ));
        }
        if let Some(confirm) = &request.confirm_password {
            if *confirm != request.password {
                return Err(AppError::InvalidInput("Passwords do not match".to_string()));
            }
        }

        // Email check and id pick happen under the same lock as the insert
        let user = self.store.users().insert_with(|existing| {
            if existing.iter().any(|u| u.email == email) {
                return Err(AppError::Conflict(
                    "User already exists with this email".to_string(),
                ));
            }
            let id = time_based_id(|candidate| existing.iter().any(|u| u.id == candidate));
            Ok(User::new(id, username.to_string(), email.to_string(), &request.password))
        })?;

        let session = user.session();
        self.store.set_current_user(&session)?;

        tracing::info!(user_id = %session.id, "Registered local account");
        Ok(session)
    }

    /// Signs in; on failure the current user is left as it was
    pub fn login(&self, email: &str, password: &str) -> AppResult<SessionUser> {
        let user = self
            .store
            .users()
            .list()
            .into_iter()
            .find(|u| u.email == email.trim() && u.password_matches(password));

        match user {
            Some(user) => {
                let session = user.session();
                self.store.set_current_user(&session)?;
                tracing::info!(user_id = %session.id, "Signed in");
                Ok(session)
            }
            None => {
                tracing::info!("Rejected sign-in attempt");
                Err(AppError::Unauthorized("Invalid email or password".to_string()))
            }
        }
    }

    pub fn logout(&self) -> AppResult<()> {
        self.store.clear_current_user()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.store.current_user()
    }

    /// The current user, or an error naming what needs a sign-in
    pub fn require_user(&self, action: &str) -> AppResult<SessionUser> {
        self.current_user()
            .ok_or_else(|| AppError::Unauthorized(format!("Please login to {}", action)))
    }
}
