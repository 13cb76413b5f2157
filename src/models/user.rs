use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

/// A registered local account.
///
/// The password is base64-encoded, which is reversible. Accounts are a local
/// convenience and not a security boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(id: String, username: String, email: String, password: &str) -> Self {
        Self {
            id,
            username,
            email,
            password: obfuscate_password(password),
        }
    }

    pub fn password_matches(&self, password: &str) -> bool {
        self.password == obfuscate_password(password)
    }

    pub fn session(&self) -> SessionUser {
        SessionUser {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// The signed-in user, stored without the password
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

pub fn obfuscate_password(password: &str) -> String {
    general_purpose::STANDARD.encode(password.as_bytes())
}
