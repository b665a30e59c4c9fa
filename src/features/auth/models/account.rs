use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::models::Credential;

/// Roles a researcher may pick when registering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResearcherRole {
    Student,
    Professor,
    Historian,
}

impl ResearcherRole {
    pub const ALL: [ResearcherRole; 3] = [
        ResearcherRole::Student,
        ResearcherRole::Professor,
        ResearcherRole::Historian,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResearcherRole::Student => "Student",
            ResearcherRole::Professor => "Professor",
            ResearcherRole::Historian => "Historian",
        }
    }
}

impl fmt::Display for ResearcherRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResearcherRole {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| format!("Unknown role: {}", s))
    }
}

/// Database model for accounts
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub password: String,
    pub password_scheme: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn credential(&self) -> Credential {
        Credential::from_stored(self.password_scheme.as_deref(), self.password.clone())
    }
}

/// Insert payload for a new account.
///
/// Only hashed credentials are accepted, so a plaintext password can never
/// reach the insert statement.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    credential: Credential,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub role: Option<ResearcherRole>,
    pub department: Option<String>,
    pub country: Option<String>,
}

impl NewAccount {
    pub fn new(username: String, credential: Credential) -> Result<Self> {
        if !credential.is_hashed() {
            return Err(AppError::Internal(
                "Refusing to store an unhashed password".to_string(),
            ));
        }

        Ok(Self {
            username,
            credential,
            full_name: None,
            email: None,
            mobile_number: None,
            role: None,
            department: None,
            country: None,
        })
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }
}
