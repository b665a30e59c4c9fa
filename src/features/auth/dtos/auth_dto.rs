use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::features::auth::models::{Account, ResearcherRole};

/// Request DTO for registration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestDto {
    #[validate(
        required(message = "Full name, email, and password are required"),
        length(min = 1, message = "Full name, email, and password are required")
    )]
    #[schema(example = "Jane Doe")]
    pub full_name: Option<String>,

    #[validate(
        required(message = "Full name, email, and password are required"),
        length(min = 1, message = "Full name, email, and password are required")
    )]
    #[schema(example = "jane@x.edu")]
    pub email: Option<String>,

    #[validate(
        required(message = "Full name, email, and password are required"),
        length(min = 1, message = "Full name, email, and password are required")
    )]
    pub password: Option<String>,

    pub mobile_number: Option<String>,

    /// One of `Student`, `Professor`, `Historian`
    #[validate(custom(function = "validate_registration_role"))]
    #[schema(example = "Historian")]
    pub role: Option<String>,

    pub department: Option<String>,

    pub country: Option<String>,
}

fn validate_registration_role(role: &str) -> Result<(), ValidationError> {
    if role.is_empty() || role.parse::<ResearcherRole>().is_ok() {
        return Ok(());
    }

    let mut err = ValidationError::new("role");
    err.message = Some("Role must be one of: Student, Professor, Historian".into());
    Err(err)
}

/// Request DTO for login
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestDto {
    /// Username (research ID) or email
    #[validate(
        required(message = "Email/Research ID and password are required"),
        length(min = 1, message = "Email/Research ID and password are required")
    )]
    #[schema(example = "jane@x.edu")]
    pub email_or_id: Option<String>,

    #[validate(
        required(message = "Email/Research ID and password are required"),
        length(min = 1, message = "Email/Research ID and password are required")
    )]
    pub password: Option<String>,

    /// Free-form role picked on the login form; not checked against the account
    pub role: Option<String>,
}

/// Account as returned to clients; the password never leaves the server
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    pub id: Uuid,
    pub username: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Account> for AccountDto {
    fn from(a: Account) -> Self {
        Self {
            id: a.id,
            username: a.username,
            full_name: a.full_name,
            email: a.email,
            mobile_number: a.mobile_number,
            role: a.role,
            department: a.department,
            country: a.country,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

/// Response payload for login and registration
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponseDto {
    pub user: AccountDto,
}
