use async_trait::async_trait;
use sqlx::PgPool;

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::auth::models::{Account, NewAccount};

/// Message returned when registration hits an existing username or email
pub const DUPLICATE_ACCOUNT_MESSAGE: &str = "User with this email already exists";

/// Durable collection of accounts
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Insert in a single statement; a duplicate username or email is
    /// reported as `AppError::Conflict`
    async fn insert(&self, account: NewAccount) -> Result<Account>;
}

const ACCOUNT_COLUMNS: &str = "id, username, password, password_scheme, full_name, email, \
     mobile_number, role, department, country, created_at, updated_at";

pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let query = format!(
            "SELECT {} FROM accounts WHERE username = $1 LIMIT 1",
            ACCOUNT_COLUMNS
        );

        let account = sqlx::query_as::<_, Account>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let query = format!(
            "SELECT {} FROM accounts WHERE email = $1 ORDER BY created_at LIMIT 1",
            ACCOUNT_COLUMNS
        );

        let account = sqlx::query_as::<_, Account>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(account)
    }

    async fn insert(&self, account: NewAccount) -> Result<Account> {
        let query = format!(
            r#"
            INSERT INTO accounts
                (username, password, password_scheme, full_name, email,
                 mobile_number, role, department, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            ACCOUNT_COLUMNS
        );

        let credential = account.credential();

        sqlx::query_as::<_, Account>(&query)
            .bind(&account.username)
            .bind(credential.as_stored())
            .bind(credential.scheme_name())
            .bind(&account.full_name)
            .bind(&account.email)
            .bind(&account.mobile_number)
            .bind(account.role.map(|r| r.as_str()))
            .bind(&account.department)
            .bind(&account.country)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    AppError::Conflict(DUPLICATE_ACCOUNT_MESSAGE.to_string())
                } else {
                    tracing::error!("Failed to create account: {:?}", e);
                    AppError::Database(e)
                }
            })
    }
}
