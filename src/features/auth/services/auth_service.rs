use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{AccountDto, LoginRequestDto, RegisterRequestDto};
use crate::features::auth::models::{Credential, NewAccount, ResearcherRole};
use crate::features::auth::repositories::AccountRepository;
use crate::features::auth::services::password_policy::PasswordPolicy;

/// Same message for unknown identifiers and wrong passwords
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Service for authentication operations (register, login)
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    password_policy: PasswordPolicy,
}

impl AuthService {
    pub fn new(accounts: Arc<dyn AccountRepository>, password_policy: PasswordPolicy) -> Self {
        Self {
            accounts,
            password_policy,
        }
    }

    /// Login with a username or email and a password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<AccountDto> {
        dto.validate()?;

        let (Some(identifier), Some(password)) = (dto.email_or_id, dto.password) else {
            return Err(AppError::Validation(
                "Email/Research ID and password are required".to_string(),
            ));
        };

        // Username first, then email; first match wins
        let account = match self.accounts.find_by_username(&identifier).await? {
            Some(account) => Some(account),
            None => self.accounts.find_by_email(&identifier).await?,
        };

        let Some(account) = account else {
            debug!("Login failed: no account matches identifier");
            return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
        };

        if !self.verify(password, account.credential()).await? {
            debug!("Login failed: password mismatch for account {}", account.id);
            return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
        }

        info!("Account logged in: id={}", account.id);
        Ok(account.into())
    }

    /// Register a new account; the email doubles as the username
    pub async fn register(&self, dto: RegisterRequestDto) -> Result<AccountDto> {
        dto.validate()?;

        let (Some(full_name), Some(email), Some(password)) =
            (dto.full_name, dto.email, dto.password)
        else {
            return Err(AppError::Validation(
                "Full name, email, and password are required".to_string(),
            ));
        };

        let role = dto
            .role
            .filter(|r| !r.is_empty())
            .map(|r| r.parse::<ResearcherRole>())
            .transpose()
            .map_err(AppError::Validation)?;

        let credential = self.hash(password).await?;

        let mut new_account = NewAccount::new(email.clone(), credential)?;
        new_account.full_name = Some(full_name);
        new_account.email = Some(email);
        new_account.mobile_number = dto.mobile_number;
        new_account.role = role;
        new_account.department = dto.department;
        new_account.country = dto.country;

        let account = self.accounts.insert(new_account).await?;

        info!(
            "Account registered: id={}, role={:?}",
            account.id, account.role
        );

        Ok(account.into())
    }

    // Argon2 is deliberately slow; keep it off the async workers
    async fn hash(&self, password: String) -> Result<Credential> {
        let policy = self.password_policy.clone();
        tokio::task::spawn_blocking(move || policy.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))?
    }

    async fn verify(&self, password: String, credential: Credential) -> Result<bool> {
        if !credential.is_hashed() {
            return Ok(self.password_policy.verify(&password, &credential));
        }

        let policy = self.password_policy.clone();
        tokio::task::spawn_blocking(move || policy.verify(&password, &credential))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::auth::models::Account;
    use crate::shared::test_helpers::{legacy_account, InMemoryAccountRepository};
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;
    use tokio_test::{assert_err, assert_ok};

    fn service(repo: Arc<InMemoryAccountRepository>) -> AuthService {
        AuthService::new(repo, PasswordPolicy::new().unwrap())
    }

    fn register_dto(email: &str) -> RegisterRequestDto {
        RegisterRequestDto {
            full_name: Some(Name().fake()),
            email: Some(email.to_string()),
            password: Some("longenough1".to_string()),
            ..Default::default()
        }
    }

    fn login_dto(identifier: &str, password: &str) -> LoginRequestDto {
        LoginRequestDto {
            email_or_id: Some(identifier.to_string()),
            password: Some(password.to_string()),
            role: None,
        }
    }

    #[tokio::test]
    async fn test_register_fresh_email() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let service = service(repo.clone());

        let first = assert_ok!(service.register(register_dto("jane@x.edu")).await);
        let second_email: String = SafeEmail().fake();
        let second = assert_ok!(service.register(register_dto(&second_email)).await);

        assert_eq!(first.email.as_deref(), Some("jane@x.edu"));
        assert_eq!(first.username, "jane@x.edu");
        assert_ne!(first.id, second.id);

        let json = serde_json::to_value(&first).unwrap();
        assert!(json.get("password").is_none());
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let service = service(repo.clone());

        assert_ok!(service.register(register_dto("jane@x.edu")).await);

        let stored: Account = repo.find_by_email("jane@x.edu").await.unwrap().unwrap();
        assert_ne!(stored.password, "longenough1");
        assert!(stored.credential().is_hashed());
        assert_eq!(stored.password_scheme.as_deref(), Some("argon2"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let service = service(repo.clone());

        assert_ok!(service.register(register_dto("jane@x.edu")).await);
        let err = assert_err!(service.register(register_dto("jane@x.edu")).await);

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_register_conflicts_with_legacy_username() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        repo.seed(legacy_account("jane@x.edu", None, "plaintext"));
        let service = service(repo.clone());

        let err = assert_err!(service.register(register_dto("jane@x.edu")).await);
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registrations_same_email_create_one_account() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let service = Arc::new(service(repo.clone()));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let service = service.clone();
                tokio::spawn(async move { service.register(register_dto("jane@x.edu")).await })
            })
            .collect();

        let mut created = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(AppError::Conflict(_)) => conflicts += 1,
                Err(other) => panic!("unexpected error: {:?}", other),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(conflicts, 7);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_register_missing_fields() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let service = service(repo.clone());

        let dto = RegisterRequestDto {
            full_name: None,
            ..register_dto("jane@x.edu")
        };
        let err = assert_err!(service.register(dto).await);

        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "Full name, email, and password are required")
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn test_register_missing_fields_checked_before_conflict() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let service = service(repo.clone());
        assert_ok!(service.register(register_dto("jane@x.edu")).await);

        let dto = RegisterRequestDto {
            password: None,
            ..register_dto("jane@x.edu")
        };
        let err = assert_err!(service.register(dto).await);
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_unknown_role() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let service = service(repo.clone());

        let dto = RegisterRequestDto {
            role: Some("Curator".to_string()),
            ..register_dto("jane@x.edu")
        };
        let err = assert_err!(service.register(dto).await);
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(repo.len(), 0);

        let dto = RegisterRequestDto {
            role: Some("Historian".to_string()),
            ..register_dto("jane@x.edu")
        };
        let account = assert_ok!(service.register(dto).await);
        assert_eq!(account.role.as_deref(), Some("Historian"));
    }

    #[tokio::test]
    async fn test_register_then_login_round_trip() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let service = service(repo);

        let created = assert_ok!(service.register(register_dto("jane@x.edu")).await);
        let logged_in = assert_ok!(service.login(login_dto("jane@x.edu", "longenough1")).await);

        assert_eq!(created.id, logged_in.id);
    }

    #[tokio::test]
    async fn test_login_by_username_or_email() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        repo.seed(legacy_account("RA-1024", Some("ra@x.edu"), "s3cret"));
        let service = service(repo);

        let by_username = assert_ok!(service.login(login_dto("RA-1024", "s3cret")).await);
        let by_email = assert_ok!(service.login(login_dto("ra@x.edu", "s3cret")).await);

        assert_eq!(by_username.id, by_email.id);
    }

    #[tokio::test]
    async fn test_login_prefers_username_match() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let by_name = legacy_account("shared@x.edu", None, "name-pass");
        let by_mail = legacy_account("other", Some("shared@x.edu"), "mail-pass");
        repo.seed(by_mail);
        repo.seed(by_name.clone());
        let service = service(repo);

        let account = assert_ok!(service.login(login_dto("shared@x.edu", "name-pass")).await);
        assert_eq!(account.id, by_name.id);

        let err = assert_err!(service.login(login_dto("shared@x.edu", "mail-pass")).await);
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let service = service(repo);
        assert_ok!(service.register(register_dto("jane@x.edu")).await);

        let wrong_password = assert_err!(service.login(login_dto("jane@x.edu", "nope")).await);
        let unknown = assert_err!(service.login(login_dto("ghost@x.edu", "nope")).await);

        match (wrong_password, unknown) {
            (AppError::Auth(a), AppError::Auth(b)) => {
                assert_eq!(a, INVALID_CREDENTIALS);
                assert_eq!(a, b);
            }
            other => panic!("unexpected errors: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_legacy_plaintext_without_migration() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        repo.seed(legacy_account("old-timer", None, "letmein"));
        let service = service(repo.clone());

        assert_ok!(service.login(login_dto("old-timer", "letmein")).await);
        assert_ok!(service.login(login_dto("old-timer", "letmein")).await);

        let stored = repo.find_by_username("old-timer").await.unwrap().unwrap();
        assert_eq!(stored.password, "letmein");
    }

    #[tokio::test]
    async fn test_login_missing_fields() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let service = service(repo);

        let dto = LoginRequestDto {
            email_or_id: Some("jane@x.edu".to_string()),
            password: Some(String::new()),
            role: None,
        };
        let err = assert_err!(service.login(dto).await);
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_login_does_not_mutate_store() {
        let repo = Arc::new(InMemoryAccountRepository::default());
        let service = service(repo.clone());
        assert_ok!(service.register(register_dto("jane@x.edu")).await);

        let _ = service.login(login_dto("jane@x.edu", "longenough1")).await;
        let _ = service.login(login_dto("jane@x.edu", "wrong")).await;

        assert_eq!(repo.len(), 1);
    }
}
