//! In-memory repositories for service and handler tests.

#![cfg(test)]

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use std::sync::Mutex;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::models::{Account, NewAccount};
use crate::features::auth::repositories::{AccountRepository, DUPLICATE_ACCOUNT_MESSAGE};
use crate::features::research::models::{NewResearchReport, ResearchReport};
use crate::features::research::repositories::ReportRepository;

/// Account row as written before hashing existed: plaintext, no scheme recorded
pub fn legacy_account(username: &str, email: Option<&str>, password: &str) -> Account {
    let now = Utc::now();
    Account {
        id: Uuid::new_v4(),
        username: username.to_string(),
        password: password.to_string(),
        password_scheme: None,
        full_name: None,
        email: email.map(str::to_string),
        mobile_number: None,
        role: None,
        department: None,
        country: None,
        created_at: now,
        updated_at: now,
    }
}

/// Mirrors the unique indexes on `accounts.username` and `accounts.email`
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccountRepository {
    pub fn seed(&self, account: Account) {
        self.accounts.lock().unwrap().push(account);
    }

    pub fn len(&self) -> usize {
        self.accounts.lock().unwrap().len()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .iter()
            .find(|a| a.email.as_deref() == Some(email))
            .cloned())
    }

    async fn insert(&self, account: NewAccount) -> Result<Account> {
        let mut accounts = self.accounts.lock().unwrap();

        let duplicate = accounts.iter().any(|a| {
            a.username == account.username
                || (account.email.is_some() && a.email == account.email)
        });
        if duplicate {
            return Err(AppError::Conflict(DUPLICATE_ACCOUNT_MESSAGE.to_string()));
        }

        let now = Utc::now();
        let credential = account.credential();
        let created = Account {
            id: Uuid::new_v4(),
            username: account.username.clone(),
            password: credential.as_stored().to_string(),
            password_scheme: Some(credential.scheme_name().to_string()),
            full_name: account.full_name,
            email: account.email,
            mobile_number: account.mobile_number,
            role: account.role.map(|r| r.to_string()),
            department: account.department,
            country: account.country,
            created_at: now,
            updated_at: now,
        };
        accounts.push(created.clone());
        Ok(created)
    }
}

#[derive(Default)]
pub struct InMemoryReportRepository {
    reports: Mutex<Vec<ResearchReport>>,
}

impl InMemoryReportRepository {
    pub fn reports(&self) -> Vec<ResearchReport> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportRepository for InMemoryReportRepository {
    async fn insert(&self, report: NewResearchReport) -> Result<ResearchReport> {
        let now = Utc::now();
        let created = ResearchReport {
            id: Uuid::new_v4(),
            files: Json(report.files),
            uploader_name: report.uploader_name,
            uploader_email: report.uploader_email,
            created_at: now,
            updated_at: now,
        };
        self.reports.lock().unwrap().push(created.clone());
        Ok(created)
    }
}
