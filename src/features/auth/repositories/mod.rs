pub mod account_repository;

pub use account_repository::{AccountRepository, PgAccountRepository, DUPLICATE_ACCOUNT_MESSAGE};
