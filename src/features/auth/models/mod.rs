pub mod account;
pub mod credential;

pub use account::{Account, NewAccount, ResearcherRole};
pub use credential::{Credential, PasswordScheme};
