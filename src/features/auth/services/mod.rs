pub mod auth_service;
pub mod password_policy;

pub use auth_service::AuthService;
pub use password_policy::PasswordPolicy;
