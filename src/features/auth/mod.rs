//! Researcher accounts: registration and credential verification.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/auth/register` | Create an account (email doubles as username) |
//! | POST | `/api/auth/login` | Verify a username/email and password |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use repositories::PgAccountRepository;
pub use services::{AuthService, PasswordPolicy};
