// Authentication module
// Password hashing, stateless JWT issuance/validation, account rules,
// and the login/registration flow over an injected user repository

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::{AuthError, ConflictField};
pub use handlers::{login_handler, me_handler, register_handler};
pub use middleware::AuthenticatedUser;
pub use models::{AuthResponse, LoginRequest, RegisterRequest, RegisterResponse, User, UserResponse};
pub use password::{HashCost, PasswordService};
pub use repository::{InMemoryUserRepository, PgUserRepository, UserRepository};
pub use service::{normalize_email, AuthService};
pub use token::{Claims, SigningSecret, TokenService, DEFAULT_TOKEN_TTL_SECONDS};
