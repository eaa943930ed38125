pub mod error;
pub mod user_service;
pub mod validation;

pub use error::RequestError;
pub use user_service::UserService;
pub use validation::{ensure_identity_matches, validate_registration, UserRequest};
