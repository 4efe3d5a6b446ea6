/// Licensing client module - need-auth-code check and code validation
pub mod api;
pub mod error;

pub use api::{AuthDecision, LicenseClient, activation_url};
pub use error::ApiError;
