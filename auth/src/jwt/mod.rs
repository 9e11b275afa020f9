pub mod claims;
pub mod errors;
pub mod service;

pub use claims::Claims;
pub use errors::TokenError;
pub use service::SigningSecret;
pub use service::TokenService;
pub use service::DEFAULT_TOKEN_VALIDITY_DAYS;
