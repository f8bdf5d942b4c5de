pub mod claims;
pub mod errors;
pub mod provider;

pub use claims::Claims;
pub use errors::TokenError;
pub use provider::TokenProvider;
