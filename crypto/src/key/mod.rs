pub mod errors;
pub mod provider;

pub use errors::KeyError;
pub use provider::KeyProvider;
pub use provider::RsaKeyPair;
