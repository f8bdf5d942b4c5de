pub mod argon2;
pub mod encoded;
pub mod errors;

pub use self::argon2::PasswordHasher;
pub use encoded::EncodedHash;
pub use encoded::ARGON2_VERSION;
pub use errors::PasswordError;
