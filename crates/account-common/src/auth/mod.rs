//! Authentication utilities

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, TOKEN_PATTERN};
pub use password::{
    credential_hasher, hash_password, verify_password, Argon2Hasher, CredentialHasher,
    PlainHasher,
};
