//! Credential adapters: bcrypt password hashing and HS256 bearer tokens.

mod bcrypt_hasher;
mod jwt_token_service;

pub use bcrypt_hasher::{BCRYPT_MAX_COST, BCRYPT_MIN_COST, BcryptPasswordHasher};
pub use jwt_token_service::JwtTokenService;
