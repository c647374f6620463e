//! Authentication adapters.
//!
//! - `BcryptPasswordHasher` - `PasswordHasher` over bcrypt
//! - `JwtTokens` - `TokenIssuer` and `SessionValidator` over HS256 JWTs

mod jwt;
mod password;

pub use jwt::JwtTokens;
pub use password::BcryptPasswordHasher;
