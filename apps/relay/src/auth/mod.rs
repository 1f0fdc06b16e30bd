pub mod claims;
pub mod jwt;

pub use claims::{Audience, Claims};
pub use jwt::{mint_hs256_token, verify_access_token};
