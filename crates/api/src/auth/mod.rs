//! Authentication: validation of tokens issued by the identity provider.

pub mod jwt;
