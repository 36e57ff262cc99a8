//! Request extractors (authentication).

pub mod auth;
