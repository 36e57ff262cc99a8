//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every query that mutates
//! or reveals owner data carries the ownership predicate in its SQL.

pub mod myeongsik_repo;

pub use myeongsik_repo::MyeongSikRepo;
