//! HTTP handler implementations, one module per resource.

pub mod calendar;
pub mod myeongsik;
