//! API exposure modules
//!
//! Each exposure type consumes a `ServerHost` and produces a Router for its
//! protocol. REST is the only one so far.

pub mod rest;

pub use rest::RestExposure;
