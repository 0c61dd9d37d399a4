//! Retry module (ergonomic namespace)
//! - policy.rs: exponential backoff with additive jitter

pub mod policy;

pub use policy::*;
