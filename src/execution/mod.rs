//! Outbound request plumbing shared by the provider adapters.

pub mod http;
pub mod policy;
