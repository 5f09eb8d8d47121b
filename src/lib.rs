//! Create-placement policies for a union filesystem.
//!
//! Given the upstreams of a union mount, a [`policy::CreatePolicy`] decides which
//! single upstream receives a newly created file, based on live free space and
//! per-upstream reserves.

pub mod branch;
pub mod config;
pub mod config_manager;
pub mod policy;
pub mod upstream;

#[cfg(test)]
mod test_utils;

pub use branch::{Branch, BranchMode};
pub use policy::{create_policy_from_name, CreatePolicy, CreateRequest, PolicyError};
pub use upstream::{FreeSpace, Upstream, UpstreamRef};
