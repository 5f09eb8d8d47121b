pub mod create;
pub mod error;
pub mod traits;
pub mod utils;

// Re-export commonly used items
pub use error::PolicyError;
pub use traits::{CreatePolicy, CreateRequest};

pub use create::{EnoughFreeSpaceCreatePolicy, LeastFreeSpaceCreatePolicy};

/// Names accepted by [`create_policy_from_name`].
pub const CREATE_POLICY_NAMES: &[&str] = &["efs", "lfs"];

/// Create a policy instance from its name
pub fn create_policy_from_name(name: &str) -> Option<Box<dyn CreatePolicy>> {
    match name {
        "efs" => Some(Box::new(EnoughFreeSpaceCreatePolicy::new())),
        "lfs" => Some(Box::new(LeastFreeSpaceCreatePolicy::new())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_resolves_known_names() {
        for name in CREATE_POLICY_NAMES {
            let policy = create_policy_from_name(name).unwrap();
            assert_eq!(policy.name(), *name);
        }
    }

    #[test]
    fn test_registry_rejects_unknown() {
        assert!(create_policy_from_name("mfs").is_none());
        assert!(create_policy_from_name("").is_none());
    }
}
