use crate::policy::create::selection::create_least_sufficient;
use crate::policy::error::PolicyError;
use crate::policy::traits::{CreatePolicy, CreateRequest};
use crate::policy::utils::ThresholdMode;
use crate::upstream::UpstreamRef;

/// Enough Free Space (efs) create policy.
/// Picks the creatable upstream with the least free space among those whose
/// free space exceeds the request size, or the upstream's configured minimum
/// when the size is unknown.
#[derive(Debug, Clone, Default)]
pub struct EnoughFreeSpaceCreatePolicy;

impl EnoughFreeSpaceCreatePolicy {
    pub fn new() -> Self {
        Self
    }
}

impl CreatePolicy for EnoughFreeSpaceCreatePolicy {
    fn name(&self) -> &'static str {
        "efs"
    }

    fn create(
        &self,
        upstreams: &[UpstreamRef],
        request: &CreateRequest,
    ) -> Result<Vec<UpstreamRef>, PolicyError> {
        create_least_sufficient(
            self.name(),
            ThresholdMode::RequestOrConfigured,
            upstreams,
            request,
        )
    }
}
