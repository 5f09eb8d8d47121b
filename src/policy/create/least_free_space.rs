use crate::policy::create::selection::create_least_sufficient;
use crate::policy::error::PolicyError;
use crate::policy::traits::{CreatePolicy, CreateRequest};
use crate::policy::utils::ThresholdMode;
use crate::upstream::UpstreamRef;

/// Least Free Space (lfs) create policy.
/// Same selection as efs, but only ever honors each upstream's configured
/// minimum; the request size is ignored.
#[derive(Debug, Clone, Default)]
pub struct LeastFreeSpaceCreatePolicy;

impl LeastFreeSpaceCreatePolicy {
    pub fn new() -> Self {
        Self
    }
}

impl CreatePolicy for LeastFreeSpaceCreatePolicy {
    fn name(&self) -> &'static str {
        "lfs"
    }

    fn create(
        &self,
        upstreams: &[UpstreamRef],
        request: &CreateRequest,
    ) -> Result<Vec<UpstreamRef>, PolicyError> {
        create_least_sufficient(self.name(), ThresholdMode::Configured, upstreams, request)
    }
}
