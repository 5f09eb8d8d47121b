use crate::policy::error::PolicyError;
use crate::upstream::UpstreamRef;
use std::path::{Path, PathBuf};

/// Per-call inputs for a create decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub path: PathBuf,
    /// Size of the file about to be written, when the caller knows it.
    pub size: Option<u64>,
}

impl CreateRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: None,
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Create policies determine which upstream receives new files/directories.
///
/// The result is a sequence so single-target and multi-target policies share
/// one signature; the policies in this crate always return one element.
pub trait CreatePolicy: Send + Sync {
    fn name(&self) -> &'static str;
    fn create(
        &self,
        upstreams: &[UpstreamRef],
        request: &CreateRequest,
    ) -> Result<Vec<UpstreamRef>, PolicyError>;
}
