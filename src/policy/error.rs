use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("object not found: no upstreams to choose from")]
    NoCandidates,
    #[error("permission denied: every upstream is no-create")]
    NoWritableUpstream,
    #[error("no upstream has enough free space")]
    NoQualifyingUpstream,
}

impl PolicyError {
    pub fn errno(&self) -> i32 {
        // Standard errno constants compatible with MUSL
        const ENOENT: i32 = 2;
        const EACCES: i32 = 13;

        match self {
            PolicyError::NoCandidates => ENOENT,
            PolicyError::NoWritableUpstream => EACCES,
            PolicyError::NoQualifyingUpstream => ENOENT,
        }
    }
}
