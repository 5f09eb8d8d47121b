use std::cmp::Ordering;
use std::fmt;
use std::io;
use std::sync::Arc;

/// Read-only view over one backing store taking part in the union.
pub trait Upstream: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// True when this upstream must never receive newly created files.
    fn is_no_create(&self) -> bool;

    /// Configured reserve in bytes, loaded once at startup.
    fn min_free_space(&self) -> u64;

    /// Live query of available bytes. Never cached by callers.
    fn free_space(&self) -> io::Result<u64>;
}

pub type UpstreamRef = Arc<dyn Upstream>;

/// A single free-space observation. `Unbounded` stands in for an upstream
/// that could not report its space and orders above every known value.
///
/// An `Unbounded` upstream exceeds every threshold, so it stays eligible and
/// wins only when no known-space upstream qualifies ahead of it. rclone's
/// union `efs` differs here: a failed probe there reports `MaxInt64`, which
/// never beats its `MaxInt64` starting minimum, so that upstream can never be
/// picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeSpace {
    Known(u64),
    Unbounded,
}

impl FreeSpace {
    /// Probe `upstream`, downgrading failures to `Unbounded`.
    pub fn probe(upstream: &dyn Upstream) -> Self {
        match upstream.free_space() {
            Ok(bytes) => FreeSpace::Known(bytes),
            Err(e) => {
                tracing::warn!(
                    upstream = %upstream.name(),
                    error = %e,
                    "Free space is not supported for upstream, treating as unbounded"
                );
                FreeSpace::Unbounded
            }
        }
    }

    pub fn exceeds(&self, threshold: u64) -> bool {
        match self {
            FreeSpace::Known(bytes) => *bytes > threshold,
            FreeSpace::Unbounded => true,
        }
    }
}

impl PartialOrd for FreeSpace {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FreeSpace {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FreeSpace::Known(a), FreeSpace::Known(b)) => a.cmp(b),
            (FreeSpace::Known(_), FreeSpace::Unbounded) => Ordering::Less,
            (FreeSpace::Unbounded, FreeSpace::Known(_)) => Ordering::Greater,
            (FreeSpace::Unbounded, FreeSpace::Unbounded) => Ordering::Equal,
        }
    }
}

impl fmt::Display for FreeSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FreeSpace::Known(bytes) => write!(f, "{} bytes", bytes),
            FreeSpace::Unbounded => f.write_str("unbounded"),
        }
    }
}
