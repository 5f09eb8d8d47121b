use crate::upstream::UpstreamRef;
use std::io;
use std::path::Path;

/// Bytes available to unprivileged writers on the filesystem holding `path`.
/// Uses f_bavail so filesystem reservations for root are not counted as free.
pub fn available_space(path: &Path) -> io::Result<u64> {
    use nix::sys::statvfs::statvfs;

    let stat = statvfs(path).map_err(io::Error::from)?;
    let available = stat.blocks_available() as u64 * stat.fragment_size() as u64;

    tracing::trace!("Available space for {:?}: {} bytes (f_bavail)", path, available);
    Ok(available)
}

/// Drop upstreams flagged no-create, keeping the original order.
pub fn filter_creatable(upstreams: &[UpstreamRef]) -> Vec<UpstreamRef> {
    upstreams
        .iter()
        .filter(|u| {
            if u.is_no_create() {
                tracing::trace!(upstream = %u.name(), "Skipping no-create upstream");
                false
            } else {
                true
            }
        })
        .cloned()
        .collect()
}

/// How a policy derives the per-upstream free-space floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThresholdMode {
    /// The request size wins when present, otherwise the configured minimum.
    RequestOrConfigured,
    /// Always the configured minimum; request size is ignored.
    Configured,
}

impl ThresholdMode {
    pub fn resolve(&self, configured_min: u64, required_size: Option<u64>) -> u64 {
        match (self, required_size) {
            (ThresholdMode::RequestOrConfigured, Some(size)) => size,
            _ => configured_min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockUpstream;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_available_space_matches_statvfs() {
        let temp_dir = TempDir::new().unwrap();
        let stat = nix::sys::statvfs::statvfs(temp_dir.path()).unwrap();
        let expected = stat.blocks_available() as u64 * stat.fragment_size() as u64;

        // the tempdir is idle, but other writers may shift the count between calls
        let available = available_space(temp_dir.path()).unwrap();
        let slack = 64 * 1024 * 1024;
        assert!(available.abs_diff(expected) <= slack);
    }

    #[test]
    fn test_available_space_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let err = available_space(&temp_dir.path().join("gone")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_filter_preserves_order() {
        let upstreams: Vec<UpstreamRef> = vec![
            Arc::new(MockUpstream::new("a", 1, 0)),
            Arc::new(MockUpstream::new("b", 1, 0).no_create()),
            Arc::new(MockUpstream::new("c", 1, 0)),
            Arc::new(MockUpstream::new("d", 1, 0)),
        ];

        let names: Vec<_> = filter_creatable(&upstreams)
            .iter()
            .map(|u| u.name().to_string())
            .collect();
        assert_eq!(names, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_filter_all_no_create_is_empty() {
        let upstreams: Vec<UpstreamRef> = vec![Arc::new(MockUpstream::new("d", 1, 0).no_create())];
        assert!(filter_creatable(&upstreams).is_empty());
    }

    #[test]
    fn test_threshold_request_overrides_configured() {
        let mode = ThresholdMode::RequestOrConfigured;
        assert_eq!(mode.resolve(20, None), 20);
        assert_eq!(mode.resolve(20, Some(60)), 60);
        // a smaller request still overrides the configured reserve
        assert_eq!(mode.resolve(20, Some(5)), 5);
    }

    #[test]
    fn test_threshold_configured_ignores_request() {
        let mode = ThresholdMode::Configured;
        assert_eq!(mode.resolve(20, Some(60)), 20);
        assert_eq!(mode.resolve(0, None), 0);
    }
}
