//! Test utilities for unionfs-efs
//! Provides in-memory upstreams with scripted free space

use crate::upstream::{Upstream, UpstreamRef};
use parking_lot::Mutex;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug)]
pub struct MockUpstream {
    name: String,
    free: Mutex<Option<u64>>,
    min_free_space: u64,
    no_create: bool,
    probes: AtomicUsize,
}

impl MockUpstream {
    pub fn new(name: &str, free: u64, min_free_space: u64) -> Self {
        Self {
            name: name.to_string(),
            free: Mutex::new(Some(free)),
            min_free_space,
            no_create: false,
            probes: AtomicUsize::new(0),
        }
    }

    /// An upstream whose free-space probe always fails.
    pub fn failing(name: &str, min_free_space: u64) -> Self {
        let upstream = Self::new(name, 0, min_free_space);
        *upstream.free.lock() = None;
        upstream
    }

    pub fn no_create(mut self) -> Self {
        self.no_create = true;
        self
    }

    pub fn set_free(&self, free: u64) {
        *self.free.lock() = Some(free);
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

impl Upstream for MockUpstream {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_no_create(&self) -> bool {
        self.no_create
    }

    fn min_free_space(&self) -> u64 {
        self.min_free_space
    }

    fn free_space(&self) -> io::Result<u64> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        let free = *self.free.lock();
        free.ok_or_else(|| {
            io::Error::new(io::ErrorKind::Unsupported, "free space not supported")
        })
    }
}

/// Wrap mocks as the trait objects policies consume.
pub fn upstream_refs(mocks: &[Arc<MockUpstream>]) -> Vec<UpstreamRef> {
    mocks.iter().map(|m| m.clone() as UpstreamRef).collect()
}

/// Names of the selected upstreams, for terse assertions.
pub fn names(selected: &[UpstreamRef]) -> Vec<String> {
    selected.iter().map(|u| u.name().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_upstream_counts_probes() {
        let mock = MockUpstream::new("a", 10, 0);
        assert_eq!(mock.free_space().unwrap(), 10);
        mock.set_free(7);
        assert_eq!(mock.free_space().unwrap(), 7);
        assert_eq!(mock.probe_count(), 2);
    }

    #[test]
    fn test_failing_mock() {
        let mock = MockUpstream::failing("x", 5);
        assert!(mock.free_space().is_err());
        assert_eq!(mock.min_free_space(), 5);
    }
}
