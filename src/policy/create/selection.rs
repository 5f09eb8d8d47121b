//! Shared "enough free space, least free space" selection.
//!
//! Both `efs` and `lfs` route through [`create_least_sufficient`]; they differ
//! only in the [`ThresholdMode`] used to derive each upstream's floor.

use crate::policy::error::PolicyError;
use crate::policy::traits::CreateRequest;
use crate::policy::utils::{filter_creatable, ThresholdMode};
use crate::upstream::{FreeSpace, UpstreamRef};
use tracing::{debug, info, trace};

/// One probed candidate: its free space and effective threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reading {
    pub free: FreeSpace,
    pub threshold: u64,
}

/// Index of the reading with the least free space that still strictly
/// exceeds its threshold. Earlier readings win ties.
pub fn select_least_sufficient(readings: &[Reading]) -> Option<usize> {
    let mut best: Option<(usize, FreeSpace)> = None;

    for (idx, reading) in readings.iter().enumerate() {
        if !reading.free.exceeds(reading.threshold) {
            continue;
        }
        match best {
            Some((_, best_free)) if reading.free >= best_free => {}
            _ => best = Some((idx, reading.free)),
        }
    }

    best.map(|(idx, _)| idx)
}

/// Probe every candidate in order before comparing anything, so the result
/// only depends on the collected snapshot.
pub fn probe_candidates(
    candidates: &[UpstreamRef],
    mode: ThresholdMode,
    required_size: Option<u64>,
) -> Vec<Reading> {
    candidates
        .iter()
        .map(|upstream| {
            let free = FreeSpace::probe(upstream.as_ref());
            let threshold = mode.resolve(upstream.min_free_space(), required_size);
            trace!(
                upstream = %upstream.name(),
                free = %free,
                threshold,
                "Probed upstream"
            );
            Reading { free, threshold }
        })
        .collect()
}

pub fn create_least_sufficient(
    policy: &'static str,
    mode: ThresholdMode,
    upstreams: &[UpstreamRef],
    request: &CreateRequest,
) -> Result<Vec<UpstreamRef>, PolicyError> {
    let _span = tracing::debug_span!("create_policy", policy).entered();
    info!(policy, path = ?request.path(), "Using create policy");

    if upstreams.is_empty() {
        return Err(PolicyError::NoCandidates);
    }

    let candidates = filter_creatable(upstreams);
    if candidates.is_empty() {
        debug!("All {} upstreams are no-create", upstreams.len());
        return Err(PolicyError::NoWritableUpstream);
    }

    let readings = probe_candidates(&candidates, mode, request.size);
    match select_least_sufficient(&readings) {
        Some(idx) => {
            let chosen = candidates[idx].clone();
            info!(
                upstream = %chosen.name(),
                free = %readings[idx].free,
                "Creating on upstream"
            );
            Ok(vec![chosen])
        }
        None => {
            debug!(
                "None of {} creatable upstreams exceed their free space threshold",
                candidates.len()
            );
            Err(PolicyError::NoQualifyingUpstream)
        }
    }
}
