//! Reachability polling: find the first candidate endpoint that accepts
//! connections before a deadline.
//!
//! Imports only from `crate::domain`.

use std::future::Future;

use futures_util::future::join_all;
use tokio::time::Instant;
use waypoint_common::HostAndPort;

use crate::domain::{PollConfig, ResolveError};

/// Select the endpoint to connect to.
///
/// With waiting disabled the first candidate is returned and `predicate` is
/// never called. Otherwise every round probes the candidates concurrently
/// and the first one, in candidate order, for which `predicate` returned
/// `true` wins. Failed rounds are retried every `poll.interval` until the
/// deadline (absolute from the first round) has passed. At least one round
/// always runs.
///
/// `predicate` is an opaque capability: any failure inside it must be
/// reported as `false`.
///
/// # Errors
///
/// Returns [`ResolveError::ReachabilityTimeout`] when no candidate succeeds
/// before the deadline, or [`ResolveError::NoAddressesAvailable`] when
/// `candidates` is empty.
pub async fn poll_first_reachable<F, Fut>(
    node_id: &str,
    candidates: &[HostAndPort],
    poll: &PollConfig,
    predicate: F,
) -> Result<HostAndPort, ResolveError>
where
    F: Fn(HostAndPort) -> Fut,
    Fut: Future<Output = bool>,
{
    let Some(first) = candidates.first() else {
        return Err(ResolveError::NoAddressesAvailable {
            node_id: node_id.to_string(),
        });
    };
    let Some(wait) = poll.wait else {
        tracing::debug!(node_id, endpoint = %first, "reachability wait disabled, using first candidate");
        return Ok(first.clone());
    };
    let probed = if poll.scan_all_candidates {
        candidates
    } else {
        std::slice::from_ref(first)
    };

    let deadline = Instant::now() + wait;
    let mut round = 0u32;
    loop {
        if round > 0 && Instant::now() >= deadline {
            break;
        }
        round += 1;
        tracing::debug!(node_id, round, candidates = probed.len(), "probing candidates");

        let results = join_all(probed.iter().cloned().map(&predicate)).await;
        if let Some(idx) = results.iter().position(|reachable| *reachable) {
            let chosen = probed[idx].clone();
            tracing::info!(node_id, endpoint = %chosen, round, "found reachable endpoint");
            return Ok(chosen);
        }

        let now = Instant::now();
        if now >= deadline {
            break;
        }
        tokio::time::sleep(poll.interval.min(deadline - now)).await;
    }

    tracing::warn!(node_id, rounds = round, waited_secs = wait.as_secs(), "no candidate became reachable");
    Err(ResolveError::ReachabilityTimeout {
        node_id: node_id.to_string(),
        waited: wait,
        candidates: probed.iter().map(ToString::to_string).collect(),
    })
}
