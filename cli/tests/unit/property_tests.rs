//! Property-based tests for candidate selection and polling invariants.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use waypoint_cli::application::services::forward::NoForwarder;
use waypoint_cli::application::services::resolve::resolve_machine;
use waypoint_cli::domain::{AddressCandidateSet, validate_config_key};

use crate::helpers::{ProbeLog, node, plan, waiting};
use crate::mocks::quiet_reporter;

fn addresses() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("10\\.0\\.[0-3]\\.[0-3]", 0..6)
}

fn refs(v: &[String]) -> Vec<&str> {
    v.iter().map(String::as_str).collect()
}

fn block_on<F: std::future::Future>(f: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("tokio runtime")
        .block_on(f)
}

// ============================================================================
// AddressCandidateSet invariants
// ============================================================================

proptest! {
    /// The hostname is the first public address whenever there is one.
    #[test]
    fn prop_hostname_is_first_public(public in addresses(), private in addresses()) {
        prop_assume!(!public.is_empty());
        let set = AddressCandidateSet::from_descriptor(&node("n", &refs(&public), &refs(&private))).unwrap();
        prop_assert_eq!(set.hostname(), public[0].as_str());
    }

    /// The subnet address is the first private address whenever there is one.
    #[test]
    fn prop_subnet_is_first_private(public in addresses(), private in addresses()) {
        prop_assume!(!private.is_empty());
        let set = AddressCandidateSet::from_descriptor(&node("n", &refs(&public), &refs(&private))).unwrap();
        prop_assert_eq!(set.subnet_address(), private[0].as_str());
    }

    /// Candidates are public-then-private, first occurrence kept, no duplicates.
    #[test]
    fn prop_candidates_are_ordered_and_unique(public in addresses(), private in addresses()) {
        let descriptor = node("n", &refs(&public), &refs(&private));
        let Ok(set) = AddressCandidateSet::from_descriptor(&descriptor) else {
            prop_assert!(public.is_empty() && private.is_empty());
            return Ok(());
        };
        let mut expected: Vec<String> = Vec::new();
        for a in public.iter().chain(private.iter()) {
            if !expected.contains(a) {
                expected.push(a.clone());
            }
        }
        prop_assert_eq!(set.addresses(), expected.as_slice());
        prop_assert_eq!(set.first(), expected[0].as_str());
    }
}

// ============================================================================
// Polling invariants
// ============================================================================

proptest! {
    /// With waiting disabled the predicate is never called and the first
    /// candidate is chosen.
    #[test]
    fn prop_disabled_wait_never_probes(public in addresses(), private in addresses()) {
        prop_assume!(!public.is_empty() || !private.is_empty());
        let descriptor = node("n", &refs(&public), &refs(&private));
        let probe = ProbeLog::unreachable();
        let handle = block_on(resolve_machine(
            &descriptor, &plan(None), None::<&NoForwarder>, &quiet_reporter(), probe.predicate(),
        )).unwrap();
        prop_assert!(probe.calls().is_empty());
        let first = public.first().or(private.first()).unwrap();
        prop_assert_eq!(&handle.address, first);
    }

    /// With waiting enabled the chosen address is a candidate the predicate
    /// accepted, and hostname/subnet never depend on it.
    #[test]
    fn prop_connect_address_was_accepted(
        public in addresses(),
        private in addresses(),
        pick in any::<prop::sample::Index>(),
    ) {
        let all: Vec<String> = public.iter().chain(private.iter()).cloned().collect();
        prop_assume!(!all.is_empty());
        let reachable = all[pick.index(all.len())].clone();
        let descriptor = node("n", &refs(&public), &refs(&private));
        let probe = ProbeLog::reachable(&[reachable.as_str()]);
        let handle = block_on(resolve_machine(
            &descriptor, &waiting(), None::<&NoForwarder>, &quiet_reporter(), probe.predicate(),
        )).unwrap();
        prop_assert_eq!(&handle.address, &reachable);
        prop_assert!(!probe.calls().is_empty());
        let set = AddressCandidateSet::from_descriptor(&descriptor).unwrap();
        prop_assert_eq!(handle.hostname.as_str(), set.hostname());
        prop_assert_eq!(handle.subnet_address.as_str(), set.subnet_address());
    }
}

// ============================================================================
// Config key whitelist
// ============================================================================

proptest! {
    /// Arbitrary keys outside the whitelist are rejected.
    #[test]
    fn prop_arbitrary_keys_rejected(key in "[a-z]{1,12}\\.[a-z]{1,12}") {
        if key != "wait.login" && key != "wait.interval" && key != "forwarding.enabled" {
            prop_assert!(validate_config_key(&key).is_err(), "accepted invalid key: {key}");
        }
    }
}
