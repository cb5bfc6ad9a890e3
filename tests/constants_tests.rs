// Host-side tests for the web frontend's constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn canvas_ids_are_distinct_and_non_empty() {
    assert_ne!(BACK_CANVAS_ID, FRONT_CANVAS_ID);
    for id in [BACK_CANVAS_ID, FRONT_CANVAS_ID, ORB_CANVAS_CLASS] {
        assert!(!id.is_empty());
        assert!(!id.contains(' '), "'{id}' must be a single token");
    }
}

#[test]
fn exported_defaults_match_core() {
    assert_eq!(DEFAULT_SPARKLE as usize, orb_core::constants::DEFAULT_SPARKLE_COUNT);
    assert!((DEFAULT_PULSE_INTENSITY - 1.0).abs() < f32::EPSILON);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn fallback_dpr_is_within_host_clamp() {
    assert!(FALLBACK_DPR >= 1.0);
    assert!(FALLBACK_DPR as f32 <= orb_core::constants::DPR_MAX);
}
