// Host-side tests for JSON configuration and constant relationships.

#![allow(clippy::assertions_on_constants)]

use orb_core::constants::*;
use orb_core::{Corner, DockLayout, OrbError, OrbMode, OrbProps, Quality};

#[test]
fn props_defaults_fill_missing_fields() {
    let props = OrbProps::from_json(r#"{"size":128,"quality":"high"}"#).unwrap();
    assert_eq!(props.size, 128.0);
    assert_eq!(props.quality, Quality::High);
    assert_eq!(props.render_style, "flow");
    assert_eq!(props.seed, OrbProps::default().seed);
    assert_eq!(OrbProps::from_json("{}").unwrap(), OrbProps::default());
}

#[test]
fn dock_layout_parses_kebab_corner_and_nested_placement() {
    let json = r#"{
        "corner": "top-left",
        "autoplay": false,
        "front": { "size": 64, "offset_x": 8, "z_index": 12 }
    }"#;
    let layout = DockLayout::from_json(json).unwrap();
    assert_eq!(layout.corner, Corner::TopLeft);
    assert!(!layout.autoplay);
    assert_eq!(layout.front.size, 64.0);
    assert_eq!(layout.front.offset_x, 8.0);
    assert_eq!(layout.front.z_index, 12);
    assert_eq!(layout.back, DockLayout::default().back);
}

#[test]
fn bad_config_is_reported_not_panicked() {
    assert!(matches!(
        DockLayout::from_json(r#"{"corner":"middle"}"#),
        Err(OrbError::InvalidConfig(_))
    ));
    assert!(matches!(
        OrbProps::from_json("[1,2"),
        Err(OrbError::InvalidConfig(_))
    ));
}

#[test]
fn mode_names_round_trip() {
    for mode in [
        OrbMode::Idle,
        OrbMode::Listening,
        OrbMode::Speaking,
        OrbMode::Thinking,
    ] {
        assert_eq!(OrbMode::from_name(mode.as_str()), mode);
        assert_eq!(mode.to_string(), mode.as_str());
    }
    assert_eq!(OrbMode::from_name("dancing"), OrbMode::Idle);
}

#[test]
fn constants_have_logical_relationships() {
    assert!(QUALITY_BUDGET_LOW < QUALITY_BUDGET_MEDIUM);
    assert!(QUALITY_BUDGET_MEDIUM < QUALITY_BUDGET_HIGH);
    assert!(FLOOR_FRACTION > 0.0 && FLOOR_FRACTION < 1.0);
    assert!(CONTAINMENT_FRACTION < CULL_RADIUS_FRACTION);
    assert!(SPAWN_RADIUS_FRACTION < CONTAINMENT_FRACTION);
    assert!(LIFE_MIN_SEC < LIFE_MAX_SEC);
    assert!(FRAME_DT_MIN < FRAME_DT_MAX);
    assert!(VELOCITY_DAMPING > 0.0 && VELOCITY_DAMPING < 1.0);
    assert!(PULSE_ENERGY_BASE + PULSE_ENERGY_GAIN <= 1.0);
    assert!(AUTOPLAY_FRONT_BASE > AUTOPLAY_FRONT_SPAN);
    assert!(AUTOPLAY_BACK_BASE > AUTOPLAY_BACK_SPAN);
    assert!(AUTOPLAY_PULSE_PERIOD_SEC * 1000.0 > PULSE_REVERT_MS as f32);
}
