//! Saved palette state: write, read back, score.

mod common;

use color_ramps::{Color, ColorGroup, ColorTable, Ramp, RampError};
use pretty_assertions::assert_eq;
use rampforge::error::AppError;
use rampforge::models::{ExtractionConfig, PaletteState};
use rampforge::services::RampPipeline;

use common::fixtures;

fn grey_state() -> PaletteState {
    let mut colors = ColorTable::new();
    for (id, color) in fixtures::GREY_STRIP.iter().enumerate() {
        colors.insert(id as u32, ColorGroup::new(*color));
    }
    PaletteState::new(colors, vec![Ramp::from(vec![0, 1, 2, 3])])
}

#[test]
fn test_write_then_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let state = grey_state();
    state.write(&path).unwrap();
    let loaded = PaletteState::read(&path).unwrap();

    assert_eq!(loaded, state);
}

#[test]
fn test_extracted_state_survives_round_trip() {
    let (width, height, pixels) = fixtures::two_material_pixels();
    let bytes = fixtures::rgba_bytes(&pixels);
    let buffer = color_ramps::PixelBuffer::new(width, height, &bytes).unwrap();
    let output = RampPipeline::new(ExtractionConfig::default())
        .unwrap()
        .run(&buffer, &color_ramps::NoProgress)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    output.state.write(&path).unwrap();
    let loaded = PaletteState::read(&path).unwrap();

    assert_eq!(loaded, output.state);
    let positions = &loaded.colors.group(0).unwrap().positions;
    assert_eq!(positions, &vec![[0, 0], [0, 1]]);
}

#[test]
fn test_hand_edited_state_is_checked() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_file(
        dir.path(),
        "edited.json",
        r#"{
  "colors": {
    "0": {"color": [10, 10, 10, 255]},
    "1": {"color": [90, 90, 90, 255]},
    "2": {"color": [170, 170, 170, 255]}
  },
  "ramps": [[0, 1, 2], [2, 1, 2]]
}"#,
    );

    let err = PaletteState::read(&path).unwrap_err();
    assert!(
        matches!(err, AppError::Ramp(RampError::InvalidRamp { index: 1, .. })),
        "{err}"
    );
}

#[test]
fn test_out_of_range_channels_are_clamped() {
    let state = PaletteState::from_json_str(
        r#"{"colors": {"4": {"color": [300, -2, 12.6, 255]}}, "ramps": []}"#,
    )
    .unwrap();
    assert_eq!(state.colors.color(4), Some(Color::new(255, 0, 13, 255)));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = PaletteState::read(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, AppError::Read { .. }), "{err}");
}

#[test]
fn test_score_saved_state() {
    let state = PaletteState::new(
        grey_state().colors,
        vec![Ramp::from(vec![0, 1, 2, 3]), Ramp::from(vec![0, 2, 3])],
    );
    let scores = RampPipeline::new(ExtractionConfig::default())
        .unwrap()
        .score(&state)
        .unwrap();

    assert_eq!(scores.len(), 2);
    assert_eq!(scores[0].length_bonus, 1.0);
    assert_eq!(scores[1].length_bonus, 0.0);
    // uneven steps cost consistency
    assert!(scores[1].step_consistency_penalty > scores[0].step_consistency_penalty);
}
