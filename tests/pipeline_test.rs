//! PNG-to-ramps pipeline tests.

mod common;

use color_ramps::{NoProgress, Ramp};
use pretty_assertions::assert_eq;
use rampforge::models::{ExtractionConfig, GraphMode};
use rampforge::services::{load_png, ramp_hex, RampPipeline, TracingProgress};

use common::fixtures;

#[test]
fn test_grey_strip_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_png(dir.path(), "greys.png", 4, 1, &fixtures::GREY_STRIP);

    let image = load_png(&path).unwrap();
    let output = RampPipeline::new(ExtractionConfig::default())
        .unwrap()
        .run(&image.buffer().unwrap(), &TracingProgress::new())
        .unwrap();

    assert_eq!(output.state.ramps, vec![Ramp::from(vec![0, 1, 2, 3])]);
    assert_eq!(
        ramp_hex(&output.state.ramps[0], &output.state.colors),
        vec!["#333333", "#666666", "#999999", "#CCCCCC"]
    );
    common::assert_brightening(&output.state.ramps[0], &output.state.colors);
}

#[test]
fn test_two_materials_stay_apart() {
    let (width, height, pixels) = fixtures::two_material_pixels();
    let dir = tempfile::tempdir().unwrap();
    let path = fixtures::write_png(dir.path(), "materials.png", width, height, &pixels);

    let image = load_png(&path).unwrap();
    let output = RampPipeline::new(ExtractionConfig::default())
        .unwrap()
        .run(&image.buffer().unwrap(), &NoProgress)
        .unwrap();

    // ids interleave because the table orders colors by red channel first
    assert_eq!(output.state.colors.len(), 11);
    assert_eq!(
        output.state.ramps,
        vec![
            Ramp::from(vec![0, 2, 4, 6, 8, 10]),
            Ramp::from(vec![1, 3, 5, 7, 9]),
        ]
    );
    common::assert_well_formed(&output.state.ramps, &output.state.colors);
    for ramp in &output.state.ramps {
        common::assert_brightening(ramp, &output.state.colors);
    }
}

#[test]
fn test_transparent_pixels_are_not_colors() {
    let (width, height, pixels) = fixtures::two_material_pixels();
    let bytes = fixtures::rgba_bytes(&pixels);
    let buffer = color_ramps::PixelBuffer::new(width, height, &bytes).unwrap();
    let output = RampPipeline::new(ExtractionConfig::default())
        .unwrap()
        .run(&buffer, &NoProgress)
        .unwrap();
    assert!(output
        .state
        .colors
        .iter()
        .all(|(_, group)| group.color.a == 255));
}

#[test]
fn test_coarse_steps_fail_ciede2000_defaults() {
    let mut config = ExtractionConfig::default();
    config.ramps.method = "CIEDE2000".to_string();

    let bytes = fixtures::rgba_bytes(&fixtures::GREY_STRIP);
    let buffer = color_ramps::PixelBuffer::new(4, 1, &bytes).unwrap();
    let output = RampPipeline::new(config)
        .unwrap()
        .run(&buffer, &NoProgress)
        .unwrap();

    assert!(output.state.ramps.is_empty(), "{:?}", output.state.ramps);
    assert_eq!(output.extraction.candidates, 0);
}

#[test]
fn test_similarity_graph_finds_scattered_ramp() {
    // same greys, shuffled so no two neighbors belong together
    let shuffled = [
        fixtures::GREY_STRIP[2],
        fixtures::GREY_STRIP[0],
        fixtures::GREY_STRIP[3],
        fixtures::GREY_STRIP[1],
    ];
    let bytes = fixtures::rgba_bytes(&shuffled);
    let buffer = color_ramps::PixelBuffer::new(4, 1, &bytes).unwrap();

    let mut config = ExtractionConfig::default();
    config.graph.mode = GraphMode::Similarity;
    config.graph.max_delta_e = 25.0;

    let output = RampPipeline::new(config)
        .unwrap()
        .run(&buffer, &NoProgress)
        .unwrap();
    assert_eq!(output.state.ramps, vec![Ramp::from(vec![0, 1, 2, 3])]);
}

#[test]
fn test_repeated_runs_agree() {
    let (width, height, pixels) = fixtures::two_material_pixels();
    let bytes = fixtures::rgba_bytes(&pixels);
    let buffer = color_ramps::PixelBuffer::new(width, height, &bytes).unwrap();

    let mut config = ExtractionConfig::default();
    config.graph.neighborhood = 8;
    config.cluster.cluster_and_reduce = true;
    let pipeline = RampPipeline::new(config).unwrap();

    let first = pipeline.run(&buffer, &NoProgress).unwrap();
    let second = pipeline.run(&buffer, &NoProgress).unwrap();
    assert_eq!(first, second);
}
