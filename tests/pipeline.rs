//! End-to-end behavior of the depth-to-sound pipeline through the public API

use std::time::Duration;
use synesthesia::capture::{CaptureAdapter, DepthFrame};
use synesthesia::config::GridConfig;
use synesthesia::grid::RegionCoordinate;
use synesthesia::mapping::scale_linear;
use synesthesia::{DepthBuffer, FrameProcessor, SonifyConfig};

fn four_by_four() -> SonifyConfig {
    SonifyConfig {
        grid: GridConfig {
            rows: 4,
            columns: 4,
            column_angles: vec![-60.0, -20.0, 20.0, 60.0],
            row_angles: vec![60.0, 20.0, -20.0, -60.0],
        },
        ..SonifyConfig::default()
    }
}

fn uniform(value: u8) -> DepthBuffer {
    DepthBuffer::uniform(40, 40, 1, value).unwrap()
}

#[test]
fn test_uniform_frame_sounds_every_region_alike() {
    let mut processor = FrameProcessor::new(&four_by_four()).unwrap();
    let output = processor.process_frame(&uniform(185));

    assert_eq!(output.updates.len(), 16);
    assert_eq!(output.skipped, 0);

    let expected = scale_linear(8.7, 1.5, 10.0, 350.0, 250.0);
    for update in &output.updates {
        assert!(update.on, "region {} should sound", update.region);
        assert_eq!(update.frequency_hz, Some(expected));
    }
    assert!((expected - 265.29).abs() < 0.01);

    // Stored distance is the working distance rounded to tenths
    let state = processor.grid().get(RegionCoordinate::new(3, 3)).unwrap();
    assert_eq!(state.last_distance, 8.7);
    assert_eq!(processor.grid().active_count(), 16);
}

#[test]
fn test_small_changes_stay_silent_large_changes_emit() {
    let mut processor = FrameProcessor::new(&four_by_four()).unwrap();
    processor.process_frame(&uniform(185));

    // 186 works out to 8.5, two tenths from the stored 8.7
    let nudged = processor.process_frame(&uniform(186));
    assert!(nudged.is_empty());
    assert!(nudged.status.is_none());

    // 210 is the nearest calibrated reading: 1.0 and the top of the pitch range
    let near = processor.process_frame(&uniform(210));
    assert_eq!(near.updates.len(), 16);
    assert!(near.updates.iter().all(|u| u.frequency_hz == Some(350.0)));

    // 160 is the far end, past the sound threshold
    let far = processor.process_frame(&uniform(160));
    assert_eq!(far.updates.len(), 16);
    assert!(far.updates.iter().all(|u| !u.on && u.frequency_hz.is_none()));
    assert_eq!(processor.grid().active_count(), 0);

    // Muting keeps the last sounding frequency
    let state = processor.grid().get(RegionCoordinate::new(0, 0)).unwrap();
    assert_eq!(state.frequency, 350.0);
}

#[test]
fn test_reset_forgets_previous_frames() {
    let mut processor = FrameProcessor::new(&four_by_four()).unwrap();
    processor.process_frame(&uniform(185));
    assert!(processor.process_frame(&uniform(185)).is_empty());

    processor.reset();
    assert_eq!(processor.grid().active_count(), 0);
    assert_eq!(processor.process_frame(&uniform(185)).updates.len(), 16);
}

#[test]
fn test_undersized_buffer_skips_the_frame() {
    let mut processor = FrameProcessor::new(&four_by_four()).unwrap();
    let tiny = DepthBuffer::uniform(2, 2, 1, 185).unwrap();

    let output = processor.process_frame(&tiny);
    assert!(output.is_empty());
    assert_eq!(output.skipped, 16);

    // Processing continues with the next valid frame
    assert_eq!(processor.process_frame(&uniform(185)).updates.len(), 16);
}

#[tokio::test]
async fn test_adapter_processes_frames_in_order() {
    let processor = FrameProcessor::new(&four_by_four()).unwrap();
    let (mut adapter, mut reports) = CaptureAdapter::spawn(processor);

    assert!(adapter.submit(DepthFrame::new(1, uniform(185))));
    let report = tokio::time::timeout(Duration::from_secs(2), reports.recv())
        .await
        .unwrap()
        .expect("report channel closed");
    assert_eq!(report.sequence, 1);
    assert_eq!(report.output.updates.len(), 16);

    // An older frame is never evaluated after a newer one
    assert!(!adapter.submit(DepthFrame::new(1, uniform(210))));

    let mut processor = adapter.shutdown().await.unwrap();
    assert_eq!(processor.grid().active_count(), 16);
    assert!(reports.recv().await.is_none());

    assert_eq!(processor.silence().len(), 16);
    assert_eq!(processor.grid().active_count(), 0);
}
