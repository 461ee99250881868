use super::*;

#[test]
fn test_three_frames_at_60hz() {
    let mut updater = FrameGlobalsUpdater::new();
    updater.advance(0.016);
    updater.advance(0.032);
    let globals = updater.advance(0.048);

    assert_eq!(globals.frame, 3);
    assert!((globals.time - 0.048).abs() < 1e-6);
    assert!((globals.delta_time - 0.016).abs() < 1e-6);
    assert_eq!(updater.current(), globals);
}

#[test]
fn test_starting_at_measures_first_delta_from_start() {
    let mut updater = FrameGlobalsUpdater::starting_at(100.0);
    let globals = updater.advance(100.5);

    assert_eq!(globals.frame, 1);
    assert_eq!(globals.delta_time, 0.5);
    assert_eq!(globals.time, 0.5);
}

#[test]
fn test_clock_regression_yields_zero_delta() {
    let mut updater = FrameGlobalsUpdater::new();
    updater.advance(1.0);
    let regressed = updater.advance(0.5);

    assert_eq!(regressed.frame, 2);
    assert_eq!(regressed.delta_time, 0.0);
    assert_eq!(regressed.time, 1.0);
    assert_eq!(updater.previous(), 0.5);

    // Deltas resume from the regressed reading
    let next = updater.advance(0.75);
    assert_eq!(next.delta_time, 0.25);
    assert_eq!(next.time, 1.25);
}

#[test]
fn test_non_finite_reading_is_ignored() {
    let mut updater = FrameGlobalsUpdater::new();
    updater.advance(1.0);
    let globals = updater.advance(f64::NAN);

    assert_eq!(globals.frame, 2);
    assert_eq!(globals.delta_time, 0.0);
    assert_eq!(updater.previous(), 1.0);

    assert_eq!(updater.advance(f64::INFINITY).delta_time, 0.0);
    assert_eq!(updater.advance(2.0).delta_time, 1.0);
}

#[test]
fn test_frame_counter_wraps() {
    let mut updater = FrameGlobalsUpdater::new();
    updater.current.frame = u32::MAX;

    let globals = updater.advance(0.1);
    assert_eq!(globals.frame, 0);
    assert_eq!(updater.advance(0.2).frame, 1);
}

#[test]
fn test_reset() {
    let mut updater = FrameGlobalsUpdater::new();
    updater.advance(3.0);
    updater.reset(10.0);

    assert_eq!(updater.current(), FrameGlobals::default());
    assert_eq!(updater.advance(11.0).time, 1.0);
}

#[test]
fn test_globals_bytes() {
    let globals = FrameGlobals { frame: 7, time: 1.5, delta_time: 0.25, padding: 0 };
    let bytes = globals.as_bytes();

    assert_eq!(bytes.len(), FRAME_GLOBALS_SIZE);
    assert_eq!(&bytes[0..4], &7u32.to_ne_bytes());
    assert_eq!(&bytes[4..8], &1.5f32.to_ne_bytes());
    assert_eq!(&bytes[8..12], &0.25f32.to_ne_bytes());
}
