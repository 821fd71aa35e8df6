//! Moving-average behavior: windowing, eviction and numeric properties

use mouth_breath_monitor::{filters::MovingAverage, Error};
use proptest::prelude::*;

mod test_helpers;
use test_helpers::assert_close;

#[test]
fn test_partial_window_averages_seen_values() {
    let mut avg = MovingAverage::new(3).unwrap();
    assert_eq!(avg.average(), None);
    assert_close(avg.update(1.0), 1.0, 1e-12);
    assert_close(avg.update(2.0), 1.5, 1e-12);
    assert_close(avg.update(3.0), 2.0, 1e-12);
    // Window full: 1.0 is evicted
    assert_close(avg.update(4.0), 3.0, 1e-12);
    assert_eq!(avg.values().collect::<Vec<_>>(), vec![2.0, 3.0, 4.0]);
}

#[test]
fn test_window_of_one_tracks_input() {
    let mut avg = MovingAverage::new(1).unwrap();
    for v in [0.2, 0.9, 0.0, 5.5] {
        assert_eq!(avg.update(v), v);
        assert_eq!(avg.len(), 1);
    }
}

#[test]
fn test_zero_window_is_config_error() {
    match MovingAverage::new(0) {
        Err(Error::ConfigError(msg)) => assert!(msg.contains("Window size")),
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn test_reset_clears_window() {
    let mut avg = MovingAverage::new(4).unwrap();
    avg.update(1.0);
    avg.update(3.0);
    avg.reset();
    assert!(avg.is_empty());
    assert_eq!(avg.sum(), 0.0);
    assert_eq!(avg.update(7.0), 7.0);
}

#[test]
fn test_running_sum_does_not_drift() {
    let mut avg = MovingAverage::new(20).unwrap();
    for i in 0..1_000_000u32 {
        avg.update(f64::from(i % 97) * 0.013);
    }
    let exact: f64 = avg.values().sum();
    assert_close(avg.sum(), exact, 1e-6);
}

proptest! {
    #[test]
    fn prop_matches_mean_of_last_n(
        window in 1usize..40,
        values in prop::collection::vec(0.0f64..10.0, 1..200),
    ) {
        let mut avg = MovingAverage::new(window).unwrap();
        for (i, &v) in values.iter().enumerate() {
            let got = avg.update(v);
            let start = (i + 1).saturating_sub(window);
            let tail = &values[start..=i];
            let expected = tail.iter().sum::<f64>() / tail.len() as f64;
            prop_assert!((got - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn prop_memory_is_bounded(
        window in 1usize..40,
        values in prop::collection::vec(-5.0f64..5.0, 0..200),
    ) {
        let mut avg = MovingAverage::new(window).unwrap();
        for v in values {
            avg.update(v);
            prop_assert!(avg.len() <= window);
        }
    }

    #[test]
    fn prop_replay_is_deterministic(
        window in 1usize..40,
        values in prop::collection::vec(0.0f64..10.0, 0..100),
    ) {
        let mut a = MovingAverage::new(window).unwrap();
        let mut b = MovingAverage::new(window).unwrap();
        let out_a: Vec<f64> = values.iter().map(|&v| a.update(v)).collect();
        let out_b: Vec<f64> = values.iter().map(|&v| b.update(v)).collect();
        prop_assert_eq!(out_a, out_b);
    }

    #[test]
    fn prop_average_within_input_range(
        window in 1usize..40,
        values in prop::collection::vec(0.0f64..10.0, 1..100),
    ) {
        let mut avg = MovingAverage::new(window).unwrap();
        for v in values {
            let mean = avg.update(v);
            prop_assert!((-1e-9..=10.0 + 1e-9).contains(&mean));
        }
    }
}
