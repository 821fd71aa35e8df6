//! Threshold band classification

use mouth_breath_monitor::{
    classifier::{MouthState, MouthStateScorer, Thresholds},
    Error,
};

#[test]
fn test_band_edges_are_inclusive() {
    let scorer = MouthStateScorer::default();
    let cases = [
        (0.0, MouthState::Nasal),
        (0.449_999, MouthState::Nasal),
        (0.45, MouthState::Nasal),
        (0.450_001, MouthState::Unknown),
        (0.55, MouthState::Unknown),
        (0.619_999, MouthState::Unknown),
        (0.62, MouthState::Mouth),
        (6.0, MouthState::Mouth),
    ];
    for (smoothed, expected) in cases {
        assert_eq!(scorer.classify(0.0, smoothed), expected, "smoothed={smoothed}");
    }
}

#[test]
fn test_custom_thresholds() {
    let scorer = MouthStateScorer::new(Thresholds::new(10.0, 4.0).unwrap(), 2);
    assert_eq!(scorer.classify(0.0, 6.0), MouthState::Unknown);
    assert_eq!(scorer.classify(0.0, 3.5), MouthState::Nasal);
    assert_eq!(scorer.classify(0.0, 12.0), MouthState::Mouth);
    assert_eq!(scorer.window_sec(), 2);
}

#[test]
fn test_raw_mar_does_not_influence_state() {
    let scorer = MouthStateScorer::default();
    for raw in [0.0, 0.5, 100.0, f64::NAN] {
        assert_eq!(scorer.classify(raw, 0.3), MouthState::Nasal);
    }
}

#[test]
fn test_classify_is_pure() {
    let scorer = MouthStateScorer::default();
    let first: Vec<MouthState> = [0.1, 0.5, 0.9].iter().map(|&v| scorer.classify(v, v)).collect();
    let second: Vec<MouthState> = [0.1, 0.5, 0.9].iter().map(|&v| scorer.classify(v, v)).collect();
    assert_eq!(first, second);
}

#[test]
fn test_unordered_thresholds_rejected() {
    for (high, low) in [(0.45, 0.62), (0.5, 0.5), (f64::INFINITY, 0.1), (0.6, f64::NAN)] {
        assert!(
            matches!(Thresholds::new(high, low), Err(Error::ConfigError(_))),
            "high={high} low={low}"
        );
    }
}

#[test]
fn test_runtime_change_validated() {
    let mut scorer = MouthStateScorer::default();
    assert!(scorer.set_thresholds(0.2, 0.8).is_err());
    assert_eq!(scorer.thresholds().high(), 0.62);
    assert_eq!(scorer.thresholds().low(), 0.45);

    scorer.set_thresholds(0.8, 0.2).unwrap();
    assert_eq!(scorer.classify(0.0, 0.7), MouthState::Unknown);
}
