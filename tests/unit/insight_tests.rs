use super::*;

#[test]
fn test_fewer_than_seven_records_never_report_weight() {
    for n in 1..7 {
        let report = compute_insights(&days(n, healthy_reading()));
        assert!(
            report.insights.iter().all(|i| !matches!(i, Insight::Weight { .. })),
            "weight insight reported for {} records",
            n
        );
    }
}

#[test]
fn test_empty_records_give_empty_report() {
    let report = compute_insights(&[]);
    assert!(report.insights.is_empty());
    assert!(report.recommendations.is_empty());
}

#[test]
fn test_pressure_and_sleep_always_present() {
    for n in [1, 3, 7, 30] {
        let report = compute_insights(&days(n, healthy_reading()));
        let kinds: Vec<_> = report.insights.iter().map(Insight::kind).collect();
        assert!(kinds.ends_with(&["blood_pressure", "sleep"]));
    }
}

#[test]
fn test_two_kilo_change_is_not_alerted() {
    let weights = [72.0, 72.0, 72.0, 72.0, 72.0, 72.0, 70.0];
    let report = compute_insights(&records(
        weights.iter().map(|&w| MetricReading { weight_kg: w, ..healthy_reading() }),
    ));

    match &report.insights[0] {
        Insight::Weight { change, trend, .. } => {
            assert_eq!(*change, 2.0);
            assert_eq!(*trend, Trend::Increasing);
        }
        other => panic!("expected weight insight first, got {:?}", other),
    }
    assert!(report.recommendations.is_empty());
}

#[test]
fn test_weight_window_ignores_older_records() {
    // Index 7 onwards is outside the trend window
    let mut weights = vec![70.0; 7];
    weights.extend([90.0, 95.0]);
    let report = compute_insights(&records(
        weights.iter().map(|&w| MetricReading { weight_kg: w, ..healthy_reading() }),
    ));

    assert_eq!(
        report.insights[0],
        Insight::Weight { value: 70.0, change: 0.0, trend: Trend::Stable }
    );
}

#[test]
fn test_recommendations_follow_insight_order() {
    let mut weights = vec![75.0];
    weights.extend([72.0; 6]);
    let report = compute_insights(&records(weights.iter().map(|&w| MetricReading {
        weight_kg: w,
        blood_pressure: 142.0,
        sleep_hours: 6.5,
        ..healthy_reading()
    })));

    assert_eq!(report.recommendations.len(), 3);
    assert!(report.recommendations[0].contains("weight gain"));
    assert!(report.recommendations[1].contains("blood pressure"));
    assert!(report.recommendations[2].contains("7-9 hours"));
}

#[test]
fn test_insight_serializes_with_type_tag() {
    let report = compute_insights(&days(1, MetricReading { sleep_hours: 6.0, ..healthy_reading() }));
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["insights"][1]["type"], "sleep");
    assert_eq!(json["insights"][1]["status"], "fair");
}
