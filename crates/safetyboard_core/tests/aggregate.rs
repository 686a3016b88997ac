use safetyboard_core::{compute_stats, ProductRecord, Stats, Status};

fn record(status: Status) -> ProductRecord {
    ProductRecord {
        name: format!("{status} item"),
        source: "Test".into(),
        category: "cat".into(),
        status,
        link: String::new(),
    }
}

#[test]
fn counts_sum_to_total() {
    let records: Vec<_> = [
        Status::Pass,
        Status::Pass,
        Status::Fail,
        Status::Pending,
        Status::NotHealthy,
        Status::NotHealthy,
        Status::NotHealthy,
    ]
    .into_iter()
    .map(record)
    .collect();

    let stats = compute_stats(&records);

    assert_eq!(
        stats,
        Stats {
            total: 7,
            pass: 2,
            fail: 1,
            pending: 1,
            not_healthy: 3,
        }
    );
    let sum: usize = Status::ALL.iter().map(|&s| stats.count(s)).sum();
    assert_eq!(sum, stats.total);
}

#[test]
fn empty_collection_has_zero_percentages() {
    let stats = compute_stats(&[]);

    assert_eq!(stats.total, 0);
    for status in Status::ALL {
        let pct = stats.percentage(status);
        assert_eq!(pct, 0.0);
        assert!(!pct.is_nan());
    }
    assert!(stats.segments().iter().all(|s| s.percentage == 0.0));
}

#[test]
fn percentages_are_relative_to_total() {
    let records: Vec<_> = [Status::Pass, Status::Pass, Status::Pass, Status::Fail]
        .into_iter()
        .map(record)
        .collect();

    let pct = compute_stats(&records).percentages();

    assert_eq!(pct.pass, 75.0);
    assert_eq!(pct.fail, 25.0);
    assert_eq!(pct.pending, 0.0);
    assert_eq!(pct.not_healthy, 0.0);
}

#[test]
fn segments_follow_chart_order_and_palette() {
    let records: Vec<_> = Status::ALL.into_iter().map(record).collect();

    let segments = compute_stats(&records).segments();

    let order: Vec<_> = segments.iter().map(|s| s.status).collect();
    assert_eq!(
        order,
        vec![
            Status::Pass,
            Status::NotHealthy,
            Status::Fail,
            Status::Pending
        ]
    );
    assert_eq!(segments[0].color, "#00ffa3");
    assert_eq!(segments[2].label, "Fail/Hazard");
    assert!(segments.iter().all(|s| s.percentage == 25.0));
}
