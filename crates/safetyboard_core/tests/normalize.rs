use pretty_assertions::assert_eq;
use safetyboard_core::{
    clean_unbox_category, normalize_all, normalize_open_data, normalize_trustified,
    normalize_unbox, ProductRecord, RawDataset, SourceKind, Status,
};

fn dataset(json: &str) -> RawDataset {
    RawDataset::from_slice(json.as_bytes()).expect("valid dataset")
}

fn statuses(records: &[ProductRecord]) -> Vec<Status> {
    records.iter().map(|r| r.status).collect()
}

#[test]
fn trustified_maps_buckets_and_fills_links() {
    let data = dataset(
        r#"{
            "whey": {
                "expired": [{"name": "Old Whey"}],
                "fail": [{"name": "Bad Whey"}],
                "pass": [{"name": "Good Whey", "link": "https://a.example/good"}, {"name": "Plain Whey", "link": ""}]
            }
        }"#,
    );

    let records = normalize_trustified(&data);

    assert_eq!(
        records,
        vec![
            ProductRecord {
                name: "Good Whey".into(),
                source: "Trustified".into(),
                category: "whey".into(),
                status: Status::Pass,
                link: "https://a.example/good".into(),
            },
            ProductRecord {
                name: "Plain Whey".into(),
                source: "Trustified".into(),
                category: "whey".into(),
                status: Status::Pass,
                link: "https://www.trustified.in/passandfail".into(),
            },
            ProductRecord {
                name: "Bad Whey".into(),
                source: "Trustified".into(),
                category: "whey".into(),
                status: Status::Fail,
                link: String::new(),
            },
            ProductRecord {
                name: "Old Whey".into(),
                source: "Trustified".into(),
                category: "whey".into(),
                status: Status::Pending,
                link: "https://www.trustified.in/passandfail".into(),
            },
        ]
    );
}

#[test]
fn missing_buckets_yield_no_records() {
    let data = dataset(r#"{"creatine": {"pass": [{"name": "C1"}]}, "empty": {}}"#);

    for kind in SourceKind::ALL {
        let records = kind.normalize(&data);
        assert_eq!(records.len(), 1, "{kind}");
        assert_eq!(statuses(&records), vec![Status::Pass]);
    }
}

#[test]
fn null_bucket_is_treated_as_absent() {
    let data = dataset(r#"{"creatine": {"pass": null, "fail": [{"name": "C1"}]}}"#);
    assert_eq!(statuses(&normalize_trustified(&data)), vec![Status::Fail]);
}

#[test]
fn expired_is_pending_everywhere_it_exists() {
    let data = dataset(r#"{"x": {"expired": [{"name": "E"}]}}"#);

    assert_eq!(statuses(&normalize_trustified(&data)), vec![Status::Pending]);
    assert_eq!(statuses(&normalize_open_data(&data)), vec![Status::Pending]);
    // UnboxHealth has no expired bucket.
    assert!(normalize_unbox(&data).is_empty());
}

#[test]
fn unbox_cleans_categories_and_orders_buckets() {
    let data = dataset(
        r#"{
            "protein_supplements": {
                "fail": [{"name": "F"}],
                "not_healthy": [{"name": "N", "link": "https://u.example/n"}],
                "pass": [{"name": "P"}]
            }
        }"#,
    );

    let records = normalize_unbox(&data);

    assert_eq!(
        statuses(&records),
        vec![Status::Pass, Status::NotHealthy, Status::Fail]
    );
    assert!(records.iter().all(|r| r.category == "protein"));
    assert!(records.iter().all(|r| r.source == "UnboxHealth"));
    assert_eq!(records[0].link, "");
    assert_eq!(records[1].link, "https://u.example/n");
}

#[test]
fn unbox_category_cleanup_rules() {
    assert_eq!(clean_unbox_category("protein_supplements"), "protein");
    assert_eq!(clean_unbox_category("peanut_butter"), "peanut butter");
    assert_eq!(
        clean_unbox_category("supplements_and_supplements"),
        "and supplements"
    );
    // Cleanup that would empty the label keeps the original key.
    assert_eq!(clean_unbox_category("_supplements_"), "_supplements_");
}

#[test]
fn open_data_reads_per_entry_source() {
    let data = dataset(
        r#"{
            "honey": {
                "pass": [
                    {"name": "H1", "source": "Lab Report 7"},
                    {"name": "H2"},
                    {"name": "H3", "source": ""}
                ]
            }
        }"#,
    );

    let sources: Vec<_> = normalize_open_data(&data)
        .into_iter()
        .map(|r| r.source)
        .collect();

    assert_eq!(sources, vec!["Lab Report 7", "Open Data", "Open Data"]);
}

#[test]
fn categories_keep_document_order() {
    let data = dataset(r#"{"zeta": {"pass": [{"name": "Z"}]}, "alpha": {"pass": [{"name": "A"}]}}"#);

    let names: Vec<_> = normalize_trustified(&data)
        .into_iter()
        .map(|r| r.name)
        .collect();

    assert_eq!(names, vec!["Z", "A"]);
}

#[test]
fn repeated_category_key_keeps_last_value() {
    let data = dataset(
        r#"{"a": {"pass": [{"name": "first"}]}, "b": {}, "a": {"pass": [{"name": "second"}]}}"#,
    );

    let categories: Vec<_> = data.categories().map(|(name, _)| name).collect();
    assert_eq!(categories, vec!["a", "b"]);
    assert_eq!(normalize_trustified(&data)[0].name, "second");
}

#[test]
fn normalize_all_concatenates_in_load_order() {
    let trustified = dataset(r#"{"t": {"pass": [{"name": "T"}]}}"#);
    let unbox = dataset(r#"{"u": {"not_healthy": [{"name": "U"}]}}"#);
    let open = dataset(r#"{"o": {"fail": [{"name": "O"}]}}"#);

    let sources: Vec<_> = normalize_all(&trustified, &unbox, &open)
        .into_iter()
        .map(|r| r.source)
        .collect();

    assert_eq!(sources, vec!["Trustified", "UnboxHealth", "Open Data"]);
}

#[test]
fn malformed_shapes_are_rejected() {
    assert!(RawDataset::from_slice(b"[1, 2]").is_err());
    assert!(RawDataset::from_slice(br#"{"a": {"pass": {"name": "x"}}}"#).is_err());
    assert!(RawDataset::from_slice(br#"{"a": {"pass": [{"link": "x"}]}}"#).is_err());
    assert!(RawDataset::from_slice(b"{not json").is_err());
}
