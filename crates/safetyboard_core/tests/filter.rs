use safetyboard_core::{
    filter_records, highlight_ranges, FilterState, ProductRecord, Status, StatusFilter,
};

fn record(name: &str, category: &str, status: Status) -> ProductRecord {
    ProductRecord {
        name: name.into(),
        source: "Test".into(),
        category: category.into(),
        status,
        link: String::new(),
    }
}

fn sample() -> Vec<ProductRecord> {
    vec![
        record("Alpha Whey", "protein", Status::Pass),
        record("Beta Bar", "snacks", Status::Fail),
        record("Gamma Oats", "breakfast", Status::Pending),
        record("Delta Whey", "protein", Status::Fail),
        record("Epsilon Juice", "drinks", Status::NotHealthy),
        record("Zeta Honey", "sweeteners", Status::Pass),
        record("Eta Ghee", "dairy", Status::Pass),
        record("Theta Milk", "dairy", Status::Fail),
        record("Iota Nuts", "snacks", Status::Pending),
        record("Kappa Tea", "drinks", Status::Pass),
    ]
}

fn names<'a>(records: &[&'a ProductRecord]) -> Vec<&'a str> {
    records.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn default_state_returns_everything_in_order() {
    let records = sample();
    let visible = filter_records(&records, &FilterState::new());

    assert_eq!(visible.len(), records.len());
    assert!(visible.iter().zip(records.iter()).all(|(a, b)| *a == b));
}

#[test]
fn status_filter_keeps_relative_order() {
    let records = sample();
    let state = FilterState::new().set_status_filter(StatusFilter::Only(Status::Fail));

    let visible = filter_records(&records, &state);

    assert_eq!(names(&visible), vec!["Beta Bar", "Delta Whey", "Theta Milk"]);
}

#[test]
fn single_character_query_does_not_filter() {
    let records = sample();
    let state = FilterState::new().set_search_query("a");

    assert!(!state.has_effective_query());
    assert_eq!(filter_records(&records, &state).len(), 10);
}

#[test]
fn query_matches_name_or_category_case_insensitively() {
    let records = sample();

    let by_name = FilterState::new().set_search_query("WHEY");
    assert_eq!(
        names(&filter_records(&records, &by_name)),
        vec!["Alpha Whey", "Delta Whey"]
    );

    let by_category = FilterState::new().set_search_query("Dair");
    assert_eq!(
        names(&filter_records(&records, &by_category)),
        vec!["Eta Ghee", "Theta Milk"]
    );
}

#[test]
fn status_and_query_are_mutually_exclusive() {
    let state = FilterState::new()
        .set_status_filter(StatusFilter::Only(Status::Pass))
        .set_search_query("whey");
    assert_eq!(state.status(), StatusFilter::All);
    assert_eq!(state.query(), "whey");

    let state = state.set_status_filter(StatusFilter::Only(Status::Fail));
    assert_eq!(state.status(), StatusFilter::Only(Status::Fail));
    assert_eq!(state.query(), "");
}

#[test]
fn segment_toggle_resets_when_clicked_twice() {
    let state = FilterState::new().set_search_query("tea");

    let state = state.toggle_segment(Status::Pending);
    assert_eq!(state.status(), StatusFilter::Only(Status::Pending));
    assert_eq!(state.query(), "");

    let state = state.toggle_segment(Status::Fail);
    assert_eq!(state.status(), StatusFilter::Only(Status::Fail));

    let state = state.toggle_segment(Status::Fail);
    assert_eq!(state.status(), StatusFilter::All);
}

#[test]
fn category_selection_uses_exact_category_as_query() {
    let records = sample();
    let state = FilterState::new()
        .set_status_filter(StatusFilter::Only(Status::Pass))
        .select_category("snacks");

    assert_eq!(state.status(), StatusFilter::All);
    assert_eq!(state.query(), "snacks");
    assert_eq!(
        names(&filter_records(&records, &state)),
        vec!["Beta Bar", "Iota Nuts"]
    );
}

#[test]
fn highlight_is_case_insensitive_and_literal() {
    assert_eq!(highlight_ranges("Whey and whey", "WHEY"), vec![0..4, 9..13]);
    assert_eq!(highlight_ranges("Whey", "w"), Vec::<std::ops::Range<usize>>::new());
    assert_eq!(highlight_ranges("Oats (rolled)", "(r"), vec![5..7]);
    assert_eq!(highlight_ranges("aaaa", "aa"), vec![0..2, 2..4]);
    assert_eq!(highlight_ranges("Crème Brûlée", "BRÛ"), vec![7..11]);
}

#[test]
fn every_match_has_a_highlight() {
    // Dotted capital I lowercases to two chars, so "xi" only covers part of it.
    let records = vec![
        record("Xİ Bar", "snacks", Status::Pass),
        record("XIX Oil", "oils", Status::Pass),
        record("STRASSE Tea", "drinks", Status::Pass),
    ];

    for query in ["xi", "İ b", "strasse", "oil"] {
        let state = FilterState::new().set_search_query(query);
        for record in &records {
            let highlighted = !highlight_ranges(&record.name, query).is_empty()
                || !highlight_ranges(&record.category, query).is_empty();
            assert_eq!(
                state.matches(record),
                highlighted,
                "query {query:?} on {:?}",
                record.name
            );
        }
    }

    let state = FilterState::new().set_search_query("xi");
    assert_eq!(names(&filter_records(&records, &state)), vec!["XIX Oil"]);
    assert_eq!(highlight_ranges("Xİ Bar", "İ b"), vec![1..5]);
}
