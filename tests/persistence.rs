use review_crawler::{ReviewRecord, SelectorProfile, extract_reviews, load_reviews, save_reviews};

const LISTING: &str = include_str!("fixtures/listing.html");

#[test]
fn test_round_trip_preserves_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("res").join("reviews.json");
    let records = vec![
        ReviewRecord::new("객실이 넓고 바다가 한눈에 보여요.", 4, "2022.09.30").unwrap(),
        ReviewRecord::new("Ünïcødé \"quotes\" and\nnewlines 😢", 0, "").unwrap(),
        ReviewRecord::new("最高", 5, "2024.02.29").unwrap(),
    ];

    save_reviews(&records, &path).unwrap();
    let loaded = load_reviews(&path).unwrap();

    assert_eq!(loaded, records);
}

#[test]
fn test_round_trip_of_extracted_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reviews.json");
    let profile = SelectorProfile::default().compile().unwrap();
    let report = extract_reviews(LISTING, &profile);

    save_reviews(report.records(), &path).unwrap();

    assert_eq!(load_reviews(&path).unwrap(), report.records());
}

#[test]
fn test_file_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reviews.json");
    let records = vec![ReviewRecord::new("조용해요", 3, "2023.05.05").unwrap()];

    save_reviews(&records, &path).unwrap();
    let raw = std::fs::read_to_string(&path).unwrap();

    let expected = "[\n    {\n        \"review\": \"조용해요\",\n        \"stars\": 3,\n        \"date\": \"2023.05.05\"\n    }\n]";
    assert_eq!(raw, expected);
}

#[test]
fn test_empty_batch_writes_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reviews.json");

    save_reviews(&[], &path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    assert!(load_reviews(&path).unwrap().is_empty());
}

#[test]
fn test_overwrite_replaces_previous_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reviews.json");

    save_reviews(&[ReviewRecord::new("old", 1, "").unwrap()], &path).unwrap();
    save_reviews(&[ReviewRecord::new("new", 2, "").unwrap()], &path).unwrap();

    let loaded = load_reviews(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].text(), "new");
}
