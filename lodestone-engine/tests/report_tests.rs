use lodestone_engine::{EngineConfig, RunReport};

#[test]
fn fresh_report_is_a_noop() {
    assert!(RunReport::new().is_noop());
    assert_eq!(RunReport::new().writes(), 0);
}

#[test]
fn writes_sums_store_mutations() {
    let report = RunReport {
        created: 2,
        updated: 3,
        skipped_edited: 4,
        unchanged: 9,
        held: 1,
        deleted: 1,
        preserved: 2,
        failed: 5,
    };
    assert_eq!(report.writes(), 6);
    assert!(!report.is_noop());
}

#[test]
fn report_deserializes_with_missing_counters() {
    let report: RunReport = serde_json::from_str(r#"{"created": 3}"#).unwrap();
    assert_eq!(report.created, 3);
    assert_eq!(report.updated, 0);
    assert!(!report.is_noop());
}

#[test]
fn config_defaults_status_to_published() {
    assert_eq!(EngineConfig::default().default_status, "published");

    let config: EngineConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, EngineConfig::default());
}
