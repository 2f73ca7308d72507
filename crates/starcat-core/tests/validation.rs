use serde_json::json;

use starcat_core::validation::{validate, validate_file, validate_str, Severity};

#[test]
fn clean_document_passes_with_statistics() {
    let document = json!({
        "catalog": "test",
        "objects": [
            {"ra": 6.752477, "dec": -16.716116, "mag": -1.44, "name": "SIRIUS", "spectralType": "A0"},
            {"ra": 18.615649, "dec": 38.783689, "mag": 0.03, "name": "VEGA", "hd": 172167},
            {"ra": 2.530301, "dec": 89.264109, "mag": 2.02, "name": "ALPHA UMI (POLARIS)", "sao": 308},
            {"ra": 12.0, "dec": 0.5, "mag": 9.0, "name": "HD12345"}
        ]
    });

    let report = validate(&document);
    assert!(report.passed());
    assert!(report.issues.is_empty(), "{:?}", report.issues);

    let stats = &report.statistics;
    assert_eq!(stats.total, 4);
    assert_eq!(stats.min_magnitude, Some(-1.44));
    assert_eq!(stats.max_magnitude, Some(9.0));
    assert_eq!(stats.with_name, 4);
    assert_eq!(stats.with_spectral_type, 1);
    assert_eq!(stats.with_hd, 1);
    assert_eq!(stats.with_sao, 1);
    assert_eq!(stats.with_fk5, 0);
    assert_eq!(stats.percentage(stats.with_spectral_type), 25.0);
    assert_eq!(stats.reference_stars, vec!["SIRIUS", "VEGA", "POLARIS"]);
    assert_eq!(stats.missing_reference_stars().len(), 7);
}

#[test]
fn structural_problems_fail() {
    let report = validate(&json!({"stars": []}));
    assert!(!report.passed());
    assert_eq!(report.issues[0].message, "missing 'objects' key");

    let report = validate(&json!({"objects": null}));
    assert!(!report.passed());

    let report = validate(&json!([1, 2, 3]));
    assert!(!report.passed());
}

#[test]
fn record_problems_are_itemized() {
    let document = json!({
        "objects": [
            {"ra": 1.0, "dec": 1.0, "mag": 1.0},
            {"ra": "1.0", "dec": 1.0, "mag": 2.0, "name": "TEXT RA"},
            {"ra": 24.0, "dec": 91.0, "mag": 3.0, "name": "OUT OF RANGE"},
            {"ra": 1.0, "dec": 1.0, "mag": 4.0, "name": "   "},
            "not a star"
        ]
    });

    let report = validate(&document);
    assert!(!report.passed());
    assert_eq!(report.error_count(), 6);

    let indices: Vec<Option<usize>> = report.issues.iter().map(|issue| issue.index).collect();
    assert_eq!(
        indices,
        vec![Some(0), Some(1), Some(2), Some(2), Some(3), Some(4)]
    );
    assert!(report.issues[0].message.contains("'name'"));
    assert!(report.issues[2].message.starts_with("RA out of range"));
    assert!(report.issues[3].message.starts_with("Dec out of range"));
}

#[test]
fn advisory_issues_do_not_fail() {
    let document = json!({
        "objects": [
            {"ra": 1.0, "dec": 1.0, "mag": 5.0, "name": "A"},
            {"ra": 2.0, "dec": 2.0, "mag": 99.0, "name": "PLACEHOLDER"},
            {"ra": 3.0, "dec": 3.0, "mag": 1.0, "name": "C", "spectralType": 7}
        ]
    });

    let report = validate(&document);
    assert!(report.passed());
    assert_eq!(report.warning_count(), 3);
    assert!(report
        .issues
        .iter()
        .all(|issue| issue.severity == Severity::Warning));
    assert_eq!(report.statistics.max_magnitude, Some(99.0));
    assert_eq!(report.statistics.with_spectral_type, 0);
}

#[test]
fn empty_catalog_passes_without_issues() {
    let report = validate(&json!({"objects": []}));
    assert!(report.passed());
    assert!(report.issues.is_empty(), "{:?}", report.issues);
    assert_eq!(report.statistics.total, 0);
    assert_eq!(report.statistics.percentage(0), 0.0);
}

#[test]
fn unparseable_json_is_an_issue() {
    let report = validate_str("{\"objects\": [");
    assert!(!report.passed());
    assert!(report.issues[0].message.starts_with("document is not valid JSON"));
}

#[test]
fn validate_file_reads_from_disk() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("stars.json");
    std::fs::write(
        &path,
        r#"{"objects": [{"ra": 1.0, "dec": 1.0, "mag": 1.0, "name": "DENEB"}]}"#,
    )
    .expect("write catalog");

    let report = validate_file(&path).expect("readable file");
    assert!(report.passed());
    assert_eq!(report.statistics.reference_stars, vec!["DENEB"]);

    assert!(validate_file(&dir.path().join("missing.json")).is_err());
}
