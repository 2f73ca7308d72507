use std::fs;
use std::path::PathBuf;

use approx::assert_abs_diff_eq;

use crate::errors::{AngleError, MagnitudeError, ParserError, RowError};
use crate::formats::{Fk5CrossIndexParser, HygParser, SaoCsvParser, SyntheticGenerator};
use crate::model::{AngleEncoding, AngleRole, MagnitudePolicy, SourceFormat, FAINT_MAGNITUDE};
use crate::normalize::{clean_name, parse_magnitude, resolve_name, round_hours, spectral_class};
use crate::registry::{parse_catalog, parse_catalog_with, parser_for, CatalogParser, ParseOptions};
use crate::{parse_angle, to_sexagesimal, CanonicalStarRecord, ParsedCatalog};

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

fn find<'a>(parsed: &'a ParsedCatalog, name: &str) -> &'a CanonicalStarRecord {
    parsed
        .records
        .iter()
        .find(|record| record.name == name)
        .unwrap_or_else(|| panic!("missing record {name}"))
}

#[test]
fn sexagesimal_sign_lives_on_first_component() {
    let negative = parse_angle("-10 30 0", AngleRole::Declination, AngleEncoding::Sexagesimal)
        .expect("negative declination");
    let positive = parse_angle("10 30 0", AngleRole::Declination, AngleEncoding::Sexagesimal)
        .expect("positive declination");
    let plus = parse_angle("+10 30 0", AngleRole::Declination, AngleEncoding::Sexagesimal)
        .expect("explicit plus");

    assert_abs_diff_eq!(negative, -10.5, epsilon = 1e-12);
    assert_abs_diff_eq!(positive, 10.5, epsilon = 1e-12);
    assert_abs_diff_eq!(plus, 10.5, epsilon = 1e-12);
}

#[test]
fn negative_zero_degrees_keeps_sign() {
    let dec = parse_angle("-00 30 00.0", AngleRole::Declination, AngleEncoding::Sexagesimal)
        .expect("just south of the equator");
    assert_abs_diff_eq!(dec, -0.5, epsilon = 1e-12);
}

#[test]
fn decimal_degrees_convert_to_hours_for_ra() {
    let ra = parse_angle("180", AngleRole::RightAscension, AngleEncoding::DecimalDegrees)
        .expect("ra degrees");
    assert_abs_diff_eq!(ra, 12.0, epsilon = 1e-12);

    let dec = parse_angle("-45.5", AngleRole::Declination, AngleEncoding::DecimalDegrees)
        .expect("dec degrees");
    assert_abs_diff_eq!(dec, -45.5, epsilon = 1e-12);
}

#[test]
fn sexagesimal_round_trips_within_an_arcsecond() {
    for hours in 0..24u32 {
        for minutes in 0..60u32 {
            for seconds in [0.0, 15.25, 30.5, 59.75] {
                let raw = format!("{hours:02} {minutes:02} {seconds:06.3}");
                let ra = parse_angle(&raw, AngleRole::RightAscension, AngleEncoding::Sexagesimal)
                    .unwrap_or_else(|err| panic!("{raw}: {err}"));
                let expected = hours as f64 + minutes as f64 / 60.0 + seconds / 3600.0;
                assert_abs_diff_eq!(ra, expected, epsilon = 1e-12);

                let split = to_sexagesimal(ra);
                assert!(!split.negative);
                let rederived =
                    split.whole as f64 * 3600.0 + split.minutes as f64 * 60.0 + split.seconds;
                let original = hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds;
                assert_abs_diff_eq!(rederived, original, epsilon = 1e-6);
            }
        }
    }
    assert_eq!(to_sexagesimal(-10.5).to_string(), "-10 30 00.000");
}

#[test]
fn malformed_angles_are_errors_not_zero() {
    let err = parse_angle("12 34", AngleRole::RightAscension, AngleEncoding::Sexagesimal)
        .expect_err("two components");
    assert!(matches!(err, AngleError::NotTriplet { found: 2, .. }));

    let err = parse_angle("12 -3 4", AngleRole::RightAscension, AngleEncoding::Sexagesimal)
        .expect_err("signed minutes");
    assert!(matches!(err, AngleError::SignedComponent { .. }));

    let err = parse_angle("  ", AngleRole::Declination, AngleEncoding::DecimalDegrees)
        .expect_err("blank");
    assert!(matches!(err, AngleError::Empty { .. }));

    let err = parse_angle("abc", AngleRole::Declination, AngleEncoding::DecimalDegrees)
        .expect_err("text");
    assert!(matches!(err, AngleError::NotNumeric { .. }));
}

#[test]
fn out_of_range_angles_are_rejected() {
    let err = parse_angle("24 00 00", AngleRole::RightAscension, AngleEncoding::Sexagesimal)
        .expect_err("ra of 24h");
    assert!(matches!(err, AngleError::OutOfRange { .. }));

    let err = parse_angle("360", AngleRole::RightAscension, AngleEncoding::DecimalDegrees)
        .expect_err("ra of 360 degrees");
    assert!(matches!(err, AngleError::OutOfRange { .. }));

    let err = parse_angle("90.5", AngleRole::Declination, AngleEncoding::DecimalDegrees)
        .expect_err("dec past the pole");
    assert!(matches!(err, AngleError::OutOfRange { .. }));

    assert!(parse_angle("-90", AngleRole::Declination, AngleEncoding::DecimalDegrees).is_ok());
}

#[test]
fn ra_rounding_to_24_wraps_to_zero() {
    assert_eq!(round_hours(23.99999999, 4), 0.0);
    assert_eq!(round_hours(23.99994, 4), 23.9999);
}

#[test]
fn name_chain_falls_back_through_identifiers() {
    let chain = SourceFormat::SaoCsv.descriptor().name_chain;

    let row = [("name", "  "), ("hd", "12345")];
    assert_eq!(resolve_name(chain, &row[..], "SAO", "7"), "HD12345");

    let row = [("name", "sao   308"), ("hd", "8890")];
    assert_eq!(resolve_name(chain, &row[..], "SAO", "7"), "SAO 308");

    let row = [("name", ""), ("hd", "")];
    assert_eq!(resolve_name(chain, &row[..], "SAO", "7"), "SAO 7");

    assert_eq!(clean_name(" \t "), None);
}

#[test]
fn spectral_class_keeps_letter_and_subclass() {
    assert_eq!(spectral_class("G2IV").as_deref(), Some("G2"));
    assert_eq!(spectral_class("K1.5IIIFe-0.5").as_deref(), Some("K1"));
    assert_eq!(spectral_class("M").as_deref(), Some("M"));
    assert_eq!(spectral_class("STAR"), None);
    assert_eq!(spectral_class("star"), None);
    assert_eq!(spectral_class("sdB"), None);
    assert_eq!(spectral_class(""), None);
}

#[test]
fn magnitude_policy_decides_missing_values() {
    assert_eq!(
        parse_magnitude(None, MagnitudePolicy::FaintSentinel),
        Ok(FAINT_MAGNITUDE)
    );
    assert_eq!(
        parse_magnitude(Some("n/a"), MagnitudePolicy::FaintSentinel),
        Ok(FAINT_MAGNITUDE)
    );
    assert_eq!(
        parse_magnitude(Some(" "), MagnitudePolicy::Reject),
        Err(MagnitudeError::Missing)
    );
    assert!(matches!(
        parse_magnitude(Some("bright"), MagnitudePolicy::Reject),
        Err(MagnitudeError::NotNumeric { .. })
    ));
    assert_eq!(parse_magnitude(Some("-1.46"), MagnitudePolicy::Reject), Ok(-1.46));
}

#[test]
fn parses_fk5_cross_index_export() {
    let content = fixture("fk5_cross_index.tsv");
    let parsed = Fk5CrossIndexParser::default()
        .parse(&content)
        .expect("FK5 parse failed");

    assert_eq!(parsed.format(), SourceFormat::Fk5CrossIndex);
    assert_eq!(parsed.report.accepted, 10);
    assert_eq!(parsed.report.skipped_count(), 2);
    assert_eq!(parsed.records.len(), 10);

    let sirius = find(&parsed, "SIRIUS");
    assert_abs_diff_eq!(sirius.ra, 6.752477, epsilon = 1e-6);
    assert_abs_diff_eq!(sirius.dec, -16.716117, epsilon = 1e-6);
    assert_abs_diff_eq!(sirius.mag, -1.46, epsilon = 1e-9);
    assert_eq!(sirius.spectral_type.as_deref(), Some("A1"));

    assert_eq!(find(&parsed, "POLARIS").spectral_type.as_deref(), Some("F7"));
    assert!(find(&parsed, "HD358").dec > 29.0);
    assert!(parsed.records.iter().any(|record| record.name == "SAO21133"));
    assert!(parsed.records.iter().any(|record| record.name == "FK5 3"));

    let blank_vmag = find(&parsed, "HD1581");
    assert_eq!(blank_vmag.mag, FAINT_MAGNITUDE);
    assert_eq!(blank_vmag.spectral_type.as_deref(), Some("G2"));

    let southern = find(&parsed, "HD2");
    assert_abs_diff_eq!(southern.dec, -0.5, epsilon = 1e-12);
    assert_eq!(southern.spectral_type, None);
}

#[test]
fn fk5_reports_skipped_rows() {
    let content = fixture("fk5_cross_index.tsv");
    let parsed = Fk5CrossIndexParser::default()
        .parse(&content)
        .expect("FK5 parse failed");

    let reasons: Vec<&RowError> = parsed.report.skipped.iter().map(|row| &row.reason).collect();
    assert!(matches!(
        reasons[0],
        RowError::Coordinate {
            column: "RAJ2000",
            source: AngleError::NotTriplet { .. }
        }
    ));
    assert!(matches!(
        reasons[1],
        RowError::ColumnCount {
            expected: 11,
            found: 3
        }
    ));
}

#[test]
fn fk5_rejects_unexpected_header() {
    let content = "FK5|RA|DE\n----|--|--\n1|00 00 01|+01 00 00\n";
    let err = Fk5CrossIndexParser::default()
        .parse(content)
        .expect_err("header mismatch");
    assert!(matches!(err, ParserError::FormatMismatch { .. }));
}

#[test]
fn fk5_requires_data_rows() {
    let content = "#\nFK5|RAJ2000|pmRA|DEJ2000|pmDE|Vmag|Sp|DM|SAO|HD|name\n----|---\n\n# nothing\n";
    let err = Fk5CrossIndexParser::default()
        .parse(content)
        .expect_err("no rows");
    assert!(matches!(err, ParserError::EmptyData { .. }));
}

#[test]
fn parses_hyg_database_extract() {
    let content = fixture("hyg_sample.csv");
    let parsed = HygParser::default().parse(&content).expect("HYG parse failed");

    assert_eq!(parsed.report.accepted, 9);
    assert_eq!(parsed.report.skipped_count(), 4);

    let sirius = find(&parsed, "SIRIUS");
    assert_abs_diff_eq!(sirius.ra, 6.752477, epsilon = 1e-9);
    assert_abs_diff_eq!(sirius.dec, -16.716116, epsilon = 1e-9);
    assert_eq!(sirius.spectral_type.as_deref(), Some("A0"));

    // The parser keeps Sol; dropping the origin is a filtering decision.
    let sol = find(&parsed, "SOL");
    assert_eq!((sol.ra, sol.dec), (0.0, 0.0));

    assert_eq!(find(&parsed, "ARCTURUS").spectral_type.as_deref(), Some("K1"));
    assert!(parsed.records.iter().any(|record| record.name == "21ALP AND"));
    assert!(parsed.records.iter().any(|record| record.name == "HR1790"));
    assert!(parsed.records.iter().any(|record| record.name == "HD12345"));

    let anonymous = find(&parsed, "HYG 1001");
    assert_eq!(anonymous.spectral_type, None);
    assert_abs_diff_eq!(anonymous.mag, 8.5, epsilon = 1e-12);
}

#[test]
fn hyg_skips_rows_with_bad_coordinates_or_magnitude() {
    let content = fixture("hyg_sample.csv");
    let parsed = HygParser::default().parse(&content).expect("HYG parse failed");

    let skipped = &parsed.report.skipped;
    assert!(matches!(
        skipped[0].reason,
        RowError::Magnitude {
            source: MagnitudeError::Missing,
            ..
        }
    ));
    assert!(matches!(
        skipped[1].reason,
        RowError::Coordinate {
            source: AngleError::NotNumeric { .. },
            ..
        }
    ));
    assert!(matches!(
        skipped[2].reason,
        RowError::Coordinate {
            source: AngleError::OutOfRange { .. },
            ..
        }
    ));
    assert!(matches!(skipped[3].reason, RowError::ColumnCount { .. }));
}

#[test]
fn hyg_ra_hours_override() {
    let content = "id,proper,ra,dec,mag,spect\n1,Test,6.5,10,3.0,G2V\n";
    let options = ParseOptions {
        ra_encoding: Some(AngleEncoding::DecimalHours),
        ..ParseOptions::default()
    };
    let parser = parser_for(SourceFormat::Hyg, &options).expect("hyg parser");
    assert_eq!(parser.format(), SourceFormat::Hyg);
    assert!(parser_for(SourceFormat::Synthetic, &options).is_none());
    let parsed = parser.parse(content).expect("HYG hours parse failed");
    assert_abs_diff_eq!(parsed.records[0].ra, 6.5, epsilon = 1e-12);
}

#[test]
fn parses_sao_catalog() {
    let content = fixture("sao_catalog.csv");
    let parsed = SaoCsvParser::default().parse(&content).expect("SAO parse failed");

    assert_eq!(parsed.report.accepted, 5);
    assert_eq!(parsed.report.skipped_count(), 3);
    let skipped_lines: Vec<usize> = parsed.report.skipped.iter().map(|row| row.line).collect();
    assert_eq!(skipped_lines, vec![6, 7, 8]);

    let polaris = find(&parsed, "SAO 308");
    assert_abs_diff_eq!(polaris.ra, 2.530304, epsilon = 1e-6);
    assert_abs_diff_eq!(polaris.dec, 89.264109, epsilon = 1e-9);
    assert_eq!(polaris.spectral_type, None);

    assert_eq!(find(&parsed, "SAO 151881").spectral_type.as_deref(), Some("A1"));
    assert!(parsed.records.iter().any(|record| record.name == "HD12345"));
    assert_abs_diff_eq!(find(&parsed, "SAO 3000").ra, 12.0, epsilon = 1e-12);
}

#[test]
fn reject_policy_override_drops_faint_placeholders() {
    let content = fixture("fk5_cross_index.tsv");
    let options = ParseOptions {
        magnitude_policy: Some(MagnitudePolicy::Reject),
        ..ParseOptions::default()
    };
    let parsed = parse_catalog_with(&content, &options).expect("FK5 parse failed");
    assert_eq!(parsed.report.accepted, 9);
    assert_eq!(parsed.report.skipped_count(), 3);
    assert!(parsed.records.iter().all(|record| record.mag < FAINT_MAGNITUDE));
}

#[test]
fn detects_each_format() {
    let cases = [
        ("fk5_cross_index.tsv", SourceFormat::Fk5CrossIndex),
        ("hyg_sample.csv", SourceFormat::Hyg),
        ("sao_catalog.csv", SourceFormat::SaoCsv),
    ];
    for (file, expected) in cases {
        let parsed = parse_catalog(&fixture(file))
            .unwrap_or_else(|err| panic!("{file} failed to parse: {err}"));
        assert_eq!(parsed.format(), expected, "{file}");
    }
}

#[test]
fn parse_unknown_format_returns_no_matching_parser() {
    let err = parse_catalog("alpha,beta\n1,2\n").expect_err("unknown format");
    match err {
        ParserError::NoMatchingParser { attempts } => {
            let names: Vec<&str> = attempts.iter().map(|attempt| attempt.parser).collect();
            assert_eq!(names, vec!["FK5_CROSS_INDEX", "SAO_CSV", "HYG"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn header_only_table_is_empty_data() {
    let err = HygParser::default()
        .parse("ra,dec,mag\n")
        .expect_err("no rows");
    assert!(matches!(err, ParserError::EmptyData { .. }));
}

#[test]
fn synthetic_generation_is_deterministic() {
    let first = SyntheticGenerator::new(250, 42).generate().expect("generate");
    let second = SyntheticGenerator::new(250, 42).generate().expect("generate");
    let other = SyntheticGenerator::new(250, 7).generate().expect("generate");

    assert_eq!(first.records, second.records);
    assert_ne!(first.records, other.records);
    assert_eq!(first.seed, Some(42));
    assert_eq!(first.format(), SourceFormat::Synthetic);
}

#[test]
fn synthetic_records_stay_in_range() {
    let parsed = SyntheticGenerator::new(500, 1).generate().expect("generate");
    assert_eq!(parsed.records.len(), 500);
    for record in &parsed.records {
        assert!((0.0..24.0).contains(&record.ra), "ra {}", record.ra);
        assert!((-90.0..=90.0).contains(&record.dec), "dec {}", record.dec);
        assert!((-1.5..=6.5).contains(&record.mag), "mag {}", record.mag);
        assert!(!record.name.is_empty());
        assert!(record.spectral_type.is_some());
    }
}

#[test]
fn synthetic_rejects_zero_count() {
    let err = SyntheticGenerator::new(0, 42)
        .generate()
        .expect_err("zero stars");
    assert!(matches!(err, ParserError::Generator { .. }));
}
