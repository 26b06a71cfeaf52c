//! Integration tests for the record parser against both published layouts
//!
//! These tests exercise the public API the way the conversion pipeline
//! uses it: resolve a layout through the registry, strip header lines,
//! then parse.

use lvis_processor::parser::data_lines;
use lvis_processor::{LdsVersion, LvisError, SchemaRegistry, parse_records};

const LDS104_CONTENT: &str = "\
# IceBridge LVIS Level-2 Geolocated Surface Elevation Product
# LFID SHOTNUMBER TIME LONGITUDE_CENTROID LATITUDE_CENTROID ELEVATION_CENTROID \
LONGITUDE_LOW LATITUDE_LOW ELEVATION_LOW LONGITUDE_HIGH LATITUDE_HIGH ELEVATION_HIGH
1280903110 468001 80337.502 310.84538 68.49744 120.31 310.84539 68.49745 119.87 310.84537 68.49743 121.12
1280903110 468002 80337.602 310.84638 68.49754 120.41 310.84639 68.49755 119.97 310.84637 68.49753 121.22
";

#[test]
fn test_parse_lds104_granule_content() {
    let registry = SchemaRegistry::standard();
    let schema = registry.schema_for(LdsVersion::V104).unwrap();

    let columns = parse_records(data_lines(LDS104_CONTENT), schema).unwrap();

    assert_eq!(columns.len(), 2);
    assert_eq!(columns.field_names().len(), 12);

    let shots = columns.column("Shot_Number").unwrap().as_integers().unwrap();
    assert_eq!(shots, &[468001, 468002]);

    let times = columns.float_values("Time").unwrap();
    assert_eq!(times, &[80337.502, 80337.602]);
}

#[test]
fn test_parse_rejects_wrong_width_against_other_version() {
    let registry = SchemaRegistry::standard();
    let schema = registry.schema_for(LdsVersion::V202).unwrap();

    // 12-column data against the 42-column layout fails on the first line
    let result = parse_records(data_lines(LDS104_CONTENT), schema);
    match result {
        Err(LvisError::MalformedRecord {
            line_index,
            expected,
            found,
            version,
        }) => {
            assert_eq!(line_index, 0);
            assert_eq!(expected, 42);
            assert_eq!(found, 12);
            assert_eq!(version, LdsVersion::V202);
        }
        other => panic!("expected MalformedRecord, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_unknown_version_fails_before_parsing() {
    let registry = SchemaRegistry::standard();

    // The label lookup fails before any line could be touched
    let result = registry.schema_for_label("v99");
    assert!(matches!(result, Err(LvisError::UnknownVersion { .. })));
}

#[test]
fn test_header_only_content_parses_to_empty_columns() {
    let registry = SchemaRegistry::standard();
    let schema = registry.schema_for(LdsVersion::V104).unwrap();

    let content = "# header line one\n# header line two\n";
    let columns = parse_records(data_lines(content), schema).unwrap();

    assert!(columns.is_empty());
    assert_eq!(columns.field_names().len(), 12);
}

#[test]
fn test_granule_version_resolution() {
    use lvis_processor::GranuleInfo;
    use std::path::Path;

    let registry = SchemaRegistry::standard();

    let legacy =
        GranuleInfo::from_path(Path::new("ILVIS2_GL2009_0414_R1314_049903.TXT")).unwrap();
    assert_eq!(registry.schema_for(legacy.version).unwrap().width(), 12);

    let reprocessed =
        GranuleInfo::from_path(Path::new("ILVIS2_AQ2017_1025_R1803_061576.TXT")).unwrap();
    assert_eq!(registry.schema_for(reprocessed.version).unwrap().width(), 42);
}
