//! End-to-end tests for [`XbfFile`]: real files on disk, mapped and decoded.

use std::fs;

use xbf_decoder::{
    DecodeError, DecoderConfig, Field, HeaderDecoder, ResourceError, XbfError, XbfFile,
};
use xbf_fixtures::{Expect, SyntheticHeader, regression_cases, run_case, write_case};
use xbf_tests::scratch_dir;

#[test]
fn open_maps_and_decodes_reference_file() {
    let dir = scratch_dir("open");
    let path = dir.join("design.bit");
    fs::write(&path, SyntheticHeader::reference().to_bytes()).unwrap();

    let file = XbfFile::open(&path).unwrap();
    assert!(file.is_open());
    assert_eq!(file.path(), Some(path.as_path()));
    assert_eq!(file.len(), 72 + 0x000c_9090);

    let header = file.header().unwrap();
    assert_eq!(header.part_name(), "v1000efg860");
    assert_eq!(header.payload_offset(), 72);
    assert_eq!(header.payload().len(), 0x000c_9090);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = scratch_dir("missing");
    let err = XbfFile::open(dir.join("nope.bit")).unwrap_err();
    assert!(matches!(err, XbfError::Resource(ResourceError::Io { .. })), "{err:?}");
    assert!(err.to_string().contains("couldn't open file"));
}

#[test]
fn file_below_typical_header_size_is_too_small() {
    let dir = scratch_dir("small");
    let path = dir.join("tiny.bit");
    fs::write(&path, [0u8; 71]).unwrap();

    let err = XbfFile::open(&path).unwrap_err();
    assert!(
        matches!(err, XbfError::Resource(ResourceError::TooSmall { size: 71, min: 72, .. })),
        "{err:?}"
    );
}

#[test]
fn empty_file_is_too_small() {
    let dir = scratch_dir("empty");
    let path = dir.join("empty.bit");
    fs::write(&path, b"").unwrap();
    assert!(matches!(
        XbfFile::open(&path),
        Err(XbfError::Resource(ResourceError::TooSmall { size: 0, .. }))
    ));
}

#[test]
fn malformed_file_reports_decode_error() {
    let dir = scratch_dir("malformed");
    let header = SyntheticHeader {
        magic_c: b'C',
        ..SyntheticHeader::reference()
    };
    let path = dir.join("bad.bit");
    fs::write(&path, header.to_bytes()).unwrap();

    let err = XbfFile::open(&path).unwrap_err();
    assert!(
        matches!(
            err,
            XbfError::Decode(DecodeError::MagicMismatch { field: Field::Date, offset: 41, .. })
        ),
        "{err:?}"
    );
}

#[test]
fn closing_releases_the_mapping() {
    let dir = scratch_dir("close");
    let path = dir.join("design.bit");
    fs::write(&path, SyntheticHeader::reference().to_bytes()).unwrap();

    let mut file = XbfFile::open(&path).unwrap();
    file.close();
    assert!(!file.is_open());
    assert!(file.is_empty());
    assert!(matches!(file.header(), Err(XbfError::NotInitialized)));
    file.close();
}

#[test]
fn write_case_uses_case_name() {
    let dir = scratch_dir("write");
    let case = &regression_cases()[0];
    let path = write_case(&dir, case).unwrap();
    assert_eq!(path, dir.join(format!("{}.out", case.name)));
    assert_eq!(fs::read(&path).unwrap(), case.header.to_bytes());
}

#[test]
fn every_regression_case_passes_from_disk() {
    let dir = scratch_dir("regress");
    let decoder = HeaderDecoder::default();
    for case in regression_cases() {
        let outcome = run_case(&dir, &case, &decoder).unwrap();
        assert!(outcome.passed, "{}: {:?}", case.name, outcome.error);
        assert_eq!(outcome.error.is_some(), case.expect == Expect::Reject, "{}", case.name);
    }
}

#[test]
fn regression_errors_carry_diagnostics_when_enabled() {
    let dir = scratch_dir("diag");
    let decoder = HeaderDecoder::new(DecoderConfig::default().with_diagnostics(true));
    let case = regression_cases()
        .into_iter()
        .find(|c| c.name == "part_magic")
        .unwrap();

    let outcome = run_case(&dir, &case, &decoder).unwrap();
    assert!(outcome.passed);
    assert_eq!(
        outcome.error.as_deref(),
        Some("wrong header format: magic 'b' missing (0x42) [Field4 at offset 0x001a]")
    );
}
