use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use xbf_decoder::{HeaderDecoder, XbfFile};

use crate::synth::SyntheticHeader;

/// Whether a case's header should decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expect {
    Accept,
    Reject,
}

/// One entry of the on-disk regression suite.
#[derive(Clone, Debug)]
pub struct RegressionCase {
    /// File stem; the case is written to `<dir>/<name>.out`.
    pub name: &'static str,
    pub description: &'static str,
    pub header: SyntheticHeader,
    pub expect: Expect,
}

/// Result of running one case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseOutcome {
    /// The header decoded (or failed) as the case expected.
    pub passed: bool,
    /// Rendered decode error, if decoding failed.
    pub error: Option<String>,
}

/// The regression suite, in a stable order.
///
/// The `f1_*` cases reproduce the hand-written structs the format was
/// first tested with; the rest cover one failure mode each.
#[must_use]
pub fn regression_cases() -> Vec<RegressionCase> {
    let reference = SyntheticHeader::with_strings(
        b"xform.ncd",
        b"v1000efg860",
        b"2001/08/10",
        b"06:55:04",
    );

    vec![
        RegressionCase {
            name: "reference",
            description: "Reference header with a short payload",
            header: reference.clone().with_payload(vec![0xff; 16]),
            expect: Expect::Accept,
        },
        RegressionCase {
            name: "f1_nob",
            description: "Correct 1st field",
            header: SyntheticHeader {
                field1_len: 9,
                preamble: b"__--__--|".to_vec(),
                field2_len: 1,
                magic_a: b'a',
                ..SyntheticHeader::default()
            },
            expect: Expect::Reject,
        },
        RegressionCase {
            name: "f1_ncdnonull",
            description: "No null termination of the header",
            header: SyntheticHeader {
                field1_len: 9,
                preamble: b"__--__--|".to_vec(),
                field2_len: 1,
                magic_a: b'a',
                ncd_len: 10,
                ncd_name: b"0123456789".to_vec(),
                magic_b: b'b',
                magic_c: b'c',
                magic_d: b'd',
                ..SyntheticHeader::default()
            },
            expect: Expect::Reject,
        },
        RegressionCase {
            name: "f1_ncdnull",
            description: "Is null, but ...",
            header: SyntheticHeader {
                field1_len: 9,
                preamble: b"__--__--|".to_vec(),
                field2_len: 1,
                magic_a: b'a',
                ncd_len: 10,
                ncd_name: b"012345678\0".to_vec(),
                magic_b: b'b',
                magic_c: b'c',
                magic_d: b'd',
                ..SyntheticHeader::default()
            },
            expect: Expect::Reject,
        },
        RegressionCase {
            name: "f1_neglen",
            description: "Negative length in the header",
            header: SyntheticHeader {
                field1_len: 0xffff,
                preamble: b"12345678\0".to_vec(),
                ..SyntheticHeader::default()
            },
            expect: Expect::Reject,
        },
        RegressionCase {
            name: "f1_lentoobig",
            description: "Too long length in the header",
            header: SyntheticHeader {
                field1_len: 1000,
                preamble: b"12345678\0".to_vec(),
                ..SyntheticHeader::default()
            },
            expect: Expect::Reject,
        },
        RegressionCase {
            name: "part_magic",
            description: "Magic 'b' replaced",
            header: SyntheticHeader {
                magic_b: b'B',
                ..reference.clone()
            },
            expect: Expect::Reject,
        },
        RegressionCase {
            name: "date_len",
            description: "Date length 10 instead of 11",
            header: SyntheticHeader {
                date_len: 10,
                ..reference.clone()
            },
            expect: Expect::Reject,
        },
        RegressionCase {
            name: "time_nonull",
            description: "Time without terminator",
            header: SyntheticHeader {
                time: b"06:55:04X".to_vec(),
                ..reference.clone()
            },
            expect: Expect::Reject,
        },
        RegressionCase {
            name: "part_toolong",
            description: "Part name length past the end of the file",
            header: SyntheticHeader {
                part_len: 0x7fff,
                ..reference.clone()
            },
            expect: Expect::Reject,
        },
        RegressionCase {
            name: "payload_toolong",
            description: "Payload length past the end of the file",
            header: SyntheticHeader {
                payload_len: 0x000c_9090,
                ..reference
            },
            expect: Expect::Reject,
        },
    ]
}

/// Write `case` to `<dir>/<name>.out`, creating `dir` if needed.
///
/// # Errors
///
/// Returns any I/O error from creating the directory or writing the file.
pub fn write_case(dir: &Path, case: &RegressionCase) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.out", case.name));
    fs::write(&path, case.header.to_bytes())?;
    Ok(path)
}

/// Write `case` to disk, reopen it through [`XbfFile`], and compare the
/// outcome with the expectation.
///
/// # Errors
///
/// Returns an I/O error only if the case file can't be written. Decode and
/// open failures are part of the outcome, not errors.
pub fn run_case(
    dir: &Path,
    case: &RegressionCase,
    decoder: &HeaderDecoder,
) -> io::Result<CaseOutcome> {
    let path = write_case(dir, case)?;
    let outcome = match XbfFile::open_with(&path, decoder) {
        Ok(mut file) => {
            file.close();
            CaseOutcome {
                passed: case.expect == Expect::Accept,
                error: None,
            }
        }
        Err(e) => CaseOutcome {
            passed: case.expect == Expect::Reject,
            error: Some(decoder.render(&e)),
        },
    };
    Ok(outcome)
}
