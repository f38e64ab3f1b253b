/// Implementation of `xbf info`.
///
/// Maps the file, decodes the header and prints the field summary.
///
/// # Output format
///
/// ```text
///    File name: design.bit
/// NCD filename: xform.ncd
///    Part name: v1000efg860
///         Date: 2001/08/10
///         Time: 06:55:04
/// Image length: 823440
/// ```
///
/// With `--json`, the same fields (plus the payload offset) are printed as
/// one JSON object.
use anyhow::{Result, anyhow};
use serde::Serialize;
use xbf_decoder::header::LABEL_WIDTH;
use xbf_decoder::{HeaderDecoder, XbfFile};

use crate::InfoArgs;

#[derive(Serialize)]
struct InfoJson<'a> {
    file: &'a str,
    ncd_name: String,
    part_name: String,
    date: String,
    time: String,
    payload_offset: usize,
    payload_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    preamble: Option<String>,
}

/// Run the `xbf info` command.
///
/// # Errors
///
/// Returns an error if the file can't be mapped or its header is malformed.
pub fn run(args: &InfoArgs, decoder: &HeaderDecoder) -> Result<()> {
    let file = XbfFile::open_with(&args.file, decoder)
        .map_err(|e| anyhow!("{}: {}", args.file.display(), decoder.render(&e)))?;
    let header = file.header()?;

    if args.json {
        let info = InfoJson {
            file: file.file_name(),
            ncd_name: header.ncd_name().to_string(),
            part_name: header.part_name().to_string(),
            date: header.date().to_string(),
            time: header.time().to_string(),
            payload_offset: header.payload_offset(),
            payload_length: header.payload_length(),
            preamble: args.show_preamble.then(|| hex::encode(header.preamble())),
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    print!("{file}");
    if args.show_preamble {
        println!("{:>LABEL_WIDTH$}: {}", "Preamble", hex::encode(header.preamble()));
    }

    Ok(())
}
