/// Implementation of `xbf validate`.
///
/// Decodes the header and reports either a set of success checkmarks (`✓`)
/// or a single diagnostic line (`✗`). Exits 0 on a valid header and 1
/// otherwise (the dispatcher in `main.rs` turns `Err` into exit code 1).
///
/// # Success output
///
/// ```text
/// ✓ Header: 7 fields valid (72 bytes)
/// ✓ Strings: NCD name, part name, date and time NUL-terminated
/// ✓ Payload: 823440 bytes at offset 72, within file
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: wrong header format: magic 'b' missing (0x42)
/// ```
use anyhow::{Result, anyhow};
use xbf_decoder::{HeaderDecoder, XbfError, XbfFile};

use crate::ValidateArgs;

/// Run the `xbf validate` command.
///
/// # Errors
///
/// Returns an error if the file can't be read or the header fails any check.
pub fn run(args: &ValidateArgs, decoder: &HeaderDecoder) -> Result<()> {
    match XbfFile::open_with(&args.file, decoder) {
        Ok(file) => {
            let header = file.header()?;
            println!(
                "✓ Header: 7 fields valid ({} bytes)",
                header.payload_offset()
            );
            println!("✓ Strings: NCD name, part name, date and time NUL-terminated");
            println!(
                "✓ Payload: {} bytes at offset {}, within file",
                header.payload_length(),
                header.payload_offset()
            );
            Ok(())
        }

        // Resource problems aren't a verdict on the header; report them as
        // plain errors.
        Err(XbfError::Resource(e)) => Err(e.into()),

        Err(e) => {
            println!("✗ Error: {}", decoder.render(&e));
            Err(anyhow!("validation failed"))
        }
    }
}
