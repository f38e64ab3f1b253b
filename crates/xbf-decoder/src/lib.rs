#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod file;
pub mod header;
pub mod text;

pub use config::DecoderConfig;
pub use decoder::{HeaderDecoder, decode};
pub use error::{DecodeError, Located, ResourceError, XbfError};
pub use file::XbfFile;
pub use header::{HeaderLayout, ParsedHeader};
pub use text::HeaderText;
pub use xbf_wire::Field;
