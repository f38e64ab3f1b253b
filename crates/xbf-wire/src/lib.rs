#![warn(clippy::pedantic)]

pub mod cursor;
pub mod error;
pub mod field;
pub mod layout;

pub use cursor::Cursor;
pub use error::WireError;
pub use field::Field;
