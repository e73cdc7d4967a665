//! Excel read/write for bulk transfer

pub mod reader;
pub mod writer;

pub use reader::{Sheet, read_sheet};
pub use writer::write_sheet;
