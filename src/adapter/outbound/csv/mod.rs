//! CSV roster input and lineup output.

pub mod reader;
pub mod writer;

pub use reader::CsvRosterSource;
pub use writer::CsvLineupWriter;
