//! Match result recording.

pub mod csv_writer;

pub use csv_writer::{MatchRecord, ResultsWriter};
