//! Binary buffer utilities shared by the Nibs and Tibs encoders.

mod writer;

pub use writer::Writer;
