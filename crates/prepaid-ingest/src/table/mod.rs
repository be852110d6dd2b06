//! Headerless CSV reading and writing of shipment tables.

mod reader;
mod writer;

pub use reader::{read_input_file, read_rows};
pub use writer::{write_output, write_output_file};
