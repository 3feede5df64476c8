//! File collaborators: CSV input, CSV output and the raw sample file

mod csv_input;
mod csv_output;
mod data_out;

pub use csv_input::read_input_series;
pub use csv_output::write_outputs;
pub use data_out::{DATA_OUT_FILE, write_samples};
