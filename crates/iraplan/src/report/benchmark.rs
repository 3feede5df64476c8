use std::io::{self, Write};

/// `<value> <elapsed_microseconds>`, the two-field line benchmark harnesses parse
pub fn write_benchmark_line<W: Write>(out: &mut W, value: f64, elapsed_micros: u64) -> io::Result<()> {
    writeln!(out, "{value:.6} {elapsed_micros}")
}

pub fn write_timing_line<W: Write>(out: &mut W, elapsed_secs: f64) -> io::Result<()> {
    writeln!(out, "\nCPU time used: {elapsed_secs:.6} seconds")
}
