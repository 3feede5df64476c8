use std::io::{self, Write};

use super::RunOutcome;

/// One line per reported value, e.g.
/// `Future value, for yearly taxable payments (compounded annually) futureValueTaxed is $1234.56.`
pub fn write_human<W: Write>(out: &mut W, outcome: &RunOutcome<'_>) -> io::Result<()> {
    for (kind, values) in outcome.output_values() {
        for value in values {
            writeln!(out, "{} {} is ${value:.2}.", kind.description(), kind.name())?;
        }
    }
    Ok(())
}
