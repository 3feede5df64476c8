use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use iraplan_core::model::{InputSeries, InputVariableKind};
use tracing::debug;

/// Read `years` rows of yearly inputs from a CSV file.
///
/// Columns are matched by header name, so their order does not matter and
/// extra columns are ignored. Row `i` supplies the inputs for year `i`.
pub fn read_input_series(path: &Path, years: usize) -> Result<InputSeries> {
    let mut reader = csv::Reader::from_path(path)
        .wrap_err_with(|| format!("Could not read from input CSV file {}", path.display()))?;

    let headers = reader
        .headers()
        .wrap_err_with(|| format!("Could not read headers of {}", path.display()))?
        .clone();

    let mut columns = [0usize; InputVariableKind::COUNT];
    for kind in InputVariableKind::ALL {
        columns[kind.index()] = headers
            .iter()
            .position(|h| h.trim() == kind.csv_header())
            .ok_or_else(|| {
                eyre!(
                    "Input CSV file {} has no column '{}' (available: {:?})",
                    path.display(),
                    kind.csv_header(),
                    headers.iter().collect::<Vec<_>>()
                )
            })?;
    }

    let mut values: [Vec<f64>; InputVariableKind::COUNT] =
        std::array::from_fn(|_| Vec::with_capacity(years));
    for (i, record) in reader.records().take(years).enumerate() {
        // Header is line 1
        let line = i + 2;
        let record = record
            .wrap_err_with(|| format!("Could not read line {line} of {}", path.display()))?;

        for kind in InputVariableKind::ALL {
            let cell = record.get(columns[kind.index()]).unwrap_or("");
            let value = cell.trim().parse::<f64>().map_err(|_| {
                eyre!(
                    "Invalid value {cell:?} for '{}' on line {line} of {}",
                    kind.csv_header(),
                    path.display()
                )
            })?;
            values[kind.index()].push(value);
        }
    }

    let available = values[0].len();
    if available < years {
        bail!(
            "Input CSV file {} has {available} data rows but {years} years were requested",
            path.display()
        );
    }

    let series = InputSeries::from_columns(values)
        .wrap_err_with(|| format!("Inconsistent columns in {}", path.display()))?;
    debug!(path = %path.display(), years, "read input series");
    Ok(series)
}
