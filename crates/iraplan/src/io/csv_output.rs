use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use iraplan_core::model::OutputDistributions;

/// Write every computed output as a `name,value` record
pub fn write_outputs(path: &Path, outputs: &OutputDistributions) -> Result<()> {
    let context = || format!("Could not write to output CSV file {}", path.display());

    let mut writer = csv::Writer::from_path(path).wrap_err_with(context)?;
    writer.write_record(["name", "value"]).wrap_err_with(context)?;
    for (kind, value) in outputs.iter() {
        writer
            .write_record([kind.name(), value.to_string().as_str()])
            .wrap_err_with(context)?;
    }
    writer.flush().wrap_err_with(context)?;

    tracing::info!(path = %path.display(), "wrote output CSV");
    Ok(())
}
