use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};

/// Well-known file that downstream tooling reads Monte Carlo samples from
pub const DATA_OUT_FILE: &str = "data.out";

/// Overwrite `path` with one sample per line followed by the elapsed
/// microseconds.
///
/// The content is written to a temporary file first and then renamed over
/// the target, so readers never see a half-written file.
pub fn write_samples(path: &Path, samples: &[f64], elapsed_micros: u64) -> Result<()> {
    let mut content = String::with_capacity(samples.len() * 16 + 24);
    for sample in samples {
        // Infallible for String
        let _ = writeln!(content, "{sample:.6}");
    }
    let _ = writeln!(content, "{elapsed_micros}");

    let temp_path = path.with_extension("out.tmp");
    fs::write(&temp_path, content)
        .and_then(|()| fs::rename(&temp_path, path))
        .wrap_err_with(|| format!("Could not write samples to {}", path.display()))?;

    tracing::info!(path = %path.display(), samples = samples.len(), "wrote Monte Carlo samples");
    Ok(())
}
