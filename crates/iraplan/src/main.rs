use std::io::Write;

use clap::Parser;
use iraplan::{Args, RunConfigFile, init_logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    init_logging(&args.log_level, args.log_file.as_deref())?;

    let file = match &args.config {
        Some(path) => RunConfigFile::load(path)?,
        None => RunConfigFile::default(),
    };
    let options = args.resolve(file)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&options, &mut out)?;
    out.flush()?;

    tracing::debug!("run complete");
    Ok(())
}
