use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use knitout_to_dat::invert_file;

/// Read a Shima-style DAT raster file back into a knitout program.
#[derive(Parser)]
#[command(name = "dat-to-knitout", version)]
struct Cli {
    /// The DAT file to read.
    input: PathBuf,
    /// Where to write the knitout program; defaults to the input with a .knitout extension.
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return ExitCode::FAILURE;
        },
    };
    let output = cli.output.unwrap_or_else(|| cli.input.with_extension("knitout"));
    match invert_file(&cli.input, &output) {
        Ok(()) => {
            log::info!("wrote {}", output.display());
            ExitCode::SUCCESS
        },
        Err(err) => {
            log::error!("{err}");
            let mut source = std::error::Error::source(&err);
            while let Some(cause) = source {
                log::error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        },
    }
}
