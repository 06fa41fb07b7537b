use anyhow::Context;
use clap::Parser;
use slim_aar::{slim_aar, SlimConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Removes dependency classes from a soong-built AAR and adds resources.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Prefix of the class entries to keep, e.g. `com/android/car/ui/`
    #[arg(long)]
    classes_allowlist: String,

    /// Path of the AAR to write
    output: PathBuf,

    /// AAR produced by soong
    soong_aar: PathBuf,

    /// Resource folders to add, numbered from 1 in the given order
    res_folders: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = SlimConfig::new(
        args.classes_allowlist,
        args.output,
        args.soong_aar,
        args.res_folders,
    )?;

    slim_aar(&config).with_context(|| {
        format!(
            "Failed to slim {} into {}",
            config.input.display(),
            config.output.display()
        )
    })?;

    Ok(())
}
