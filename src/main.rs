mod report;

use std::{env, io, path::PathBuf, process::exit};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use crossterm::tty::IsTty;

use crate::report::Reporter;

/// List the architectures, install name, dylib dependencies and rpaths of
/// Mach-O files, thin or universal
#[derive(Parser, Debug)]
#[command()]
struct Args {
    /// The Mach-O files to inspect
    files: Vec<PathBuf>,
    /// Never color the output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.files.is_empty() {
        eprintln!("{}", Args::command().render_usage());
        exit(1);
    }

    let stdout = io::stdout();
    let color = !args.no_color && env::var_os("NO_COLOR").is_none() && stdout.is_tty();
    let mut reporter = Reporter::new(stdout.lock(), io::stderr(), color);

    for path in &args.files {
        log::debug!("inspecting {}", path.display());
        let result = dylib_info::inspect_path(path);
        reporter
            .file(path, &result)
            .with_context(|| format!("failed to report on {}", path.display()))?;
    }

    Ok(())
}
