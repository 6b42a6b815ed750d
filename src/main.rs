use anyhow::{Context, Result};
use clap::Parser;
use path_absolutize::*;
use semabe::dialog::{Dialog, Headless, Zenity};
use semabe::installer::{self, Outcome};
use semabe::{logging, selftest, Config};
use std::path::PathBuf;
use std::process::ExitCode;

/// Installs the Semabe theme and its Cinnamon extension.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// run tests and exit
    #[arg(long)]
    run_tests: bool,

    /// do not ask for confirmation (non-interactive)
    #[arg(short, long)]
    yes: bool,

    /// directory holding the archives (default: next to this program)
    #[arg(long, value_name = "DIR")]
    archive_dir: Option<PathBuf>,

    #[arg(short, long)]
    verbose: bool,
}

fn program_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("current_exe")?;
    Ok(exe.parent().context("exe has no parent")?.to_path_buf())
}

fn archive_dir(cli: &Cli, config: &Config) -> Result<PathBuf> {
    let dir = match cli.archive_dir.clone().or_else(|| config.archive_dir.clone()) {
        Some(dir) => dir,
        None => program_dir()?,
    };
    Ok(dir.absolutize()?.into_owned())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.run_tests {
        return ExitCode::from(selftest::run());
    }

    let dialog: Box<dyn Dialog> = match Zenity::detect() {
        Some(z) => Box::new(z),
        None => Box::new(Headless),
    };

    let prepared = Config::load()
        .map_err(anyhow::Error::from)
        .and_then(|config| archive_dir(&cli, &config).map(|dir| (config, dir)));
    let (config, dir) = match prepared {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };
    log::debug!("Looking for archives in {}", dir.display());

    match installer::install(cli.yes, &dir, &config, dialog.as_ref()) {
        Ok(Outcome::Installed) | Ok(Outcome::Cancelled) => ExitCode::SUCCESS,
        Err(e) => {
            println!("{}", e);
            dialog.error(installer::TITLE, &e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}
