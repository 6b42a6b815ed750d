use clap::error::ErrorKind;
use clap::Parser;
use semabe::dialog::{Dialog, Terminal, Zenity};
use semabe::replacer::{self, Outcome};
use semabe::{logging, Config, Mode};
use std::process::ExitCode;

/// Replaces symbolic window-control or arrow icons in an icon theme, or restores the originals.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// controls | arrows | restore
    mode: String,

    /// icon style variant shipped with the theme
    style: String,

    /// icon theme to modify
    theme_name: String,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let dialog: Box<dyn Dialog> = match Zenity::detect() {
        Some(z) => Box::new(z),
        None => Box::new(Terminal),
    };

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            dialog.error(
                replacer::TITLE,
                "Usage:\nsemabe-icons <mode> <style> <theme_name>",
            );
            return ExitCode::FAILURE;
        }
    };
    logging::init(cli.verbose);

    let result = cli
        .mode
        .parse::<Mode>()
        .and_then(|mode| Config::load().map(|config| (mode, config)))
        .and_then(|(mode, config)| {
            replacer::run(mode, &cli.style, &cli.theme_name, &config, dialog.as_ref())
        });

    match result {
        Ok(Outcome::Completed(_)) | Ok(Outcome::Cancelled) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            dialog.error(replacer::TITLE, &e.to_string());
            ExitCode::from(e.exit_code())
        }
    }
}
