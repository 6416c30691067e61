//! Session replay entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use certink_app::{ReplayError, Session, replay};

fn run(path: PathBuf) -> Result<(), ReplayError> {
    log::info!("Replaying session {}", path.display());
    let session = Session::load(&path)?;
    let report = replay(&session)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: certink <session.json>");
        return ExitCode::FAILURE;
    };

    match run(path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
