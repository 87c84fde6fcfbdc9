//! Main application entry point.

use chartboard_app::{AppError, AppResult, BoardReport, Session, ShortcutRegistry};

fn main() {
    env_logger::init();
    log::info!("Starting Chartboard");

    if let Err(err) = run() {
        log::error!("{}", err);
        eprintln!("chartboard: {}", err);
        std::process::exit(1);
    }
}

fn run() -> AppResult<()> {
    let arg = std::env::args().nth(1).ok_or(AppError::MissingScript)?;
    if arg == "--shortcuts" {
        ShortcutRegistry::print_all();
        return Ok(());
    }

    let session = Session::load(&arg)?;
    log::info!("Replaying {} event(s) from {}", session.events.len(), arg);
    let mut editor = session.replay()?;
    println!("{}", BoardReport::new(&mut editor).to_json()?);
    Ok(())
}
