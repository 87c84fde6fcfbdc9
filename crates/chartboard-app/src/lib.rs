//! Chartboard application shell
//!
//! Headless wiring of the core editor: session scripts in, board state out.

pub mod session;
pub mod shortcuts;

pub use session::{AppError, AppResult, BoardReport, Session, SessionEvent};
pub use shortcuts::ShortcutRegistry;
