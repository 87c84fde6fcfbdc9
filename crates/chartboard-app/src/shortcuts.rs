//! Keyboard shortcut documentation.

use chartboard_core::Shortcut;

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        Shortcut::ALL.to_vec()
    }

    /// Format one shortcut for display (e.g., "Ctrl+C   Copy selected charts").
    pub fn format(shortcut: Shortcut) -> String {
        let mut line = format!("  {:20} {}", shortcut.keys(), shortcut.description());
        if shortcut.needs_freeform() {
            line.push_str(" (free-form layout only)");
        }
        line
    }

    /// Print all shortcuts to console.
    pub fn print_all() {
        println!("\n=== Keyboard Shortcuts ===");
        for shortcut in Self::all() {
            println!("{}", Self::format(shortcut));
        }
        println!();
    }
}
