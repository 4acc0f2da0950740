use std::io::stdout;

use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Put the terminal into dashboard mode.
///
/// Details:
/// - Raw mode, alternate screen, mouse capture for hover, and focus reporting so
///   capture can be re-armed on `FocusGained`.
/// - Raw mode is dropped again if the screen switch fails.
pub fn setup_terminal() -> Result<()> {
    terminal::enable_raw_mode()?;
    if let Err(e) = execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, EnableFocusChange) {
        let _ = terminal::disable_raw_mode();
        return Err(e.into());
    }
    Ok(())
}

/// Undo [`setup_terminal`].
pub fn restore_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    execute!(stdout(), DisableFocusChange, DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}
