//! Event handling layer for the trendboard TUI.
//!
//! `handle_event` routes terminal events to the keyboard and mouse handlers,
//! which translate them into the interaction transitions of `state::interaction`.

use crossterm::event::{Event as CEvent, KeyEventKind};

use crate::state::{AppState, Dispatch};

mod keys;
mod mouse;
mod utils;

/// Dispatch a single terminal event and mutate the [`AppState`].
///
/// Returns `true` to signal the application should exit; otherwise `false`.
pub fn handle_event(ev: &CEvent, app: &mut AppState, dispatch: &Dispatch) -> bool {
    match ev {
        CEvent::Key(ke) if ke.kind == KeyEventKind::Press => keys::handle_key(*ke, app, dispatch),
        CEvent::Mouse(m) => {
            mouse::handle_mouse_event(*m, app, dispatch);
            false
        }
        CEvent::FocusGained => {
            crate::util::ensure_mouse_capture();
            false
        }
        _ => false,
    }
}
