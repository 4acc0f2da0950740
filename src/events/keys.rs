use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::interaction::{
    activate_focused_keyword, change_category, close_composer, composer_backspace, composer_input,
    delete_selected_comment, focus_keyword, leave_keyword, like_comment, move_feed_selection,
    submit_comment,
};
use crate::state::{AppState, Dispatch, Focus, Modal, SyncCommand};

/// What: Handle a key press.
///
/// Output:
/// - `true` when the application should exit.
///
/// Details:
/// - Modals take every key first; Alert closes on any key, Help on Esc/Enter/`?`.
/// - While the composer is open, printable keys edit it and Enter submits, so only
///   non-printable keys and `Ctrl+C` reach the dashboard bindings.
pub fn handle_key(ke: KeyEvent, app: &mut AppState, dispatch: &Dispatch) -> bool {
    if ke.code == KeyCode::Char('c') && ke.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }
    match app.modal {
        Modal::Alert { .. } => {
            app.modal = Modal::None;
            return false;
        }
        Modal::Help => {
            if matches!(ke.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?')) {
                app.modal = Modal::None;
            }
            return false;
        }
        Modal::None => {}
    }
    if app.selected.is_some() && handle_composer_key(ke, app, dispatch) {
        return false;
    }
    handle_dashboard_key(ke, app, dispatch)
}

/// Composer editing; returns `true` when the key was consumed.
fn handle_composer_key(ke: KeyEvent, app: &mut AppState, dispatch: &Dispatch) -> bool {
    match ke.code {
        KeyCode::Esc => close_composer(app),
        KeyCode::Enter => {
            submit_comment(app, dispatch);
        }
        KeyCode::Backspace => composer_backspace(app),
        KeyCode::Char(ch)
            if !ke
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            composer_input(app, ch);
        }
        _ => return false,
    }
    true
}

/// Dashboard bindings.
fn handle_dashboard_key(ke: KeyEvent, app: &mut AppState, dispatch: &Dispatch) -> bool {
    match ke.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => app.modal = Modal::Help,
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Chart => Focus::Feed,
                Focus::Feed => Focus::Chart,
            };
        }
        KeyCode::Left => focus_keyword(app, -1, dispatch),
        KeyCode::Right => focus_keyword(app, 1, dispatch),
        KeyCode::Up | KeyCode::Char('k') => {
            app.focus = Focus::Feed;
            move_feed_selection(app, -1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.focus = Focus::Feed;
            move_feed_selection(app, 1);
        }
        KeyCode::Enter => match app.focus {
            Focus::Chart => {
                activate_focused_keyword(app, dispatch);
            }
            Focus::Feed => like_selected(app, dispatch),
        },
        KeyCode::Char('l') => like_selected(app, dispatch),
        KeyCode::Char('d') => {
            delete_selected_comment(app, dispatch);
        }
        KeyCode::Char('r') => {
            let _ = dispatch.sync_tx.send(SyncCommand::RefreshComments);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = usize::from(c as u8 - b'1');
            if let Some(id) = app.categories.get(index).map(|k| k.id) {
                change_category(app, id, dispatch);
            }
        }
        KeyCode::Esc => {
            leave_keyword(app);
            app.keyword_focus = None;
        }
        _ => {}
    }
    false
}

fn like_selected(app: &mut AppState, dispatch: &Dispatch) {
    if let Some(id) = app.selected_comment().map(|c| c.id) {
        like_comment(app, id, dispatch);
    }
}
