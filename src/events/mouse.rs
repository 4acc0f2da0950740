//! Mouse event handling: chart hover, keyword clicks, feed rows and the category sidebar.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::state::interaction::{
    change_category, click_keyword, hover_keyword, leave_keyword, move_feed_selection,
};
use crate::state::{AppState, CellPos, Dispatch, Focus, Modal};

use super::utils::{contains, hit};

/// What: Handle a mouse event.
///
/// Details:
/// - A click dismisses an open modal and is otherwise swallowed while one is shown.
/// - Motion over a keyword label hovers it; motion anywhere else leaves the hover.
/// - Left clicks select keywords, highlight feed rows or switch category.
/// - The wheel moves the feed highlight while the pointer is over the feed.
pub fn handle_mouse_event(m: MouseEvent, app: &mut AppState, dispatch: &Dispatch) {
    let (mx, my) = (m.column, m.row);
    if app.modal != Modal::None {
        if matches!(m.kind, MouseEventKind::Down(_)) {
            app.modal = Modal::None;
        }
        return;
    }
    match m.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            match hit(&app.keyword_rects, mx, my) {
                Some(id) => hover_keyword(app, id, CellPos::new(mx, my), dispatch),
                None => leave_keyword(app),
            }
        }
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(id) = hit(&app.keyword_rects, mx, my) {
                app.focus = Focus::Chart;
                click_keyword(app, id, dispatch);
            } else if let Some(index) = hit(&app.feed_rows, mx, my) {
                app.focus = Focus::Feed;
                app.feed_selected = index.min(app.comments.len().saturating_sub(1));
            } else if let Some(category) = hit(&app.category_rects, mx, my) {
                change_category(app, category, dispatch);
            }
        }
        MouseEventKind::ScrollUp if over_feed(app, mx, my) => move_feed_selection(app, -1),
        MouseEventKind::ScrollDown if over_feed(app, mx, my) => move_feed_selection(app, 1),
        _ => {}
    }
}

fn over_feed(app: &AppState, x: u16, y: u16) -> bool {
    app.feed_rect.is_some_and(|r| contains(r, x, y))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use crossterm::event::KeyModifiers;
    use ratatui::layout::Rect;

    use super::*;
    use crate::state::{Comment, HoverState, Keyword, SentimentSnapshot, SyncCommand};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn app_with_layout() -> AppState {
        let mut app = AppState::default();
        app.keywords = vec![Keyword {
            id: 4,
            text: "kw".into(),
            rank: 1,
            angle: 0.0,
            category_id: 1,
            created_at: Utc::now(),
        }];
        app.sentiments.insert(4, SentimentSnapshot::placeholder());
        app.keyword_rects = vec![(4, Rect::new(10, 5, 6, 1))];
        app.comments = (1..=3)
            .map(|id| Comment {
                id,
                keyword_id: 4,
                keyword_name: "kw".into(),
                category_name: "google".into(),
                text: format!("c{id}"),
                author: "익명".into(),
                origin: "1.1.1.1".into(),
                created_at: Utc::now(),
                likes: 0,
                popular: false,
            })
            .collect();
        app.feed_rect = Some(Rect::new(40, 2, 30, 10));
        app.feed_rows = vec![
            (0, Rect::new(40, 2, 30, 2)),
            (1, Rect::new(40, 4, 30, 2)),
            (2, Rect::new(40, 6, 30, 2)),
        ];
        app.category_rects = vec![(1, Rect::new(0, 2, 8, 1)), (2, Rect::new(0, 3, 8, 1))];
        app
    }

    #[tokio::test]
    /// What: Moving onto a label starts a pending hover; moving off cancels it.
    async fn motion_hovers_and_leaves_keyword() {
        let (dispatch, _rx) = Dispatch::channel();
        let mut app = app_with_layout();
        handle_mouse_event(mouse(MouseEventKind::Moved, 12, 5), &mut app, &dispatch);
        assert_eq!(
            app.hover,
            HoverState::Pending {
                keyword: 4,
                pointer: CellPos::new(12, 5)
            }
        );
        assert!(app.hover_debounce.is_armed());
        handle_mouse_event(mouse(MouseEventKind::Moved, 30, 20), &mut app, &dispatch);
        assert_eq!(app.hover, HoverState::Idle);
        assert!(!app.hover_debounce.is_armed());
    }

    #[test]
    /// What: Clicks select a feed row, switch category and toggle a keyword.
    fn clicks_route_to_rows_categories_and_keywords() {
        let (dispatch, mut rx) = Dispatch::channel();
        let mut app = app_with_layout();
        let left = MouseEventKind::Down(MouseButton::Left);

        handle_mouse_event(mouse(left, 45, 5), &mut app, &dispatch);
        assert_eq!(app.feed_selected, 1);
        assert_eq!(app.focus, Focus::Feed);

        handle_mouse_event(mouse(MouseEventKind::ScrollDown, 45, 5), &mut app, &dispatch);
        assert_eq!(app.feed_selected, 2);
        handle_mouse_event(mouse(MouseEventKind::ScrollDown, 1, 1), &mut app, &dispatch);
        assert_eq!(app.feed_selected, 2);

        handle_mouse_event(mouse(left, 11, 5), &mut app, &dispatch);
        assert_eq!(app.selected, Some(4));
        handle_mouse_event(mouse(left, 11, 5), &mut app, &dispatch);
        assert_eq!(app.selected, None);

        handle_mouse_event(mouse(left, 2, 3), &mut app, &dispatch);
        assert_eq!(app.category, 2);
        assert_eq!(rx.sync_rx.try_recv().ok(), Some(SyncCommand::SetCategory(2)));
    }

    #[test]
    /// What: An open alert eats the click that dismisses it.
    fn click_dismisses_alert_only() {
        let (dispatch, _rx) = Dispatch::channel();
        let mut app = app_with_layout();
        app.modal = Modal::Alert {
            message: "oops".into(),
        };
        handle_mouse_event(
            mouse(MouseEventKind::Down(MouseButton::Left), 11, 5),
            &mut app,
            &dispatch,
        );
        assert_eq!(app.modal, Modal::None);
        assert_eq!(app.selected, None);
    }
}
