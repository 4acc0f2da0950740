//! End-to-end interaction flows against the seeded in-memory store.
//!
//! Input events go through `events::handle_event`, requests are taken off the
//! dispatch channels and executed with the worker functions, and outcomes are
//! folded back with the runtime handlers, as the event loop does.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{
    Event as CEvent, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{Terminal, backend::TestBackend};

use trendboard::app::runtime::handlers::{
    apply_action_outcome, apply_detail_outcome, apply_sentiment_outcome, apply_sync_event,
};
use trendboard::app::runtime::workers::WorkerContext;
use trendboard::app::runtime::workers::actions::perform;
use trendboard::app::runtime::workers::detail::{load_detail, load_sentiment};
use trendboard::events::handle_event;
use trendboard::sources::{self, IdentityResolver};
use trendboard::state::{
    AppState, Dispatch, DispatchReceivers, HoverState, SentimentStatus, SyncEvent,
};
use trendboard::store::{DEMO_ORIGIN, MemoryStore, demo_store};
use trendboard::ui;

struct Harness {
    app: AppState,
    dispatch: Dispatch,
    rx: DispatchReceivers,
    store: Arc<MemoryStore>,
    ctx: WorkerContext,
}

/// Load category 1, the feed and the like history, then render once so hit rects exist.
async fn harness() -> Harness {
    let store = Arc::new(demo_store());
    let ctx = WorkerContext::new(store.clone(), IdentityResolver::fixed(DEMO_ORIGIN));
    let (dispatch, rx) = Dispatch::channel();
    let mut app = AppState::default();

    let keywords = sources::fetch_keywords(store.as_ref(), 1).await;
    apply_sync_event(&mut app, SyncEvent::Keywords { category: 1, result: keywords.map_err(|e| e.to_string()) });
    let comments = sources::fetch_recent_comments(store.as_ref()).await;
    apply_sync_event(&mut app, SyncEvent::Comments(comments.map_err(|e| e.to_string())));
    let liked = sources::fetch_like_history(store.as_ref(), DEMO_ORIGIN)
        .await
        .unwrap_or_default();
    apply_sync_event(
        &mut app,
        SyncEvent::LikeHistory {
            origin: DEMO_ORIGIN.to_string(),
            comments: liked,
        },
    );
    render(&mut app);
    Harness {
        app,
        dispatch,
        rx,
        store,
        ctx,
    }
}

fn render(app: &mut AppState) {
    let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("terminal");
    terminal.draw(|f| ui::ui(f, app)).expect("draw");
}

fn key(code: KeyCode) -> CEvent {
    CEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn mouse(kind: MouseEventKind, column: u16, row: u16) -> CEvent {
    CEvent::Mouse(MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

#[tokio::test]
/// What: Selecting a keyword, writing a comment and submitting it updates every view.
///
/// Inputs:
/// - Click on the first keyword label, type "great trend!", press Enter.
///
/// Output:
/// - The comment is stored under the session origin, added to the feed and the
///   keyword history, the composer closes and a delayed sentiment refresh is queued.
async fn submit_comment_end_to_end() {
    let mut h = harness().await;
    let (kw, rect) = h.app.keyword_rects[0];
    handle_event(
        &mouse(MouseEventKind::Down(MouseButton::Left), rect.x, rect.y),
        &mut h.app,
        &h.dispatch,
    );
    assert_eq!(h.app.selected, Some(kw));

    let req = h.rx.detail_rx.try_recv().expect("detail request");
    let outcome = load_detail(h.store.as_ref(), req).await;
    apply_detail_outcome(&mut h.app, outcome);
    let before = h.app.details.get(&kw).map_or(0, Vec::len);

    for ch in "great trend!".chars() {
        handle_event(&key(KeyCode::Char(ch)), &mut h.app, &h.dispatch);
    }
    handle_event(&key(KeyCode::Enter), &mut h.app, &h.dispatch);
    assert!(h.app.composer.submitting);

    let action = h.rx.action_rx.try_recv().expect("submit request");
    let outcome = perform(&h.ctx, action).await;
    apply_action_outcome(&mut h.app, outcome, &h.dispatch);

    assert_eq!(h.app.selected, None);
    let posted = h
        .app
        .comments
        .iter()
        .find(|c| c.text == "great trend!")
        .expect("comment in feed");
    assert_eq!(posted.origin, DEMO_ORIGIN);
    assert_eq!(posted.keyword_id, kw);
    assert_eq!(posted.likes, 0);
    let history = &h.app.details[&kw];
    assert_eq!(history.len(), before + 1);
    assert_eq!(history.last().map(|d| d.text.as_str()), Some("great trend!"));

    let refresh = h.rx.sentiment_rx.try_recv().expect("sentiment refresh");
    assert_eq!(refresh.keyword, kw);
    assert!(refresh.only_if_present);
    assert!(refresh.delay.is_some());
    assert!(
        h.store
            .rows("comment")
            .iter()
            .any(|r| r["comment_contents"] == "great trend!")
    );
}

#[tokio::test]
/// What: A like goes 0 → 1 once; a second press is a local no-op; own comments delete.
async fn like_once_then_delete_own_comment() {
    let mut h = harness().await;
    let kw = h.app.keywords[0].id;
    let out = perform(
        &h.ctx,
        trendboard::state::ActionRequest::Submit {
            keyword: kw,
            text: "mine".into(),
        },
    )
    .await;
    apply_action_outcome(&mut h.app, out, &h.dispatch);
    let id = h
        .app
        .comments
        .iter()
        .find(|c| c.text == "mine")
        .map(|c| c.id)
        .expect("posted");
    h.app.feed_selected = h.app.comments.iter().position(|c| c.id == id).expect("index");

    handle_event(&key(KeyCode::Char('l')), &mut h.app, &h.dispatch);
    let like = h.rx.action_rx.try_recv().expect("like request");
    let out = perform(&h.ctx, like).await;
    apply_action_outcome(&mut h.app, out, &h.dispatch);
    let liked = h.app.comments.iter().find(|c| c.id == id).expect("still there");
    assert_eq!(liked.likes, 1);
    assert!(h.app.is_liked(id));

    h.app.feed_selected = h.app.comments.iter().position(|c| c.id == id).expect("index");
    handle_event(&key(KeyCode::Char('l')), &mut h.app, &h.dispatch);
    assert!(h.rx.action_rx.try_recv().is_err());

    handle_event(&key(KeyCode::Char('d')), &mut h.app, &h.dispatch);
    let delete = h.rx.action_rx.try_recv().expect("delete request");
    let out = perform(&h.ctx, delete).await;
    apply_action_outcome(&mut h.app, out, &h.dispatch);
    assert!(h.app.comments.iter().all(|c| c.id != id));
    assert!(h.app.details[&kw].iter().all(|d| d.text != "mine"));
}

#[tokio::test(start_paused = true)]
/// What: Resting the pointer on a label past the debounce opens the popup and loads sentiment.
///
/// Inputs:
/// - Mouse motion onto the first label, 250 ms of paused time.
///
/// Output:
/// - Stable hover, one sentiment request, computed snapshot after the fetch.
async fn hover_debounce_opens_popup_and_fetches_sentiment() {
    let mut h = harness().await;
    let (kw, rect) = h.app.keyword_rects[0];
    handle_event(&mouse(MouseEventKind::Moved, rect.x, rect.y), &mut h.app, &h.dispatch);
    assert!(matches!(h.app.hover, HoverState::Pending { keyword, .. } if keyword == kw));

    tokio::time::sleep(Duration::from_millis(250)).await;
    let generation = h.rx.hover_rx.recv().await.expect("debounce expiry");
    assert!(trendboard::state::interaction::hover_timer_fired(
        &mut h.app,
        generation,
        &h.dispatch
    ));
    assert!(matches!(h.app.hover, HoverState::Stable { keyword, .. } if keyword == kw));

    let req = h.rx.sentiment_rx.try_recv().expect("sentiment request");
    let out = load_sentiment(h.store.as_ref(), req).await;
    apply_sentiment_outcome(&mut h.app, out);
    assert_eq!(h.app.sentiments[&kw].status, SentimentStatus::Computed);

    handle_event(&mouse(MouseEventKind::Moved, 0, 0), &mut h.app, &h.dispatch);
    assert_eq!(h.app.hover, HoverState::Idle);
}
