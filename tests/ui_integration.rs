//! Integration tests for dashboard rendering using ratatui's `TestBackend`.
//!
//! These verify that each pane draws across representative states and that the
//! hit-test rects the mouse handlers depend on are recorded.

use chrono::Utc;
use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

use trendboard::logic::assign_angles;
use trendboard::state::{
    AppState, CellPos, Comment, HoverState, Keyword, Modal, SENTIMENT_UNAVAILABLE,
    SentimentSnapshot,
};
use trendboard::ui;

fn keyword(id: i64, text: &str) -> Keyword {
    Keyword {
        id,
        text: text.into(),
        rank: u32::try_from(id).unwrap_or(0),
        angle: 0.0,
        category_id: 1,
        created_at: Utc::now(),
    }
}

fn comment(id: i64, likes: i64, origin: &str) -> Comment {
    let mut c = Comment {
        id,
        keyword_id: 1,
        keyword_name: "날씨".into(),
        category_name: "google".into(),
        text: format!("comment {id}"),
        author: "익명".into(),
        origin: origin.into(),
        created_at: Utc::now(),
        likes: 0,
        popular: false,
    };
    c.set_likes(likes);
    c
}

/// App with six keywords around the ring and a short feed.
fn create_test_app_state() -> AppState {
    let mut app = AppState::default();
    app.keywords = ["날씨", "환율", "월드컵", "주식", "여행", "맛집"]
        .iter()
        .zip(1..)
        .map(|(t, id)| keyword(id, t))
        .collect();
    assign_angles(&mut app.keywords);
    for k in &app.keywords {
        app.sentiments.insert(k.id, SentimentSnapshot::computed(0.7, 0.3));
    }
    app.keywords_loading = false;
    app.comments = vec![comment(1, 9, "203.0.113.7"), comment(2, 0, "198.51.100.23")];
    app.comments_loading = false;
    app.last_updated = Some(Utc::now());
    app
}

fn render_ui_to_backend(width: u16, height: u16, app: &mut AppState) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
    terminal
        .draw(|f| ui::ui(f, app))
        .expect("failed to draw test terminal");
    terminal
}

fn buffer_text(buffer: &Buffer) -> String {
    buffer.content().iter().map(|c| c.symbol()).collect()
}

#[test]
fn test_ui_renders_loading_state() {
    let mut app = AppState::default();
    let terminal = render_ui_to_backend(120, 40, &mut app);
    let text = buffer_text(terminal.backend().buffer());
    assert!(text.contains("Loading keywords"));
    assert!(text.contains("Loading comments"));
    assert!(app.keyword_rects.is_empty());
    assert_eq!(app.category_rects.len(), 5);
    assert!(app.chart_rect.is_some());
}

#[test]
fn test_ui_records_keyword_and_feed_rects() {
    let mut app = create_test_app_state();
    let terminal = render_ui_to_backend(120, 40, &mut app);

    assert_eq!(app.viewport.width, 120);
    assert_eq!(app.keyword_rects.len(), 6);
    let chart = app.chart_rect.expect("chart rect");
    for (_, r) in &app.keyword_rects {
        assert!(r.x >= chart.x && r.x + r.width <= chart.x + chart.width);
        assert!(r.y >= chart.y && r.y < chart.y + chart.height);
    }
    assert_eq!(app.feed_rows.len(), 2);

    let text = buffer_text(terminal.backend().buffer());
    assert!(text.contains("trendboard"));
    assert!(text.contains("203.0.*.***"));
    assert!(text.contains('★'));
}

#[test]
fn test_ui_renders_composer_for_selection() {
    let mut app = create_test_app_state();
    app.selected = Some(1);
    app.composer.text = "great trend!".into();
    let terminal = render_ui_to_backend(120, 40, &mut app);
    let text = buffer_text(terminal.backend().buffer());
    assert!(text.contains("great trend!"));
    assert!(text.contains("12/500"));
    assert!(text.contains("Be the first to comment"));
}

#[test]
fn test_sentiment_popup_shows_percentages_and_uncomputed_message() {
    let mut app = create_test_app_state();
    app.hover = HoverState::Stable {
        keyword: 2,
        anchor: CellPos::new(40, 10),
    };
    let terminal = render_ui_to_backend(120, 40, &mut app);
    let text = buffer_text(terminal.backend().buffer());
    assert!(text.contains("70%"));
    assert!(text.contains("30%"));

    app.sentiments
        .insert(2, SentimentSnapshot::uncomputed(SENTIMENT_UNAVAILABLE));
    let terminal = render_ui_to_backend(120, 40, &mut app);
    let text = buffer_text(terminal.backend().buffer());
    assert!(!text.contains("70%"));
    assert!(!text.contains("analysing"));
}

#[test]
fn test_modals_render() {
    let mut app = create_test_app_state();
    app.modal = Modal::Alert {
        message: "Failed to post comment: offline".into(),
    };
    let terminal = render_ui_to_backend(120, 40, &mut app);
    assert!(buffer_text(terminal.backend().buffer()).contains("offline"));

    app.modal = Modal::Help;
    let terminal = render_ui_to_backend(120, 40, &mut app);
    assert!(buffer_text(terminal.backend().buffer()).contains("delete own comment"));
}

#[test]
fn test_layout_responsive() {
    for (width, height) in [(60, 16), (80, 24), (200, 60)] {
        let mut app = create_test_app_state();
        app.selected = Some(3);
        let terminal = render_ui_to_backend(width, height, &mut app);
        let buffer = terminal.backend().buffer();
        assert_eq!(buffer.area.width, width);
        assert_eq!(buffer.area.height, height);
    }
}

#[test]
fn test_footer_toggle() {
    let mut app = create_test_app_state();
    let terminal = render_ui_to_backend(160, 40, &mut app);
    assert!(buffer_text(terminal.backend().buffer()).contains("switch pane"));

    app.show_keybinds_footer = false;
    let terminal = render_ui_to_backend(160, 40, &mut app);
    assert!(!buffer_text(terminal.backend().buffer()).contains("switch pane"));
}
