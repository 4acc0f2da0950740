//! Sample data for `--demo` mode.

use chrono::{Duration, Utc};
use serde_json::{Value, json};

use super::MemoryStore;

/// Keyword names per category id, in rank order.
const DEMO_KEYWORDS: [(i64, &[&str]); 5] = [
    (
        1,
        &[
            "날씨", "환율", "로또 당첨번호", "월드컵", "주식", "비트코인", "부동산", "챗봇",
            "전기차", "여행", "맛집", "영화 추천",
        ],
    ),
    (
        2,
        &[
            "오징어 게임", "더 글로리", "기묘한 이야기", "웬즈데이", "피지컬 100", "흑백요리사",
            "킹덤", "D.P.",
        ],
    ),
    (
        3,
        &[
            "뉴스", "웹툰", "쇼핑", "지도", "블로그", "카페", "증권", "스포츠", "연예",
        ],
    ),
    (4, &["메일", "카카오", "티스토리", "브런치", "다음 뉴스", "게임"]),
    (
        5,
        &[
            "뮤직비디오", "먹방", "브이로그", "쇼츠", "게임 실황", "라이브", "ASMR", "리뷰",
            "예능 클립", "다큐",
        ],
    ),
];

const DEMO_COMMENTS: [&str; 10] = [
    "오늘 이거 진짜 많이 보이네요",
    "왜 갑자기 뜬 거죠?",
    "이건 좀 과장된 듯",
    "완전 공감합니다",
    "great trend!",
    "다들 관심 많구나",
    "어제부터 계속 1위네",
    "별로 궁금하지 않은데...",
    "정보 감사합니다",
    "이번 주 내내 화제일 듯",
];

/// Origin the demo session identifies as; some seeded comments carry it.
pub const DEMO_ORIGIN: &str = "203.0.113.7";

const DEMO_ORIGINS: [&str; 4] = [DEMO_ORIGIN, "198.51.100.23", "192.0.2.41", "user_1700000000000_k3j9x0a2b"];

/// What: Build a [`MemoryStore`] seeded with categories, keywords, comments and sentiment.
///
/// Output:
/// - A store with every table the dashboard queries, relations registered for embeds.
///
/// Details:
/// - Timestamps are relative to now so the feed and "last updated" look live.
/// - Every third keyword has no sentiment record to exercise the uncomputed state.
#[must_use]
pub fn demo_store() -> MemoryStore {
    let store = MemoryStore::new()
        .with_table("category", "category_id")
        .with_table("search_term_keyword", "keyword_id")
        .with_table("comment", "comment_id")
        .with_table("comment_recommendation", "recommendation_id")
        .with_table("sentiment_by_comments", "sentiment_id")
        .relate("comment", "keyword_id", "search_term_keyword", "keyword_id");

    let now = Utc::now();
    store.seed(
        "category",
        crate::state::Category::builtin()
            .iter()
            .map(|c| json!({"category_id": c.id, "category_name": c.name}))
            .collect(),
    );

    let mut keywords: Vec<Value> = Vec::new();
    let mut comments: Vec<Value> = Vec::new();
    let mut sentiments: Vec<Value> = Vec::new();
    let mut keyword_id = 0i64;
    let mut comment_id = 0i64;
    for (category_id, names) in DEMO_KEYWORDS {
        for (idx, name) in names.iter().enumerate() {
            keyword_id += 1;
            let rank = idx + 1;
            let minutes = i64::try_from(idx).unwrap_or(0) * 3;
            keywords.push(json!({
                "keyword_id": keyword_id,
                "keyword_name": name,
                "rank": rank,
                "category_id": category_id,
                "is_active": true,
                "created_at": (now - Duration::minutes(minutes)).to_rfc3339(),
            }));
            if keyword_id % 3 != 0 {
                let positive = 0.35 + f64::from(u32::try_from(keyword_id % 7).unwrap_or(0)) * 0.08;
                sentiments.push(json!({
                    "keyword_id": keyword_id,
                    "positive_rate": positive,
                    "negative_rate": 1.0 - positive,
                    "analyzed_at": (now - Duration::minutes(5)).to_rfc3339(),
                }));
            }
            let per_keyword = (keyword_id % 4) + 1;
            for n in 0..per_keyword {
                comment_id += 1;
                let pick = usize::try_from(comment_id).unwrap_or(0);
                comments.push(json!({
                    "comment_id": comment_id,
                    "keyword_id": keyword_id,
                    "comment_contents": DEMO_COMMENTS[pick % DEMO_COMMENTS.len()],
                    "nickname": "익명",
                    "ip_address": DEMO_ORIGINS[pick % DEMO_ORIGINS.len()],
                    "comment_recommendation": (comment_id * 7 + n) % 11,
                    "created_at": (now - Duration::minutes(comment_id * 2 + n)).to_rfc3339(),
                }));
            }
        }
    }
    store.seed("search_term_keyword", keywords);
    store.seed("comment", comments);
    store.seed("sentiment_by_comments", sentiments);
    store
}
