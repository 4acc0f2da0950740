//! Pure dashboard logic: chart geometry, feed ordering, sentiment model, keyword refresh.

pub mod comments;
pub mod geometry;
pub mod keywords;
pub mod sentiment;

pub use comments::{format_timestamp, mask_origin, order_feed, parse_timestamp};
pub use geometry::{ChartViewport, polar_offset};
pub use keywords::{assign_angles, keyword_angle, latest_update, seed_sentiments};
pub use sentiment::{donut_arcs, freeze_anchor, percentages, popup_rect};
