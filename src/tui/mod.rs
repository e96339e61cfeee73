//! Terminal front-end: navigation tabs with the live banner list on top.

mod app;
mod banners;
pub mod events;
mod theme;

pub use app::{run_tui, App};
pub use banners::{banner_line, BannerList};
pub use theme::Theme;
