//! Noticeboard - channel-scoped notification banners driven by a message bus

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod tui;
pub mod types;
pub mod websocket;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use services::{BannerController, MessageBus, NavigationMenu};

// Re-export commonly used types
pub use types::*;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub bus: Arc<MessageBus>,
    pub menu: Arc<NavigationMenu>,
}

impl AppState {
    /// State with the built-in navigation menu.
    pub fn new(config: Config) -> Self {
        Self::with_menu(config, NavigationMenu::default())
    }

    pub fn with_menu(config: Config, menu: NavigationMenu) -> Self {
        Self {
            bus: MessageBus::new(&config.bus),
            config: Arc::new(config),
            menu: Arc::new(menu),
        }
    }

    /// Unmounted banner controller on `channel`, or on the configured default.
    pub fn banner_controller(&self, channel: Option<&str>) -> BannerController {
        let channel = channel
            .filter(|c| !c.is_empty())
            .unwrap_or(self.config.default_channel.as_str());
        BannerController::new(self.bus.clone(), channel, self.config.auto_close())
    }
}

/// Build the HTTP application.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .route("/ws", get(websocket::ws_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
