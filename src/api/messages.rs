//! Messages API
//!
//! Endpoints for driving the message bus from outside the process:
//!
//! - POST   /api/messages/:channel        - Publish a message (empty text = clear-signal)
//! - DELETE /api/messages/:channel        - Drop the bus state held for a channel
//! - GET    /api/messages/:channel/stats  - Subscriber and pending counts

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::info;

use crate::services::PublishReport;
use crate::types::Message;
use crate::AppState;

// =============================================================================
// Router
// =============================================================================

/// Create messages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:channel", post(publish).delete(clear))
        .route("/:channel/stats", get(stats))
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub channel: String,
    pub subscribers: usize,
    pub pending: usize,
}

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/messages/:channel
///
/// The channel in the path wins over any `channelId` in the body.
async fn publish(
    State(state): State<AppState>,
    Path(channel): Path<String>,
    Json(mut message): Json<Message>,
) -> Json<ApiResponse<PublishReport>> {
    message.channel_id = channel;
    let report = state.bus.publish(message);
    Json(ApiResponse { data: report })
}

/// DELETE /api/messages/:channel
async fn clear(
    State(state): State<AppState>,
    Path(channel): Path<String>,
) -> Json<ApiResponse<ChannelStats>> {
    state.bus.clear(&channel);
    info!("Cleared bus state for '{}'", channel);
    Json(ApiResponse {
        data: channel_stats(&state, channel),
    })
}

/// GET /api/messages/:channel/stats
async fn stats(
    State(state): State<AppState>,
    Path(channel): Path<String>,
) -> Json<ApiResponse<ChannelStats>> {
    Json(ApiResponse {
        data: channel_stats(&state, channel),
    })
}

fn channel_stats(state: &AppState, channel: String) -> ChannelStats {
    ChannelStats {
        subscribers: state.bus.subscriber_count(&channel),
        pending: state.bus.pending_count(&channel),
        channel,
    }
}
