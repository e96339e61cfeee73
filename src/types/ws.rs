use super::{BannerView, InstanceId};
use serde::{Deserialize, Serialize};

/// Incoming WebSocket message from client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// The client moved to another location
    Navigate {
        location: String,
    },
    /// The user closed a banner
    Dismiss {
        #[serde(rename = "instanceId")]
        instance_id: InstanceId,
    },
}

/// Outgoing WebSocket message to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Current banners of the session, in display order
    Banners {
        channel: String,
        banners: Vec<BannerView>,
    },
    Error {
        error: String,
    },
}
