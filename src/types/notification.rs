//! Notification types carried over the message bus and shown as banners.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Channel used when a controller is created without an explicit one.
pub const DEFAULT_CHANNEL: &str = "default-message";

/// Visual category of a notification.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Danger,
    #[default]
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Success => "success",
            Severity::Danger => "danger",
            Severity::Info => "info",
        }
    }

    /// Parse a severity, falling back to `Info` for anything unrecognised.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "danger" | "error" => Severity::Danger,
            _ => Severity::Info,
        }
    }

    /// Icon shown in front of the banner.
    pub fn icon(&self) -> Icon {
        match self {
            Severity::Success => Icon::Checkmark,
            Severity::Danger | Severity::Info => Icon::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Severity::from_str).unwrap_or_default())
    }
}

/// Reads a JSON `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Banner icon.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Checkmark,
    Info,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Checkmark => "✔",
            Icon::Info => "ℹ",
        }
    }
}

/// Identifier assigned to a banner when it enters a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(pub u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message as published on the bus.
///
/// An empty or absent `text` is not content: it is the clear-signal asking
/// subscribers to drop their non-persistent banners.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Channel the message is published on
    #[serde(default, deserialize_with = "null_as_default")]
    pub channel_id: String,
    /// Body text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Severity (success, danger, info)
    #[serde(rename = "type", default)]
    pub severity: Severity,
    /// Short bold prefix label
    #[serde(default, deserialize_with = "null_as_default")]
    pub lead: String,
    /// Remove automatically after the dwell interval
    #[serde(default, deserialize_with = "null_as_default")]
    pub auto_close: bool,
    /// Survive one clear-signal sweep
    #[serde(default, deserialize_with = "null_as_default")]
    pub keep_after_route_change: bool,
}

impl Message {
    pub fn new(
        channel_id: impl Into<String>,
        severity: Severity,
        lead: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            channel_id: channel_id.into(),
            text: Some(text.into()),
            severity,
            lead: lead.into(),
            auto_close: false,
            keep_after_route_change: false,
        }
    }

    /// Build the clear-signal for a channel.
    pub fn clear_signal(channel_id: impl Into<String>) -> Self {
        Self {
            channel_id: channel_id.into(),
            ..Self::default()
        }
    }

    pub fn with_auto_close(mut self, auto_close: bool) -> Self {
        self.auto_close = auto_close;
        self
    }

    pub fn with_keep_after_route_change(mut self, keep: bool) -> Self {
        self.keep_after_route_change = keep;
        self
    }

    pub fn is_clear_signal(&self) -> bool {
        self.text.as_deref().map_or(true, str::is_empty)
    }
}

/// A message that made it into a notification queue.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub instance_id: InstanceId,
    #[serde(rename = "type")]
    pub severity: Severity,
    pub lead: String,
    pub text: String,
    pub auto_close: bool,
    pub keep_after_route_change: bool,
    /// Arrival time in milliseconds
    pub received_at: i64,
}

impl Banner {
    /// Turn a bus message into a banner. Returns `None` for clear-signals.
    pub fn from_message(instance_id: InstanceId, message: Message) -> Option<Self> {
        let text = message.text.filter(|t| !t.is_empty())?;
        Some(Self {
            instance_id,
            severity: message.severity,
            lead: message.lead,
            text,
            auto_close: message.auto_close,
            keep_after_route_change: message.keep_after_route_change,
            received_at: chrono::Utc::now().timestamp_millis(),
        })
    }
}

/// What a renderer needs to draw one banner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BannerView {
    pub instance_id: InstanceId,
    pub icon: Icon,
    /// Severity used as the visual variant
    pub variant: Severity,
    pub lead: String,
    pub text: String,
    pub dismissible: bool,
}

impl From<&Banner> for BannerView {
    fn from(banner: &Banner) -> Self {
        Self {
            instance_id: banner.instance_id,
            icon: banner.severity.icon(),
            variant: banner.severity,
            lead: banner.lead.clone(),
            text: banner.text.clone(),
            dismissible: true,
        }
    }
}
