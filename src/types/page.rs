//! Page-level shapes for the moderation request detail route.

use serde::{Deserialize, Serialize};

/// Parameters resolved from the route path.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RouteParams {
    pub id: Option<String>,
}

/// Static page metadata.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageMetadata {
    pub title: &'static str,
}

/// Props handed to the detail view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ModerationRequestDetail {
    pub moderation_request_id: String,
}

/// A resolved page: metadata plus the detail props it renders.
#[derive(Debug, Clone, Serialize)]
pub struct DetailPage {
    pub metadata: PageMetadata,
    pub detail: ModerationRequestDetail,
}
