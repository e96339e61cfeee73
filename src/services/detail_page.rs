//! Moderation request detail page.

use std::future::Future;

use crate::error::{AppError, Result};
use crate::types::{DetailPage, ModerationRequestDetail, PageMetadata, RouteParams};

/// Title of the requests section pages.
pub const PAGE_TITLE: &str = "Requests";

pub fn metadata() -> PageMetadata {
    PageMetadata { title: PAGE_TITLE }
}

/// Await the route parameters and hand the id, untouched, to the detail view.
///
/// A failed resolution or a missing id is propagated as
/// [`AppError::RouteParams`].
pub async fn moderation_request_page<F>(params: F) -> Result<DetailPage>
where
    F: Future<Output = Result<RouteParams>>,
{
    let params = params.await?;
    let id = params
        .id
        .ok_or_else(|| AppError::RouteParams("missing id".to_string()))?;

    Ok(DetailPage {
        metadata: metadata(),
        detail: ModerationRequestDetail {
            moderation_request_id: id,
        },
    })
}
