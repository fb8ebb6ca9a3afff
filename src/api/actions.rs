use axum::{
    extract::{Form, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::models::{now_iso, Strategy};
use crate::services::PageRenderer;

/// Form body of a message submission
#[derive(Debug, Deserialize, ToSchema)]
pub struct MessageForm {
    /// Text entered by the user
    pub message: String,
}

/// Submit a message
///
/// Stamps and logs the message, then invalidates the cached
/// `/server-actions` page so its next request re-renders.
#[utoipa::path(
    post,
    path = "/server-actions",
    request_body(content = MessageForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 204, description = "Message accepted"),
        (status = 422, description = "Missing message field"),
    ),
    tag = "Actions"
)]
pub async fn handle_submit_message(
    State(renderer): State<Arc<PageRenderer>>,
    Form(form): Form<MessageForm>,
) -> StatusCode {
    let timestamp = now_iso();

    // Only logged; there is no message store
    tracing::info!(message = %form.message, timestamp = %timestamp, "Saving message");

    let scope = Strategy::ServerActions.path();
    let was_cached = renderer.invalidate(scope).await;
    tracing::info!(scope, was_cached, "Revalidated path");

    StatusCode::NO_CONTENT
}
