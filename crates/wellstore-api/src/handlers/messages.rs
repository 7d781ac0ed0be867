//! Contact inbox

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;
use wellstore_core::models::{
    ContactMessage, CreateMessageRequest, MessageListQuery, MessageStatusCounts, Pagination,
    UpdateMessageStatusRequest,
};
use wellstore_core::AppError;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::MessageState;

/// Submit a contact message
#[utoipa::path(
    post,
    path = "/api/v0/messages",
    tag = "messages",
    request_body = CreateMessageRequest,
    responses(
        (status = 201, description = "Message stored with status `new`", body = ContactMessage),
        (status = 400, description = "Invalid message", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(messages, request))]
pub async fn create_message(
    State(messages): State<MessageState>,
    ValidatedJson(request): ValidatedJson<CreateMessageRequest>,
) -> Result<(StatusCode, Json<ContactMessage>), HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let message = messages.repository.create_message(&request).await?;
    tracing::info!(message_id = %message.id, "Contact message received");

    Ok((StatusCode::CREATED, Json(message)))
}

/// List messages, newest first
#[utoipa::path(
    get,
    path = "/api/v0/messages",
    tag = "messages",
    params(MessageListQuery),
    responses(
        (status = 200, description = "Page of messages", body = [ContactMessage]),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(messages, query))]
pub async fn list_messages(
    State(messages): State<MessageState>,
    query: Result<Query<MessageListQuery>, QueryRejection>,
) -> Result<Json<Vec<ContactMessage>>, HttpAppError> {
    let Query(query) = query?;
    let page = Pagination {
        limit: query.limit,
        offset: query.offset,
    };

    let list = messages
        .repository
        .list_messages(query.status, page.limit(), page.offset())
        .await?;
    Ok(Json(list))
}

/// Number of messages in each status
#[utoipa::path(
    get,
    path = "/api/v0/messages/counts",
    tag = "messages",
    responses((status = 200, description = "Counts per status", body = MessageStatusCounts))
)]
#[tracing::instrument(skip(messages))]
pub async fn message_counts(
    State(messages): State<MessageState>,
) -> Result<Json<MessageStatusCounts>, HttpAppError> {
    Ok(Json(messages.repository.count_by_status().await?))
}

#[utoipa::path(
    get,
    path = "/api/v0/messages/{id}",
    tag = "messages",
    params(("id" = Uuid, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message", body = ContactMessage),
        (status = 404, description = "No such message", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(messages))]
pub async fn get_message(
    State(messages): State<MessageState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ContactMessage>, HttpAppError> {
    match messages.repository.get_message(id).await? {
        Some(message) => Ok(Json(message)),
        None => Err(AppError::NotFound(format!("Message {} not found", id)).into()),
    }
}

/// Move a message through the inbox workflow
///
/// Allowed: new to read, replied or archived; read to new, replied or archived;
/// replied to archived; archived to read. Setting the current status again is a
/// no-op.
#[utoipa::path(
    patch,
    path = "/api/v0/messages/{id}/status",
    tag = "messages",
    params(("id" = Uuid, Path, description = "Message ID")),
    request_body = UpdateMessageStatusRequest,
    responses(
        (status = 200, description = "Updated message", body = ContactMessage),
        (status = 404, description = "No such message", body = ErrorResponse),
        (status = 409, description = "Transition not allowed", body = ErrorResponse),
    )
)]
#[tracing::instrument(skip(messages, request), fields(message.status = %request.status))]
pub async fn update_message_status(
    State(messages): State<MessageState>,
    Path(id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<UpdateMessageStatusRequest>,
) -> Result<Json<ContactMessage>, HttpAppError> {
    let message = messages.repository.update_status(id, request.status).await?;
    tracing::info!(message_id = %id, status = %message.status, "Message status updated");
    Ok(Json(message))
}
