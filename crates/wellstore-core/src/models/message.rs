use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle of a contact message in the admin inbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "message_status", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    New,
    Read,
    Replied,
    Archived,
}

impl MessageStatus {
    pub const ALL: [MessageStatus; 4] = [
        MessageStatus::New,
        MessageStatus::Read,
        MessageStatus::Replied,
        MessageStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::New => "new",
            MessageStatus::Read => "read",
            MessageStatus::Replied => "replied",
            MessageStatus::Archived => "archived",
        }
    }

    /// Whether an admin may move a message from `self` to `next`.
    ///
    /// Re-applying the current status is always allowed and is a no-op.
    pub fn can_transition_to(&self, next: MessageStatus) -> bool {
        use MessageStatus::*;

        if *self == next {
            return true;
        }
        matches!(
            (self, next),
            (New, Read | Replied | Archived)
                | (Read, New | Replied | Archived)
                | (Replied, Archived)
                | (Archived, Read)
        )
    }
}

impl FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(MessageStatus::New),
            "read" => Ok(MessageStatus::Read),
            "replied" => Ok(MessageStatus::Replied),
            "archived" => Ok(MessageStatus::Archived),
            other => Err(format!("Invalid message status: {}", other)),
        }
    }
}

impl Display for MessageStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Message submitted through the public contact form
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub body: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for submitting a contact message
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateMessageRequest {
    #[validate(length(
        min = 1,
        max = 120,
        message = "Name must be between 1 and 120 characters"
    ))]
    pub name: String,
    #[validate(email(message = "Email address is not valid"))]
    pub email: String,
    #[validate(length(
        min = 1,
        max = 200,
        message = "Subject must be between 1 and 200 characters"
    ))]
    pub subject: String,
    #[validate(length(
        min = 1,
        max = 5000,
        message = "Message body must be between 1 and 5000 characters"
    ))]
    pub body: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMessageStatusRequest {
    pub status: MessageStatus,
}

/// Inbox filter
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct MessageListQuery {
    pub status: Option<MessageStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Number of messages per status; every status is always present
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageStatusCounts {
    pub new: i64,
    pub read: i64,
    pub replied: i64,
    pub archived: i64,
    pub total: i64,
}

impl MessageStatusCounts {
    /// Build from `(status, count)` pairs; statuses missing from the input count as zero.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (MessageStatus, i64)>) -> Self {
        let mut counts = MessageStatusCounts::default();
        for (status, count) in pairs {
            match status {
                MessageStatus::New => counts.new += count,
                MessageStatus::Read => counts.read += count,
                MessageStatus::Replied => counts.replied += count,
                MessageStatus::Archived => counts.archived += count,
            }
            counts.total += count;
        }
        counts
    }
}
