use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use wellstore_core::{
    models::{ContactMessage, CreateMessageRequest, MessageStatus, MessageStatusCounts},
    AppError,
};

const MESSAGE_COLUMNS: &str = "id, name, email, subject, body, status, created_at, updated_at";

/// Repository for contact messages and their status workflow
#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[tracing::instrument(skip(self, request), fields(db.table = "contact_messages", db.operation = "insert"))]
    pub async fn create_message(
        &self,
        request: &CreateMessageRequest,
    ) -> Result<ContactMessage, AppError> {
        let query = format!(
            r#"
            INSERT INTO contact_messages (name, email, subject, body, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            MESSAGE_COLUMNS
        );

        let message = sqlx::query_as::<Postgres, ContactMessage>(&query)
            .bind(request.name.trim())
            .bind(request.email.trim())
            .bind(request.subject.trim())
            .bind(&request.body)
            .bind(MessageStatus::New)
            .fetch_one(&self.pool)
            .await?;

        Ok(message)
    }

    #[tracing::instrument(skip(self), fields(db.table = "contact_messages", db.operation = "select", db.record_id = %id))]
    pub async fn get_message(&self, id: Uuid) -> Result<Option<ContactMessage>, AppError> {
        let query = format!(
            "SELECT {} FROM contact_messages WHERE id = $1",
            MESSAGE_COLUMNS
        );

        let message = sqlx::query_as::<Postgres, ContactMessage>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(message)
    }

    /// Newest first, optionally restricted to one status
    #[tracing::instrument(skip(self), fields(db.table = "contact_messages", db.operation = "select"))]
    pub async fn list_messages(
        &self,
        status: Option<MessageStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ContactMessage>, AppError> {
        let query = format!(
            r#"
            SELECT {}
            FROM contact_messages
            WHERE ($1::message_status IS NULL OR status = $1)
            ORDER BY created_at DESC, id ASC
            LIMIT $2 OFFSET $3
            "#,
            MESSAGE_COLUMNS
        );

        let messages = sqlx::query_as::<Postgres, ContactMessage>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(messages)
    }

    /// Move a message to `next`, enforcing the allowed transitions.
    ///
    /// The current row is locked for the duration of the check so two admins
    /// cannot race each other past the transition rules.
    #[tracing::instrument(skip(self), fields(db.table = "contact_messages", db.operation = "update", db.record_id = %id))]
    pub async fn update_status(
        &self,
        id: Uuid,
        next: MessageStatus,
    ) -> Result<ContactMessage, AppError> {
        let mut tx = self.pool.begin().await?;

        let select = format!(
            "SELECT {} FROM contact_messages WHERE id = $1 FOR UPDATE",
            MESSAGE_COLUMNS
        );
        let current = sqlx::query_as::<Postgres, ContactMessage>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Message {} not found", id)))?;

        if current.status == next {
            tx.commit().await?;
            return Ok(current);
        }

        if !current.status.can_transition_to(next) {
            return Err(AppError::InvalidStatusTransition {
                from: current.status.to_string(),
                to: next.to_string(),
            });
        }

        let update = format!(
            r#"
            UPDATE contact_messages
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            MESSAGE_COLUMNS
        );
        let updated = sqlx::query_as::<Postgres, ContactMessage>(&update)
            .bind(id)
            .bind(next)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(from = %current.status, to = %next, "Message status updated");

        Ok(updated)
    }

    #[tracing::instrument(skip(self), fields(db.table = "contact_messages", db.operation = "select"))]
    pub async fn count_by_status(&self) -> Result<MessageStatusCounts, AppError> {
        let rows = sqlx::query_as::<Postgres, (MessageStatus, i64)>(
            "SELECT status, COUNT(*) FROM contact_messages GROUP BY status",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(MessageStatusCounts::from_pairs(rows))
    }
}
