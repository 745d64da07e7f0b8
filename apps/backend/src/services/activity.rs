//! Best-effort activity feed writes.
//!
//! A failed insert is logged and swallowed; the caller's own transaction is
//! protected by running the insert under a savepoint.

use sea_orm::{ConnectionTrait, TransactionTrait};
use serde_json::Value;
use time::OffsetDateTime;
use tracing::warn;
use uuid::Uuid;

use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::repos::activity_logs::{self, ActivityCreate, ActivityLog};

pub mod action {
    pub const PROJECT_CREATED: &str = "project_created";
    pub const PROJECT_UPDATED: &str = "project_updated";
    pub const PROJECT_STATUS_CHANGED: &str = "project_status_changed";
    pub const TASK_CREATED: &str = "task_created";
    pub const TASK_ASSIGNED: &str = "task_assigned";
    pub const TASK_STATUS_CHANGED: &str = "task_status_changed";
    pub const TASK_COMPLETED: &str = "task_completed";
    pub const FINANCIAL_CREATED: &str = "financial_created";
    pub const FINANCIAL_UPDATED: &str = "financial_updated";
    pub const CHECK_IN: &str = "check_in";
    pub const CHECK_OUT: &str = "check_out";
    pub const AUTO_CHECK_OUT: &str = "auto_check_out";
    pub const ATTENDANCE_CORRECTED: &str = "attendance_corrected";
    pub const LEAVE_GRANTED: &str = "leave_granted";
}

pub mod entity {
    pub const PROJECT: &str = "project";
    pub const TASK: &str = "task";
    pub const FINANCIAL_ENTRY: &str = "financial_entry";
    pub const ATTENDANCE: &str = "attendance";
    pub const LEAVE_GRANT: &str = "leave_grant";
}

const MAX_LIMIT: u64 = 500;

/// One feed entry, built by the service that performed the action.
#[derive(Debug, Clone)]
pub struct Activity {
    pub user_id: Option<Uuid>,
    pub action_type: &'static str,
    pub entity_type: &'static str,
    pub entity_id: String,
    pub entity_title: Option<String>,
    pub metadata: Value,
}

impl Activity {
    pub fn new(
        user_id: Uuid,
        action_type: &'static str,
        entity_type: &'static str,
        entity_id: impl ToString,
    ) -> Self {
        Self {
            user_id: Some(user_id),
            action_type,
            entity_type,
            entity_id: entity_id.to_string(),
            entity_title: None,
            metadata: Value::Object(Default::default()),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.entity_title = Some(title.into());
        self
    }

    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

pub async fn record<C>(conn: &C, activity: Activity)
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let action_type = activity.action_type;
    let entity_id = activity.entity_id.clone();
    let dto = ActivityCreate {
        user_id: activity.user_id,
        action_type: activity.action_type.to_string(),
        entity_type: activity.entity_type.to_string(),
        entity_id: activity.entity_id,
        entity_title: activity.entity_title,
        metadata: activity.metadata,
    };

    let result: Result<(), DomainError> = async {
        let savepoint = conn.begin().await?;
        activity_logs::create_activity(&savepoint, dto).await?;
        savepoint.commit().await?;
        Ok(())
    }
    .await;

    if let Err(err) = result {
        warn!(action_type, entity_id = %entity_id, error = %err, "activity log write failed");
    }
}

/// Own feed, newest first. `date` wins over an explicit range.
pub async fn list_own<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    from: Option<OffsetDateTime>,
    to: Option<OffsetDateTime>,
    limit: Option<u64>,
) -> Result<Vec<ActivityLog>, AppError> {
    let limit = limit.unwrap_or(100).clamp(1, MAX_LIMIT);
    Ok(activity_logs::list_for_user(conn, user_id, from, to, limit).await?)
}
