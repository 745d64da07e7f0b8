//! In-app notifications plus the task due-soon cron.

use std::collections::HashSet;

use sea_orm::{ConnectionTrait, TransactionTrait};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use time::{Date, Duration, OffsetDateTime};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::kst;
use crate::entities::enums::NotificationType;
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::errors::ErrorCode;
use crate::repos::notifications::{self, Notification, NotificationCreate};
use crate::repos::tasks;

const DUE_SOON_TITLE: &str = "할일 마감이 임박했습니다";

/// A message for one user. Sent through [`notify`] it never fails the
/// caller.
#[derive(Debug, Clone)]
pub struct Notice {
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub kind: NotificationType,
    pub entity_type: Option<&'static str>,
    pub entity_id: Option<String>,
    pub action_url: Option<String>,
}

impl Notice {
    pub fn new(user_id: Uuid, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            message: message.into(),
            kind: NotificationType::Info,
            entity_type: None,
            entity_id: None,
            action_url: None,
        }
    }

    pub fn kind(mut self, kind: NotificationType) -> Self {
        self.kind = kind;
        self
    }

    pub fn entity(mut self, entity_type: &'static str, entity_id: impl ToString) -> Self {
        self.entity_type = Some(entity_type);
        self.entity_id = Some(entity_id.to_string());
        self
    }

    pub fn action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }

    fn into_create(self) -> NotificationCreate {
        NotificationCreate {
            user_id: self.user_id,
            title: self.title,
            message: self.message,
            kind: self.kind,
            entity_type: self.entity_type.map(str::to_string),
            entity_id: self.entity_id,
            action_url: self.action_url,
        }
    }
}

/// Best-effort insert under a savepoint; returns whether it landed.
pub async fn notify<C>(conn: &C, notice: Notice) -> bool
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let user_id = notice.user_id;
    let result: Result<(), DomainError> = async {
        let savepoint = conn.begin().await?;
        notifications::create_notification(&savepoint, notice.into_create()).await?;
        savepoint.commit().await?;
        Ok(())
    }
    .await;

    match result {
        Ok(()) => true,
        Err(err) => {
            warn!(user_id = %user_id, error = %err, "notification write failed");
            false
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub total_count: u64,
    pub unread_count: u64,
}

pub async fn list_own<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    limit: u64,
    offset: u64,
    unread_only: bool,
) -> Result<NotificationPage, AppError> {
    let limit = limit.clamp(1, 100);
    let notifications = notifications::page_for(conn, user_id, unread_only, limit, offset).await?;
    let total_count = notifications::count_for(conn, user_id, unread_only).await?;
    let unread_count = notifications::count_for(conn, user_id, true).await?;
    Ok(NotificationPage {
        notifications,
        total_count,
        unread_count,
    })
}

#[derive(Debug, Deserialize)]
pub struct CreateNotification {
    pub user_id: Option<Uuid>,
    pub title: Option<String>,
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<NotificationType>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub action_url: Option<String>,
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    input: CreateNotification,
) -> Result<Notification, AppError> {
    let (Some(user_id), Some(title), Some(message)) = (
        input.user_id,
        input.title.filter(|s| !s.trim().is_empty()),
        input.message.filter(|s| !s.trim().is_empty()),
    ) else {
        return Err(AppError::missing_fields(
            "user_id, title, message are required",
        ));
    };

    let dto = NotificationCreate {
        user_id,
        title,
        message,
        kind: input.kind.unwrap_or(NotificationType::Info),
        entity_type: input.entity_type,
        entity_id: input.entity_id,
        action_url: input.action_url,
    };
    Ok(notifications::create_notification(conn, dto).await?)
}

pub async fn set_read<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    id: i64,
    read: bool,
) -> Result<Notification, AppError> {
    let notification = notifications::require_owned(conn, id, user_id).await?;
    Ok(notifications::set_read(conn, notification, read).await?)
}

pub async fn mark_all_read<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
) -> Result<u64, AppError> {
    Ok(notifications::mark_all_read(conn, user_id).await?)
}

pub async fn delete_own<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: Uuid,
    id: i64,
) -> Result<(), AppError> {
    Ok(notifications::delete_owned(conn, id, user_id).await?)
}

/// Furthest look-ahead accepted by the due-soon trigger.
pub const MAX_DUE_SOON_DAYS: i64 = 365;

/// The due date `days` after `today`.
pub fn due_date(today: Date, days: i64) -> Result<Date, AppError> {
    let invalid = || {
        AppError::bad_request(
            ErrorCode::ValidationError,
            format!("days must be between 0 and {MAX_DUE_SOON_DAYS}"),
        )
    };
    if !(0..=MAX_DUE_SOON_DAYS).contains(&days) {
        return Err(invalid());
    }
    today.checked_add(Duration::days(days)).ok_or_else(invalid)
}

/// Warn assignees about unfinished tasks due on `due`. One reminder per
/// assignee per day.
pub async fn send_due_soon<C>(conn: &C, due: Date) -> Result<Value, AppError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
{
    let due_str = kst::format_date(due);
    let due_tasks = tasks::due_on(conn, due).await?;

    if due_tasks.is_empty() {
        return Ok(json!({
            "message": "마감 임박 할일이 없습니다.",
            "date": due_str,
            "count": 0,
        }));
    }

    let start_of_today = kst_day_start(kst::now_kst());
    let mut notified: HashSet<Uuid> = HashSet::new();
    let mut results = Vec::with_capacity(due_tasks.len());
    let mut sent_count = 0u32;

    for task in &due_tasks {
        let Some(assignee) = task.assignee_id else {
            continue;
        };
        let already = notified.contains(&assignee)
            || notifications::sent_since(conn, assignee, DUE_SOON_TITLE, start_of_today).await?;
        if already {
            results.push(json!({"taskId": task.id, "userId": assignee, "status": "skipped"}));
            continue;
        }

        let notice = Notice::new(
            assignee,
            DUE_SOON_TITLE,
            format!("\"{}\" - 마감일: {}", task.title, due_str),
        )
        .kind(NotificationType::Warning)
        .entity("task", task.id)
        .action_url(format!("/projects/{}?task={}", task.project_id, task.id));

        let sent = notify(conn, notice).await;
        if sent {
            sent_count += 1;
            notified.insert(assignee);
        }
        results.push(json!({
            "taskId": task.id,
            "userId": assignee,
            "status": if sent { "sent" } else { "failed" },
        }));
    }

    info!(date = %due_str, total = due_tasks.len(), sent = sent_count, "due-soon reminders sent");

    Ok(json!({
        "message": format!("{sent_count}건의 마감 임박 알림을 발송했습니다."),
        "date": due_str,
        "totalTasks": due_tasks.len(),
        "sentCount": sent_count,
        "results": results,
    }))
}

/// Start of the KST day containing `ts`.
pub fn kst_day_start(ts: OffsetDateTime) -> OffsetDateTime {
    kst::at_kst(kst::to_kst(ts).date(), time::Time::MIDNIGHT)
}
