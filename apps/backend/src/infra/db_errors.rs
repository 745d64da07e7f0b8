//! SeaORM -> DomainError translation.
//!
//! Adapters return raw `DbErr`; repositories call [`map_db_err`] so higher
//! layers only ever see sanitized, PII-safe details.

use tracing::{error, warn};

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Known unique constraints, matched by Postgres' default constraint names.
fn map_unique_constraint(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("app_users_email_key") {
        return Some((ConflictKind::UniqueEmail, "이미 등록된 이메일입니다."));
    }
    if error_msg.contains("app_users_auth_sub_key") {
        return Some((
            ConflictKind::UniqueAuthSub,
            "이미 다른 사용자에게 연결된 계정입니다.",
        ));
    }
    if error_msg.contains("ux_leave_balances_user_type_year") {
        return Some((
            ConflictKind::UniqueLeaveBalance,
            "이미 해당 연도의 휴가 잔여가 존재합니다.",
        ));
    }
    None
}

pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");
        if let Some((kind, detail)) = map_unique_constraint(&error_msg) {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation(
            ValidationKind::ForeignKey,
            "참조하는 항목이 존재하지 않습니다.",
        );
    }

    if mentions_sqlstate(&error_msg, "23514") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation(ValidationKind::Check, "허용되지 않는 값입니다.");
    }

    if error_msg.contains("statement timeout")
        || error_msg.contains("canceling statement")
        || error_msg.contains("pool timed out")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    if let sea_orm::DbErr::Json(_) | sea_orm::DbErr::Type(_) = &e {
        error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Stored row could not be decoded");
        return DomainError::infra(InfraErrorKind::DataCorruption, "Stored data is malformed");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbErr, RuntimeErr};

    use super::*;

    fn exec_err(msg: &str) -> DbErr {
        DbErr::Exec(RuntimeErr::Internal(msg.to_string()))
    }

    #[test]
    fn maps_duplicate_email() {
        let err = map_db_err(exec_err(
            "error returned from database: duplicate key value violates unique constraint \"app_users_email_key\"",
        ));
        assert!(matches!(err, DomainError::Conflict(ConflictKind::UniqueEmail, _)));
    }

    #[test]
    fn maps_unknown_unique_to_generic_conflict() {
        let err = map_db_err(exec_err("SQLSTATE(23505) something_else_key"));
        assert!(matches!(err, DomainError::Conflict(ConflictKind::Other(_), _)));
    }

    #[test]
    fn maps_fk_and_check_to_validation() {
        assert!(matches!(
            map_db_err(exec_err("SQLSTATE(23503) fk_tasks_project_id")),
            DomainError::Validation(ValidationKind::ForeignKey, _)
        ));
        assert!(matches!(
            map_db_err(exec_err("SQLSTATE(23514) projects_share_rate_check")),
            DomainError::Validation(ValidationKind::Check, _)
        ));
    }

    #[test]
    fn maps_statement_timeout() {
        let err = map_db_err(exec_err("canceling statement due to statement timeout"));
        assert!(matches!(err, DomainError::Infra(InfraErrorKind::Timeout, _)));
    }

    #[test]
    fn record_not_found_is_generic() {
        let err = map_db_err(DbErr::RecordNotFound("tasks".into()));
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::Other(_), _)));
    }
}
