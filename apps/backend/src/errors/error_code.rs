//! Error codes for the GRIGO ERP API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes. Every code
//! is SCREAMING_SNAKE_CASE and appears verbatim in problem-details bodies.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    Unauthorized,
    UnauthorizedMissingBearer,
    UnauthorizedInvalidJwt,
    UnauthorizedExpiredJwt,
    /// Cron endpoint called without the shared secret
    UnauthorizedCron,
    Forbidden,
    /// Authenticated subject has no `app_users` row
    ForbiddenUserNotFound,

    // Request Validation
    ValidationError,
    BadRequest,
    MissingRequiredFields,
    InvalidEmail,
    InvalidDate,
    InvalidTime,
    InvalidShareRate,
    InvalidHeader,
    /// Request is no longer pending
    AlreadyProcessed,
    AlreadyCheckedIn,
    AlreadyCheckedOut,
    NotCheckedIn,
    InsufficientLeaveBalance,
    SettlementNotDraft,
    NoValidProjects,
    ParticipantExists,

    // Resource Not Found
    NotFound,
    UserNotFound,
    PartnerNotFound,
    ProjectNotFound,
    ParticipantNotFound,
    TaskNotFound,
    FinancialEntryNotFound,
    SettlementNotFound,
    AttendanceLogNotFound,
    WorkRequestNotFound,
    LeaveRequestNotFound,
    CompensatoryRequestNotFound,
    NotificationNotFound,
    ManualNotFound,
    TaskTemplateNotFound,

    // Conflicts
    AuthSubMismatch,
    UniqueEmail,
    UniqueViolation,
    Conflict,

    // Database
    FkViolation,
    CheckViolation,
    DbUnavailable,
    DbTimeout,

    // System
    Internal,
    ConfigError,
    DataCorruption,
}

impl ErrorCode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::UnauthorizedCron => "UNAUTHORIZED_CRON",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::MissingRequiredFields => "MISSING_REQUIRED_FIELDS",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidDate => "INVALID_DATE",
            Self::InvalidTime => "INVALID_TIME",
            Self::InvalidShareRate => "INVALID_SHARE_RATE",
            Self::InvalidHeader => "INVALID_HEADER",
            Self::AlreadyProcessed => "ALREADY_PROCESSED",
            Self::AlreadyCheckedIn => "ALREADY_CHECKED_IN",
            Self::AlreadyCheckedOut => "ALREADY_CHECKED_OUT",
            Self::NotCheckedIn => "NOT_CHECKED_IN",
            Self::InsufficientLeaveBalance => "INSUFFICIENT_LEAVE_BALANCE",
            Self::SettlementNotDraft => "SETTLEMENT_NOT_DRAFT",
            Self::NoValidProjects => "NO_VALID_PROJECTS",
            Self::ParticipantExists => "PARTICIPANT_EXISTS",

            Self::NotFound => "NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PartnerNotFound => "PARTNER_NOT_FOUND",
            Self::ProjectNotFound => "PROJECT_NOT_FOUND",
            Self::ParticipantNotFound => "PARTICIPANT_NOT_FOUND",
            Self::TaskNotFound => "TASK_NOT_FOUND",
            Self::FinancialEntryNotFound => "FINANCIAL_ENTRY_NOT_FOUND",
            Self::SettlementNotFound => "SETTLEMENT_NOT_FOUND",
            Self::AttendanceLogNotFound => "ATTENDANCE_LOG_NOT_FOUND",
            Self::WorkRequestNotFound => "WORK_REQUEST_NOT_FOUND",
            Self::LeaveRequestNotFound => "LEAVE_REQUEST_NOT_FOUND",
            Self::CompensatoryRequestNotFound => "COMPENSATORY_REQUEST_NOT_FOUND",
            Self::NotificationNotFound => "NOTIFICATION_NOT_FOUND",
            Self::ManualNotFound => "MANUAL_NOT_FOUND",
            Self::TaskTemplateNotFound => "TASK_TEMPLATE_NOT_FOUND",

            Self::AuthSubMismatch => "AUTH_SUB_MISMATCH",
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Conflict => "CONFLICT",

            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
