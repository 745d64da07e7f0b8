//! Postgres enum types shared by several tables.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "bu_code")]
#[serde(rename_all = "UPPERCASE")]
pub enum BuCode {
    #[sea_orm(string_value = "GRIGO")]
    Grigo,
    #[sea_orm(string_value = "REACT")]
    React,
    #[sea_orm(string_value = "FLOW")]
    Flow,
    #[sea_orm(string_value = "AST")]
    Ast,
    #[sea_orm(string_value = "MODOO")]
    Modoo,
    #[sea_orm(string_value = "HEAD")]
    Head,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "leader")]
    Leader,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "member")]
    Member,
    #[sea_orm(string_value = "viewer")]
    Viewer,
    #[sea_orm(string_value = "artist")]
    Artist,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_status")]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[sea_orm(string_value = "todo")]
    Todo,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "done")]
    Done,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "task_priority")]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    #[sea_orm(string_value = "high")]
    High,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "low")]
    Low,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "financial_kind")]
#[serde(rename_all = "snake_case")]
pub enum FinancialKind {
    #[sea_orm(string_value = "revenue")]
    Revenue,
    #[sea_orm(string_value = "expense")]
    Expense,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "financial_status")]
#[serde(rename_all = "snake_case")]
pub enum FinancialStatus {
    #[sea_orm(string_value = "planned")]
    Planned,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "canceled")]
    Canceled,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "settlement_status")]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "paid")]
    Paid,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status")]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    #[sea_orm(string_value = "present")]
    Present,
    #[sea_orm(string_value = "late")]
    Late,
    #[sea_orm(string_value = "early_leave")]
    EarlyLeave,
    #[sea_orm(string_value = "absent")]
    Absent,
    #[sea_orm(string_value = "vacation")]
    Vacation,
    #[sea_orm(string_value = "remote")]
    Remote,
    #[sea_orm(string_value = "external")]
    External,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "work_request_type")]
#[serde(rename_all = "snake_case")]
pub enum WorkRequestType {
    #[sea_orm(string_value = "external_work")]
    ExternalWork,
    #[sea_orm(string_value = "remote_work")]
    RemoteWork,
    #[sea_orm(string_value = "overtime")]
    Overtime,
    #[sea_orm(string_value = "attendance_correction")]
    AttendanceCorrection,
}

impl WorkRequestType {
    pub fn label(self) -> &'static str {
        match self {
            Self::ExternalWork => "외근",
            Self::RemoteWork => "재택",
            Self::Overtime => "연장/야근",
            Self::AttendanceCorrection => "출퇴근 정정",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "approval_status")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Balance bucket a day count is drawn from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "leave_type")]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    #[sea_orm(string_value = "annual")]
    Annual,
    #[sea_orm(string_value = "compensatory")]
    Compensatory,
    #[sea_orm(string_value = "special")]
    Special,
}

/// What the employee asked for; half days draw from the annual bucket.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "leave_request_type")]
#[serde(rename_all = "snake_case")]
pub enum LeaveRequestType {
    #[sea_orm(string_value = "annual")]
    Annual,
    #[sea_orm(string_value = "half_am")]
    HalfAm,
    #[sea_orm(string_value = "half_pm")]
    HalfPm,
    #[sea_orm(string_value = "compensatory")]
    Compensatory,
    #[sea_orm(string_value = "special")]
    Special,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "leave_grant_type")]
#[serde(rename_all = "snake_case")]
pub enum LeaveGrantType {
    #[sea_orm(string_value = "auto_monthly")]
    AutoMonthly,
    #[sea_orm(string_value = "auto_yearly")]
    AutoYearly,
    #[sea_orm(string_value = "manual")]
    Manual,
    #[sea_orm(string_value = "compensatory_approved")]
    CompensatoryApproved,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "notification_type")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    #[sea_orm(string_value = "info")]
    Info,
    #[sea_orm(string_value = "success")]
    Success,
    #[sea_orm(string_value = "warning")]
    Warning,
    #[sea_orm(string_value = "error")]
    Error,
}

/// Realtime presence shown on the attendance board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "work_status")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkStatus {
    #[sea_orm(string_value = "WORKING")]
    Working,
    #[sea_orm(string_value = "MEETING")]
    Meeting,
    #[sea_orm(string_value = "OUTSIDE")]
    Outside,
    #[sea_orm(string_value = "BREAK")]
    Break,
    #[sea_orm(string_value = "OFF_WORK")]
    OffWork,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_names_match_database_values() {
        assert_eq!(serde_json::to_string(&BuCode::Modoo).unwrap(), "\"MODOO\"");
        assert_eq!(serde_json::to_string(&Role::Leader).unwrap(), "\"leader\"");
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceStatus::EarlyLeave).unwrap(),
            "\"early_leave\""
        );
        assert_eq!(
            serde_json::from_str::<LeaveRequestType>("\"half_pm\"").unwrap(),
            LeaveRequestType::HalfPm
        );
        assert_eq!(
            serde_json::from_str::<WorkRequestType>("\"attendance_correction\"").unwrap(),
            WorkRequestType::AttendanceCorrection
        );
        assert_eq!(
            serde_json::to_string(&WorkStatus::OffWork).unwrap(),
            "\"OFF_WORK\""
        );
    }

    #[test]
    fn work_request_labels() {
        assert_eq!(WorkRequestType::Overtime.label(), "연장/야근");
        assert_eq!(WorkRequestType::RemoteWork.label(), "재택");
    }
}
