pub mod approvals;
pub mod attendance_rules;
pub mod fixtures;
pub mod leave_accrual;
pub mod settlements;
pub mod workspace;
