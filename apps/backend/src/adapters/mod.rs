//! SeaORM adapters. Functions are generic over `ConnectionTrait` and return
//! raw `DbErr`; the repos layer maps errors.

pub mod activity_logs_sea;
pub mod attendance_sea;
pub mod business_units_sea;
pub mod financial_entries_sea;
pub mod leave_sea;
pub mod manuals_sea;
pub mod notifications_sea;
pub mod partners_sea;
pub mod projects_sea;
pub mod settlements_sea;
pub mod task_templates_sea;
pub mod tasks_sea;
pub mod users_sea;
pub mod work_requests_sea;
pub mod work_status_sea;
