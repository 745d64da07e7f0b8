//! Use cases. Each function takes the caller, decides permissions and maps
//! failures to `AppError`.

pub mod activity;
pub mod attendance;
pub mod business_units;
pub mod financial_entries;
pub mod leave;
pub mod manuals;
pub mod notifications;
pub mod partners;
pub mod projects;
pub mod settlements;
pub mod task_templates;
pub mod tasks;
pub mod users;
pub mod work_requests;
