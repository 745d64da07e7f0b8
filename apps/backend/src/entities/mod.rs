pub mod activity_logs;
pub mod app_users;
pub mod attendance_logs;
pub mod business_units;
pub mod compensatory_requests;
pub mod enums;
pub mod financial_entries;
pub mod leave_balances;
pub mod leave_grants;
pub mod leave_requests;
pub mod manuals;
pub mod notifications;
pub mod partner_settlement_projects;
pub mod partner_settlements;
pub mod partners;
pub mod projects;
pub mod task_templates;
pub mod tasks;
pub mod user_work_status;
pub mod work_requests;

pub use activity_logs::Entity as ActivityLogs;
pub use activity_logs::Model as ActivityLog;
pub use app_users::Entity as AppUsers;
pub use app_users::Model as AppUser;
pub use attendance_logs::Entity as AttendanceLogs;
pub use attendance_logs::Model as AttendanceLog;
pub use business_units::Entity as BusinessUnits;
pub use business_units::Model as BusinessUnit;
pub use compensatory_requests::Entity as CompensatoryRequests;
pub use compensatory_requests::Model as CompensatoryRequest;
pub use financial_entries::Entity as FinancialEntries;
pub use financial_entries::Model as FinancialEntry;
pub use leave_balances::Entity as LeaveBalances;
pub use leave_balances::Model as LeaveBalance;
pub use leave_grants::Entity as LeaveGrants;
pub use leave_grants::Model as LeaveGrant;
pub use leave_requests::Entity as LeaveRequests;
pub use leave_requests::Model as LeaveRequest;
pub use manuals::Entity as Manuals;
pub use manuals::Model as Manual;
pub use notifications::Entity as Notifications;
pub use notifications::Model as Notification;
pub use partner_settlement_projects::Entity as PartnerSettlementProjects;
pub use partner_settlement_projects::Model as PartnerSettlementProject;
pub use partner_settlements::Entity as PartnerSettlements;
pub use partner_settlements::Model as PartnerSettlement;
pub use partners::Entity as Partners;
pub use partners::Model as Partner;
pub use projects::Entity as Projects;
pub use projects::Model as Project;
pub use task_templates::Entity as TaskTemplates;
pub use task_templates::Model as TaskTemplate;
pub use tasks::Entity as Tasks;
pub use tasks::Model as Task;
pub use user_work_status::Entity as UserWorkStatuses;
pub use user_work_status::Model as UserWorkStatus;
pub use work_requests::Entity as WorkRequests;
pub use work_requests::Model as WorkRequest;
