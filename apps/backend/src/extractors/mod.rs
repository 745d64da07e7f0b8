pub mod cron_auth;
pub mod current_user;
pub mod validated_json;

pub use cron_auth::CronAuth;
pub use current_user::CurrentUser;
pub use validated_json::ValidatedJson;
