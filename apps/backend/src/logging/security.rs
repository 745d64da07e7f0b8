//! Security audit events. Field names are stable so alerts can key on them.

use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

pub fn login_failed(reason: &str, email: Option<&str>) {
    let trace_id = trace_ctx::trace_id();
    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        email = %Redacted(email.unwrap_or("")),
        reason,
        "Authentication failure"
    );
}

pub fn rate_limit_hit(endpoint: &str) {
    let trace_id = trace_ctx::trace_id();
    warn!(
        event = "SECURITY_RATE_LIMIT_HIT",
        %trace_id,
        endpoint,
        "Rate limit exceeded"
    );
}

/// Cron endpoint reached without the shared secret.
pub fn cron_rejected(endpoint: &str) {
    let trace_id = trace_ctx::trace_id();
    warn!(
        event = "SECURITY_CRON_REJECTED",
        %trace_id,
        endpoint,
        "Cron call without valid secret"
    );
}

/// Permission predicate said no. Logged at debug volume through `warn` only
/// for admin-only surfaces.
pub fn admin_action_denied(action: &str, user_id: &str) {
    let trace_id = trace_ctx::trace_id();
    warn!(
        event = "SECURITY_ADMIN_DENIED",
        %trace_id,
        action,
        user_id = %Redacted(user_id),
        "Admin-only action denied"
    );
}
