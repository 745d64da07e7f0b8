//! Read/create/update/delete decision for financial entries, with the Korean
//! reason shown to the user when something is denied.

use serde::Serialize;
use uuid::Uuid;

use super::permissions::Actor;
use crate::entities::enums::{BuCode, Role};
use crate::entities::projects::Participant;

pub const REASON_LOGIN_REQUIRED: &str = "로그인이 필요합니다.";
pub const REASON_VIEWER: &str = "재무 정보 열람 권한이 없습니다.";
pub const REASON_OTHER_BU: &str = "해당 사업부의 재무 정보에 접근할 수 없습니다.";
pub const REASON_PM_NOT_CREATOR: &str = "본인이 등록한 항목만 수정/삭제할 수 있습니다.";
pub const REASON_NOT_CREATOR: &str = "본인이 등록한 항목만 열람/수정/삭제할 수 있습니다.";
pub const REASON_ARTIST: &str = "재무 정보 접근 권한이 없습니다.";
pub const REASON_UNKNOWN_ROLE: &str = "권한을 확인할 수 없습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryRef {
    pub bu_code: BuCode,
    pub created_by: Option<Uuid>,
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectRef<'a> {
    pub pm_id: Option<Uuid>,
    pub participants: &'a [Participant],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinancePermission {
    pub can_read: bool,
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl FinancePermission {
    fn all() -> Self {
        Self {
            can_read: true,
            can_create: true,
            can_update: true,
            can_delete: true,
            reason: None,
        }
    }

    fn none(reason: &'static str) -> Self {
        Self {
            can_read: false,
            can_create: false,
            can_update: false,
            can_delete: false,
            reason: Some(reason),
        }
    }
}

/// HEAD sees every BU; everyone else only their own.
fn can_access_bu(user_bu: Option<BuCode>, target: BuCode) -> bool {
    match user_bu {
        None => false,
        Some(BuCode::Head) => true,
        Some(bu) => bu == target,
    }
}

pub fn is_project_pm(user_id: Uuid, project: Option<&ProjectRef<'_>>) -> bool {
    let Some(project) = project else {
        return false;
    };
    project.pm_id == Some(user_id)
        || project
            .participants
            .iter()
            .any(|p| p.user_id == Some(user_id) && p.is_pm)
}

fn is_project_participant(user_id: Uuid, project: Option<&ProjectRef<'_>>) -> bool {
    project.is_some_and(|p| p.participants.iter().any(|x| x.user_id == Some(user_id)))
}

pub fn check_finance_permission(
    user: Option<&Actor>,
    entry: Option<&EntryRef>,
    project: Option<&ProjectRef<'_>>,
    target_bu: Option<BuCode>,
) -> FinancePermission {
    let Some(user) = user else {
        return FinancePermission::none(REASON_LOGIN_REQUIRED);
    };

    match user.role {
        Role::Viewer => return FinancePermission::none(REASON_VIEWER),
        Role::Admin => return FinancePermission::all(),
        _ => {}
    }

    let effective_bu = entry.map(|e| e.bu_code).or(target_bu);
    if let Some(bu) = effective_bu {
        if !can_access_bu(user.bu_code, bu) {
            return FinancePermission::none(REASON_OTHER_BU);
        }
    }

    match user.role {
        Role::Manager => FinancePermission::all(),
        Role::Member => member_permission(user.id, entry, project),
        Role::Artist => FinancePermission::none(REASON_ARTIST),
        _ => FinancePermission::none(REASON_UNKNOWN_ROLE),
    }
}

fn member_permission(
    user_id: Uuid,
    entry: Option<&EntryRef>,
    project: Option<&ProjectRef<'_>>,
) -> FinancePermission {
    let is_pm = is_project_pm(user_id, project);
    let is_participant = is_project_participant(user_id, project);

    let Some(entry) = entry else {
        return FinancePermission {
            can_read: is_pm || is_participant,
            can_create: true,
            can_update: false,
            can_delete: false,
            reason: None,
        };
    };

    let is_creator = entry.created_by == Some(user_id);
    if is_pm {
        return FinancePermission {
            can_read: true,
            can_create: true,
            can_update: is_creator,
            can_delete: is_creator,
            reason: (!is_creator).then_some(REASON_PM_NOT_CREATOR),
        };
    }

    FinancePermission {
        can_read: is_creator || is_participant,
        can_create: true,
        can_update: is_creator,
        can_delete: is_creator,
        reason: (!is_creator).then_some(REASON_NOT_CREATOR),
    }
}

/// List filtering by BU.
pub fn can_view_finance_for_bu(user: Option<&Actor>, target_bu: BuCode) -> bool {
    let Some(user) = user else {
        return false;
    };
    match user.role {
        Role::Viewer | Role::Artist => false,
        Role::Admin => true,
        _ => can_access_bu(user.bu_code, target_bu),
    }
}

pub fn can_delete_entry(
    user: Option<&Actor>,
    entry: &EntryRef,
    project: Option<&ProjectRef<'_>>,
) -> (bool, Option<&'static str>) {
    let p = check_finance_permission(user, Some(entry), project, Some(entry.bu_code));
    (p.can_delete, p.reason)
}
