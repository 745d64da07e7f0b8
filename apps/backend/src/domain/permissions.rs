//! Role / business-unit access predicates.
//!
//! Every function is pure; services load the scopes and decide what to do
//! with a `false`.

use serde::Serialize;
use uuid::Uuid;

use crate::entities::enums::{BuCode, FinancialKind, Role};

/// The user a decision is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
    pub bu_code: Option<BuCode>,
}

impl Actor {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn in_bu(&self, bu: BuCode) -> bool {
        self.bu_code == Some(bu)
    }

    fn in_head(&self) -> bool {
        self.in_bu(BuCode::Head)
    }

    fn is_leader_of(&self, bu: BuCode) -> bool {
        self.role == Role::Leader && self.in_bu(bu)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectScope {
    pub bu_code: BuCode,
    pub pm_id: Option<Uuid>,
    /// User ids of internal participants.
    pub participants: Vec<Uuid>,
    pub created_by: Option<Uuid>,
}

impl ProjectScope {
    fn is_pm(&self, actor: &Actor) -> bool {
        self.pm_id == Some(actor.id)
    }

    fn is_participant(&self, actor: &Actor) -> bool {
        self.participants.contains(&actor.id)
    }

    fn is_pm_or_participant(&self, actor: &Actor) -> bool {
        self.is_pm(actor) || self.is_participant(actor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskScope {
    pub project_id: i64,
    pub bu_code: BuCode,
    pub assignee_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
}

impl TaskScope {
    fn is_assignee(&self, actor: &Actor) -> bool {
        self.assignee_id == Some(actor.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinanceScope {
    pub project_id: i64,
    pub bu_code: BuCode,
    pub created_by: Option<Uuid>,
    pub kind: FinancialKind,
}

impl FinanceScope {
    fn is_creator(&self, actor: &Actor) -> bool {
        self.created_by == Some(actor.id)
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

pub fn can_access_project(actor: &Actor, project: &ProjectScope) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Leader => actor.in_bu(project.bu_code) || project.is_pm_or_participant(actor),
        Role::Manager => {
            project.is_pm_or_participant(actor)
                || (project.pm_id.is_some() && actor.in_bu(project.bu_code))
        }
        Role::Member => project.is_pm_or_participant(actor),
        Role::Viewer | Role::Artist => false,
    }
}

/// Name, dates and status only; granted to anyone holding a task in it.
pub fn can_view_project_basic_info(
    actor: &Actor,
    project: &ProjectScope,
    has_assigned_tasks: bool,
) -> bool {
    can_access_project(actor, project) || has_assigned_tasks
}

pub fn can_create_project(actor: &Actor) -> bool {
    matches!(
        actor.role,
        Role::Admin | Role::Leader | Role::Manager | Role::Member
    )
}

pub fn can_edit_project(actor: &Actor, project: &ProjectScope) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Leader => actor.in_bu(project.bu_code) || project.is_pm(actor),
        Role::Manager => project.is_pm(actor),
        _ => false,
    }
}

pub fn can_delete_project(actor: &Actor, project: &ProjectScope) -> bool {
    can_edit_project(actor, project)
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

pub fn can_access_task(actor: &Actor, task: &TaskScope, project: &ProjectScope) -> bool {
    let granted = match actor.role {
        Role::Admin => true,
        Role::Leader => actor.in_bu(project.bu_code),
        Role::Manager | Role::Member => project.is_pm_or_participant(actor),
        Role::Viewer | Role::Artist => false,
    };
    granted || task.is_assignee(actor)
}

pub fn can_create_task(actor: &Actor, project: &ProjectScope) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Leader => actor.in_bu(project.bu_code),
        Role::Manager | Role::Member => project.is_pm_or_participant(actor),
        Role::Viewer | Role::Artist => false,
    }
}

pub fn can_edit_task(actor: &Actor, task: &TaskScope, project: &ProjectScope) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Leader => actor.in_bu(project.bu_code) || task.is_assignee(actor),
        Role::Manager => project.is_pm_or_participant(actor) || task.is_assignee(actor),
        Role::Member => project.is_pm(actor) || task.is_assignee(actor),
        Role::Viewer | Role::Artist => false,
    }
}

/// True when the actor may touch the task only through its status field.
pub fn can_only_update_task_status(
    actor: &Actor,
    task: &TaskScope,
    project: &ProjectScope,
) -> bool {
    let full_editor = match actor.role {
        Role::Admin => true,
        Role::Leader => actor.in_bu(project.bu_code),
        Role::Manager => project.is_pm(actor),
        _ => false,
    };
    !full_editor && task.is_assignee(actor)
}

pub fn can_delete_task(actor: &Actor, task: &TaskScope, project: &ProjectScope) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Leader => actor.in_bu(project.bu_code),
        Role::Manager | Role::Member => project.is_pm_or_participant(actor),
        Role::Viewer | Role::Artist => false,
    }
}

// ---------------------------------------------------------------------------
// Finance
// ---------------------------------------------------------------------------

pub fn can_access_finance(actor: &Actor, entry: &FinanceScope, project: &ProjectScope) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Leader => {
            actor.in_bu(entry.bu_code)
                || project.is_pm(actor)
                || (project.is_participant(actor) && entry.is_creator(actor))
        }
        Role::Manager => project.is_pm(actor) || entry.is_creator(actor),
        Role::Member => entry.is_creator(actor),
        Role::Viewer | Role::Artist => false,
    }
}

pub fn can_view_net_profit(actor: &Actor, project: &ProjectScope) -> bool {
    if actor.is_admin() || project.is_pm(actor) {
        return true;
    }
    actor.is_leader_of(project.bu_code)
}

pub fn can_create_finance(actor: &Actor, project: &ProjectScope) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Leader => actor.in_bu(project.bu_code) || project.is_pm(actor),
        Role::Manager => project.is_pm_or_participant(actor),
        Role::Member => project.is_participant(actor),
        Role::Viewer | Role::Artist => false,
    }
}

pub fn can_edit_finance(actor: &Actor, entry: &FinanceScope, project: &ProjectScope) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Leader => actor.in_bu(entry.bu_code) || entry.is_creator(actor),
        Role::Manager => project.is_pm(actor) || entry.is_creator(actor),
        Role::Member => entry.is_creator(actor),
        Role::Viewer | Role::Artist => false,
    }
}

pub fn can_delete_finance(actor: &Actor, entry: &FinanceScope) -> bool {
    match actor.role {
        Role::Admin => true,
        Role::Leader => actor.in_bu(entry.bu_code),
        Role::Manager => entry.is_creator(actor),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Attendance
// ---------------------------------------------------------------------------

pub fn is_head_leader(actor: &Actor) -> bool {
    actor.is_leader_of(BuCode::Head)
}

pub fn can_access_attendance(actor: &Actor, target_id: Uuid, target_bu: Option<BuCode>) -> bool {
    actor.is_admin()
        || actor.id == target_id
        || target_bu.is_some_and(|bu| actor.is_leader_of(bu))
}

pub fn can_edit_attendance(actor: &Actor, target_bu: Option<BuCode>) -> bool {
    actor.is_admin() || target_bu.is_some_and(|bu| actor.is_leader_of(bu))
}

pub fn can_view_all_attendance(actor: &Actor) -> bool {
    actor.is_admin() || is_head_leader(actor)
}

pub fn can_view_team_attendance(actor: &Actor, target_bu: Option<BuCode>) -> bool {
    let Some(bu) = target_bu else {
        return false;
    };
    can_view_all_attendance(actor) || actor.is_leader_of(bu)
}

pub fn can_approve_request(actor: &Actor, requester_bu: Option<BuCode>) -> bool {
    can_view_team_attendance(actor, requester_bu)
}

pub fn can_modify_attendance(actor: &Actor) -> bool {
    can_view_all_attendance(actor)
}

pub fn can_access_attendance_log(
    actor: &Actor,
    owner_id: Uuid,
    owner_bu: Option<BuCode>,
) -> bool {
    actor.id == owner_id
        || can_view_all_attendance(actor)
        || owner_bu.is_some_and(|bu| actor.is_leader_of(bu))
}

// ---------------------------------------------------------------------------
// Leave
// ---------------------------------------------------------------------------

pub fn can_approve_leave_request(actor: &Actor, requester_bu: Option<BuCode>) -> bool {
    actor.is_admin() || requester_bu.is_some_and(|bu| actor.is_leader_of(bu))
}

fn is_head_admin(actor: &Actor) -> bool {
    actor.is_admin() && actor.in_head()
}

pub fn can_approve_compensatory_request(actor: &Actor) -> bool {
    is_head_admin(actor)
}

pub fn can_grant_special_leave(actor: &Actor) -> bool {
    is_head_admin(actor)
}

pub fn can_adjust_annual_leave(actor: &Actor) -> bool {
    is_head_admin(actor)
}

pub fn can_access_leave_admin(actor: &Actor) -> bool {
    matches!(actor.role, Role::Admin | Role::Leader)
}

// ---------------------------------------------------------------------------
// Settlement, artists, manuals, statistics
// ---------------------------------------------------------------------------

pub fn can_access_settlement(actor: &Actor) -> bool {
    matches!(actor.role, Role::Admin | Role::Leader) && actor.in_head()
}

pub fn can_access_artist_page(actor: &Actor) -> bool {
    actor.role == Role::Artist || can_access_settlement(actor)
}

pub fn should_redirect_artist_to_artist_page(actor: &Actor) -> bool {
    actor.role == Role::Artist
}

fn in_artist_bu(actor: &Actor) -> bool {
    matches!(actor.bu_code, Some(BuCode::Grigo | BuCode::Head))
}

pub fn can_access_exclusive_artists(actor: &Actor) -> bool {
    in_artist_bu(actor) && matches!(actor.role, Role::Admin | Role::Leader | Role::Manager)
}

pub fn can_edit_exclusive_artist(actor: &Actor) -> bool {
    in_artist_bu(actor) && matches!(actor.role, Role::Admin | Role::Leader)
}

pub fn can_view_manual(_actor: &Actor) -> bool {
    true
}

pub fn can_create_manual(actor: &Actor, bu: BuCode) -> bool {
    actor.is_admin() || (matches!(actor.role, Role::Leader | Role::Manager) && actor.in_bu(bu))
}

pub fn can_edit_manual(actor: &Actor, bu: BuCode) -> bool {
    can_create_manual(actor, bu)
}

pub fn can_delete_manual(actor: &Actor, bu: BuCode) -> bool {
    can_create_manual(actor, bu)
}

pub fn can_view_task_template(actor: &Actor) -> bool {
    can_view_manual(actor)
}

pub fn can_create_task_template(actor: &Actor, bu: BuCode) -> bool {
    can_create_manual(actor, bu)
}

pub fn can_edit_task_template(actor: &Actor, bu: BuCode) -> bool {
    can_edit_manual(actor, bu)
}

pub fn can_delete_task_template(actor: &Actor, bu: BuCode) -> bool {
    can_delete_manual(actor, bu)
}

pub fn can_view_all_bu_stats(actor: &Actor) -> bool {
    actor.is_admin()
}

pub fn can_view_bu_stats(actor: &Actor, bu: BuCode) -> bool {
    actor.is_admin() || actor.is_leader_of(bu)
}

/// Sidebar menu keys in display order.
pub fn visible_menus(actor: &Actor) -> Vec<&'static str> {
    let admin_or_leader = matches!(actor.role, Role::Admin | Role::Leader);
    let mut menus = vec!["dashboard", "tasks", "workLog", "attendance", "leave"];

    if can_create_project(actor) {
        menus.push("projects");
    }
    if can_access_settlement(actor) {
        menus.push("settlement");
    }
    menus.push("manuals");
    if matches!(actor.role, Role::Admin | Role::Leader | Role::Manager) {
        menus.push("taskTemplates");
    }
    if admin_or_leader {
        menus.push("organization");
    }
    if matches!(actor.role, Role::Admin | Role::Leader | Role::Manager) {
        menus.push("partners");
    }
    if can_access_exclusive_artists(actor) {
        menus.push("exclusiveArtists");
    }
    if actor.role != Role::Artist {
        menus.extend(["meetingRooms", "equipment", "vehicles"]);
    }
    menus.push("bugReports");
    if admin_or_leader {
        menus.extend(["attendanceAdmin", "leaveAdmin"]);
    }
    if actor.is_admin() {
        menus.extend(["workLogAdmin", "pushTest"]);
    }
    menus
}

// ---------------------------------------------------------------------------
// Bundles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProjectPermissions {
    pub can_access: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_create_task: bool,
    pub can_create_finance: bool,
    pub can_view_net_profit: bool,
}

pub fn project_permissions(actor: &Actor, project: &ProjectScope) -> ProjectPermissions {
    ProjectPermissions {
        can_access: can_access_project(actor, project),
        can_edit: can_edit_project(actor, project),
        can_delete: can_delete_project(actor, project),
        can_create_task: can_create_task(actor, project),
        can_create_finance: can_create_finance(actor, project),
        can_view_net_profit: can_view_net_profit(actor, project),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskPermissions {
    pub can_access: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_only_update_status: bool,
}

pub fn task_permissions(actor: &Actor, task: &TaskScope, project: &ProjectScope) -> TaskPermissions {
    TaskPermissions {
        can_access: can_access_task(actor, task, project),
        can_edit: can_edit_task(actor, task, project),
        can_delete: can_delete_task(actor, task, project),
        can_only_update_status: can_only_update_task_status(actor, task, project),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinancePermissions {
    pub can_access: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

pub fn finance_permissions(
    actor: &Actor,
    entry: &FinanceScope,
    project: &ProjectScope,
) -> FinancePermissions {
    FinancePermissions {
        can_access: can_access_finance(actor, entry, project),
        can_edit: can_edit_finance(actor, entry, project),
        can_delete: can_delete_finance(actor, entry),
    }
}
