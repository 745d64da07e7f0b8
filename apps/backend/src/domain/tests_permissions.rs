//! Truth tables for the role / BU predicates.

use uuid::Uuid;

use super::permissions::*;
use super::test_fixtures::{
    actor, entry, project, project_with_participant, project_with_pm, task, ALL_ROLES,
};
use crate::entities::enums::{BuCode, Role};

#[test]
fn admin_can_do_everything_on_projects() {
    let a = actor(Role::Admin, None);
    let p = project(BuCode::Flow);
    assert!(can_access_project(&a, &p));
    assert!(can_edit_project(&a, &p));
    assert!(can_delete_project(&a, &p));
    assert!(can_create_task(&a, &p));
    assert!(can_create_finance(&a, &p));
    assert!(can_view_net_profit(&a, &p));
}

#[test]
fn project_access_by_role() {
    let bu = BuCode::React;
    let other = BuCode::Flow;

    let leader = actor(Role::Leader, Some(bu));
    assert!(can_access_project(&leader, &project(bu)));
    assert!(!can_access_project(&leader, &project(other)));
    assert!(can_access_project(&leader, &project_with_pm(other, leader.id)));
    assert!(can_access_project(
        &leader,
        &project_with_participant(other, leader.id)
    ));

    let manager = actor(Role::Manager, Some(bu));
    assert!(!can_access_project(&manager, &project(bu)), "no PM set");
    assert!(can_access_project(&manager, &project_with_pm(bu, Uuid::new_v4())));
    assert!(!can_access_project(&manager, &project_with_pm(other, Uuid::new_v4())));
    assert!(can_access_project(&manager, &project_with_participant(other, manager.id)));

    let member = actor(Role::Member, Some(bu));
    assert!(!can_access_project(&member, &project_with_pm(bu, Uuid::new_v4())));
    assert!(can_access_project(&member, &project_with_pm(bu, member.id)));
    assert!(can_access_project(&member, &project_with_participant(bu, member.id)));

    for role in [Role::Viewer, Role::Artist] {
        let a = actor(role, Some(bu));
        assert!(!can_access_project(&a, &project_with_participant(bu, a.id)));
    }
}

#[test]
fn basic_info_visible_through_assigned_tasks() {
    let viewer = actor(Role::Viewer, Some(BuCode::Grigo));
    let p = project(BuCode::Grigo);
    assert!(!can_view_project_basic_info(&viewer, &p, false));
    assert!(can_view_project_basic_info(&viewer, &p, true));
}

#[test]
fn project_create_edit_delete() {
    for role in ALL_ROLES {
        let expected = !matches!(role, Role::Viewer | Role::Artist);
        assert_eq!(can_create_project(&actor(role, None)), expected, "{role:?}");
    }

    let leader = actor(Role::Leader, Some(BuCode::Ast));
    assert!(can_edit_project(&leader, &project(BuCode::Ast)));
    assert!(!can_edit_project(&leader, &project(BuCode::Modoo)));
    assert!(can_delete_project(&leader, &project_with_pm(BuCode::Modoo, leader.id)));

    let manager = actor(Role::Manager, Some(BuCode::Ast));
    assert!(!can_edit_project(&manager, &project(BuCode::Ast)));
    assert!(can_edit_project(&manager, &project_with_pm(BuCode::Ast, manager.id)));
    assert!(!can_edit_project(
        &manager,
        &project_with_participant(BuCode::Ast, manager.id)
    ));

    let member = actor(Role::Member, Some(BuCode::Ast));
    assert!(!can_edit_project(&member, &project_with_pm(BuCode::Ast, member.id)));
}

#[test]
fn task_access_falls_back_to_assignee() {
    for role in ALL_ROLES {
        let a = actor(role, Some(BuCode::Flow));
        let t = task(BuCode::Grigo, Some(a.id));
        assert!(can_access_task(&a, &t, &project(BuCode::Grigo)), "{role:?}");
    }

    let leader = actor(Role::Leader, Some(BuCode::Flow));
    assert!(can_access_task(&leader, &task(BuCode::Flow, None), &project(BuCode::Flow)));
    assert!(!can_access_task(&leader, &task(BuCode::Grigo, None), &project(BuCode::Grigo)));

    let member = actor(Role::Member, Some(BuCode::Flow));
    let p = project_with_participant(BuCode::Flow, member.id);
    assert!(can_access_task(&member, &task(BuCode::Flow, None), &p));
    assert!(!can_access_task(&member, &task(BuCode::Flow, None), &project(BuCode::Flow)));
}

#[test]
fn leader_rights_follow_the_project_bu_not_the_task_bu() {
    let grigo_project = project(BuCode::Grigo);
    let flow_tagged = task(BuCode::Flow, None);

    let flow_leader = actor(Role::Leader, Some(BuCode::Flow));
    assert!(!can_access_task(&flow_leader, &flow_tagged, &grigo_project));
    assert!(!can_edit_task(&flow_leader, &flow_tagged, &grigo_project));
    assert!(!can_delete_task(&flow_leader, &flow_tagged, &grigo_project));

    let grigo_leader = actor(Role::Leader, Some(BuCode::Grigo));
    assert!(can_access_task(&grigo_leader, &flow_tagged, &grigo_project));
    assert!(can_edit_task(&grigo_leader, &flow_tagged, &grigo_project));
    assert!(can_delete_task(&grigo_leader, &flow_tagged, &grigo_project));

    let assigned_to_flow_leader = task(BuCode::Flow, Some(flow_leader.id));
    assert!(can_access_task(&flow_leader, &assigned_to_flow_leader, &grigo_project));
    assert!(can_only_update_task_status(
        &flow_leader,
        &assigned_to_flow_leader,
        &grigo_project
    ));
    assert!(!can_only_update_task_status(
        &grigo_leader,
        &task(BuCode::Flow, Some(grigo_leader.id)),
        &grigo_project
    ));
}

#[test]
fn task_create_and_delete() {
    let leader = actor(Role::Leader, Some(BuCode::Head));
    assert!(can_create_task(&leader, &project(BuCode::Head)));
    assert!(!can_create_task(&leader, &project(BuCode::Grigo)));

    let member = actor(Role::Member, Some(BuCode::Head));
    assert!(can_create_task(&member, &project_with_pm(BuCode::Grigo, member.id)));
    assert!(!can_create_task(&member, &project(BuCode::Head)));

    let t = task(BuCode::Head, Some(member.id));
    assert!(!can_delete_task(&member, &t, &project(BuCode::Head)), "assignee alone");
    assert!(can_delete_task(&member, &t, &project_with_participant(BuCode::Head, member.id)));

    let viewer = actor(Role::Viewer, Some(BuCode::Head));
    assert!(!can_create_task(&viewer, &project_with_pm(BuCode::Head, viewer.id)));
}

#[test]
fn task_edit_matrix() {
    let bu = BuCode::Modoo;
    let manager = actor(Role::Manager, Some(bu));
    assert!(can_edit_task(&manager, &task(bu, None), &project_with_participant(bu, manager.id)));
    assert!(can_edit_task(&manager, &task(bu, Some(manager.id)), &project(bu)));
    assert!(!can_edit_task(&manager, &task(bu, None), &project(bu)));

    let member = actor(Role::Member, Some(bu));
    assert!(can_edit_task(&member, &task(bu, None), &project_with_pm(bu, member.id)));
    assert!(
        !can_edit_task(&member, &task(bu, None), &project_with_participant(bu, member.id)),
        "participation does not let members edit"
    );

    let viewer = actor(Role::Viewer, Some(bu));
    assert!(!can_edit_task(&viewer, &task(bu, Some(viewer.id)), &project(bu)));
}

#[test]
fn status_only_applies_to_plain_assignees() {
    let bu = BuCode::Grigo;

    let admin = actor(Role::Admin, None);
    assert!(!can_only_update_task_status(&admin, &task(bu, Some(admin.id)), &project(bu)));

    let leader = actor(Role::Leader, Some(bu));
    assert!(!can_only_update_task_status(&leader, &task(bu, Some(leader.id)), &project(bu)));
    let foreign = task(BuCode::React, Some(leader.id));
    assert!(can_only_update_task_status(&leader, &foreign, &project(BuCode::React)));

    let manager = actor(Role::Manager, Some(bu));
    let t = task(bu, Some(manager.id));
    assert!(!can_only_update_task_status(&manager, &t, &project_with_pm(bu, manager.id)));
    assert!(can_only_update_task_status(&manager, &t, &project(bu)));

    let member = actor(Role::Member, Some(bu));
    assert!(can_only_update_task_status(&member, &task(bu, Some(member.id)), &project(bu)));
    assert!(!can_only_update_task_status(&member, &task(bu, None), &project(bu)));
}

#[test]
fn finance_matrix() {
    let bu = BuCode::Flow;
    let other = BuCode::Ast;

    let leader = actor(Role::Leader, Some(bu));
    assert!(can_access_finance(&leader, &entry(bu, None), &project(bu)));
    assert!(!can_access_finance(&leader, &entry(other, None), &project(other)));
    assert!(can_access_finance(&leader, &entry(other, None), &project_with_pm(other, leader.id)));
    assert!(!can_access_finance(
        &leader,
        &entry(other, None),
        &project_with_participant(other, leader.id)
    ));
    assert!(can_access_finance(
        &leader,
        &entry(other, Some(leader.id)),
        &project_with_participant(other, leader.id)
    ));

    let manager = actor(Role::Manager, Some(bu));
    assert!(can_access_finance(&manager, &entry(bu, Some(manager.id)), &project(bu)));
    assert!(!can_access_finance(&manager, &entry(bu, None), &project(bu)));
    assert!(can_create_finance(&manager, &project_with_participant(bu, manager.id)));
    assert!(can_delete_finance(&manager, &entry(bu, Some(manager.id))));
    assert!(!can_delete_finance(&manager, &entry(bu, None)));

    let member = actor(Role::Member, Some(bu));
    assert!(can_create_finance(&member, &project_with_participant(bu, member.id)));
    assert!(!can_create_finance(&member, &project_with_pm(bu, member.id)));
    assert!(can_edit_finance(&member, &entry(bu, Some(member.id)), &project(bu)));
    assert!(!can_delete_finance(&member, &entry(bu, Some(member.id))));

    assert!(can_view_net_profit(&member, &project_with_pm(bu, member.id)));
    assert!(!can_view_net_profit(&manager, &project(bu)));
    assert!(can_view_net_profit(&leader, &project(bu)));
}

#[test]
fn attendance_predicates() {
    let head_leader = actor(Role::Leader, Some(BuCode::Head));
    let grigo_leader = actor(Role::Leader, Some(BuCode::Grigo));
    let member = actor(Role::Member, Some(BuCode::Grigo));
    let admin = actor(Role::Admin, None);

    assert!(is_head_leader(&head_leader));
    assert!(!is_head_leader(&grigo_leader));

    assert!(can_view_all_attendance(&admin));
    assert!(can_view_all_attendance(&head_leader));
    assert!(!can_view_all_attendance(&grigo_leader));

    assert!(!can_view_team_attendance(&admin, None));
    assert!(can_view_team_attendance(&head_leader, Some(BuCode::Flow)));
    assert!(can_view_team_attendance(&grigo_leader, Some(BuCode::Grigo)));
    assert!(!can_view_team_attendance(&grigo_leader, Some(BuCode::Flow)));
    assert!(!can_view_team_attendance(&member, Some(BuCode::Grigo)));

    assert!(can_approve_request(&grigo_leader, Some(BuCode::Grigo)));
    assert!(!can_approve_request(&grigo_leader, None));

    assert!(can_modify_attendance(&head_leader));
    assert!(!can_modify_attendance(&grigo_leader));

    assert!(can_access_attendance(&member, member.id, Some(BuCode::Grigo)));
    assert!(can_access_attendance(&grigo_leader, member.id, Some(BuCode::Grigo)));
    assert!(!can_access_attendance(&head_leader, member.id, Some(BuCode::Grigo)));
    assert!(can_edit_attendance(&grigo_leader, Some(BuCode::Grigo)));
    assert!(!can_edit_attendance(&member, Some(BuCode::Grigo)));

    assert!(can_access_attendance_log(&member, member.id, Some(BuCode::Grigo)));
    assert!(can_access_attendance_log(&head_leader, member.id, Some(BuCode::Grigo)));
    assert!(can_access_attendance_log(&grigo_leader, member.id, Some(BuCode::Grigo)));
    assert!(!can_access_attendance_log(
        &actor(Role::Leader, Some(BuCode::Flow)),
        member.id,
        Some(BuCode::Grigo)
    ));
}

#[test]
fn leave_predicates_require_head_admin() {
    let head_admin = actor(Role::Admin, Some(BuCode::Head));
    let grigo_admin = actor(Role::Admin, Some(BuCode::Grigo));
    let head_leader = actor(Role::Leader, Some(BuCode::Head));

    for check in [
        can_approve_compensatory_request,
        can_grant_special_leave,
        can_adjust_annual_leave,
    ] {
        assert!(check(&head_admin));
        assert!(!check(&grigo_admin));
        assert!(!check(&head_leader));
    }

    assert!(can_approve_leave_request(&grigo_admin, None));
    assert!(can_approve_leave_request(&head_leader, Some(BuCode::Head)));
    assert!(!can_approve_leave_request(&head_leader, Some(BuCode::Flow)));

    assert!(can_access_leave_admin(&head_leader));
    assert!(!can_access_leave_admin(&actor(Role::Manager, Some(BuCode::Head))));
}

#[test]
fn settlement_and_artist_pages() {
    let artist = actor(Role::Artist, Some(BuCode::Grigo));
    assert!(can_access_artist_page(&artist));
    assert!(should_redirect_artist_to_artist_page(&artist));
    assert!(!can_access_settlement(&artist));

    let head_leader = actor(Role::Leader, Some(BuCode::Head));
    assert!(can_access_settlement(&head_leader));
    assert!(can_access_artist_page(&head_leader));
    assert!(!can_access_settlement(&actor(Role::Admin, Some(BuCode::Flow))));
    assert!(!can_access_settlement(&actor(Role::Admin, None)));
}

#[test]
fn exclusive_artists_need_grigo_or_head() {
    assert!(can_access_exclusive_artists(&actor(Role::Manager, Some(BuCode::Grigo))));
    assert!(!can_edit_exclusive_artist(&actor(Role::Manager, Some(BuCode::Grigo))));
    assert!(can_edit_exclusive_artist(&actor(Role::Leader, Some(BuCode::Head))));
    assert!(!can_access_exclusive_artists(&actor(Role::Admin, Some(BuCode::Flow))));
    assert!(!can_access_exclusive_artists(&actor(Role::Admin, None)));
    assert!(!can_access_exclusive_artists(&actor(Role::Member, Some(BuCode::Grigo))));
}

#[test]
fn manuals_templates_and_stats() {
    let manager = actor(Role::Manager, Some(BuCode::React));
    assert!(can_view_manual(&manager));
    assert!(can_create_manual(&manager, BuCode::React));
    assert!(!can_create_manual(&manager, BuCode::Flow));
    assert!(can_delete_task_template(&manager, BuCode::React));
    assert!(!can_create_manual(&actor(Role::Member, Some(BuCode::React)), BuCode::React));
    assert!(can_edit_manual(&actor(Role::Admin, None), BuCode::Flow));

    assert!(can_view_all_bu_stats(&actor(Role::Admin, None)));
    assert!(!can_view_all_bu_stats(&actor(Role::Leader, Some(BuCode::Head))));
    assert!(can_view_bu_stats(&actor(Role::Leader, Some(BuCode::Flow)), BuCode::Flow));
    assert!(!can_view_bu_stats(&manager, BuCode::React));
}

#[test]
fn menus_for_admin_in_head() {
    let menus = visible_menus(&actor(Role::Admin, Some(BuCode::Head)));
    assert_eq!(
        menus,
        vec![
            "dashboard",
            "tasks",
            "workLog",
            "attendance",
            "leave",
            "projects",
            "settlement",
            "manuals",
            "taskTemplates",
            "organization",
            "partners",
            "exclusiveArtists",
            "meetingRooms",
            "equipment",
            "vehicles",
            "bugReports",
            "attendanceAdmin",
            "leaveAdmin",
            "workLogAdmin",
            "pushTest",
        ]
    );
}

#[test]
fn menus_for_artist_and_member() {
    let artist = visible_menus(&actor(Role::Artist, Some(BuCode::Grigo)));
    assert_eq!(
        artist,
        vec!["dashboard", "tasks", "workLog", "attendance", "leave", "manuals", "bugReports"]
    );

    let member = visible_menus(&actor(Role::Member, Some(BuCode::Flow)));
    assert!(member.contains(&"projects"));
    assert!(member.contains(&"vehicles"));
    assert!(!member.contains(&"partners"));
    assert!(!member.contains(&"leaveAdmin"));
}

#[test]
fn bundles_agree_with_predicates() {
    let manager = actor(Role::Manager, Some(BuCode::Grigo));
    let p = project_with_pm(BuCode::Grigo, manager.id);
    let bundle = project_permissions(&manager, &p);
    assert_eq!(
        bundle,
        ProjectPermissions {
            can_access: true,
            can_edit: true,
            can_delete: true,
            can_create_task: true,
            can_create_finance: true,
            can_view_net_profit: true,
        }
    );

    let t = task(BuCode::Grigo, Some(manager.id));
    let tb = task_permissions(&manager, &t, &p);
    assert!(tb.can_access && tb.can_edit && tb.can_delete);
    assert!(!tb.can_only_update_status);

    let fb = finance_permissions(&manager, &entry(BuCode::Grigo, None), &p);
    assert_eq!(
        fb,
        FinancePermissions {
            can_access: true,
            can_edit: true,
            can_delete: false,
        }
    );
}
