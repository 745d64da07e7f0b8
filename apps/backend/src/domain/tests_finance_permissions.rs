use uuid::Uuid;

use super::finance_permissions::*;
use super::test_fixtures::actor;
use crate::entities::enums::{BuCode, Role};
use crate::entities::projects::Participant;

fn participant(user_id: Uuid, is_pm: bool) -> Participant {
    Participant {
        user_id: Some(user_id),
        external_worker_id: None,
        role: "participant".into(),
        is_pm,
    }
}

fn entry_by(bu: BuCode, created_by: Option<Uuid>) -> EntryRef {
    EntryRef { bu_code: bu, created_by }
}

#[test]
fn anonymous_and_viewer_are_denied() {
    let p = check_finance_permission(None, None, None, None);
    assert!(!p.can_read && !p.can_create);
    assert_eq!(p.reason, Some(REASON_LOGIN_REQUIRED));

    let viewer = actor(Role::Viewer, Some(BuCode::Head));
    let p = check_finance_permission(Some(&viewer), None, None, None);
    assert_eq!(p.reason, Some(REASON_VIEWER));
}

#[test]
fn admin_gets_everything_regardless_of_bu() {
    let admin = actor(Role::Admin, Some(BuCode::Flow));
    let e = entry_by(BuCode::Grigo, None);
    let p = check_finance_permission(Some(&admin), Some(&e), None, None);
    assert!(p.can_read && p.can_create && p.can_update && p.can_delete);
    assert_eq!(p.reason, None);
}

#[test]
fn foreign_bu_is_rejected_unless_head() {
    let manager = actor(Role::Manager, Some(BuCode::Flow));
    let e = entry_by(BuCode::Grigo, None);
    let p = check_finance_permission(Some(&manager), Some(&e), None, None);
    assert_eq!(p.reason, Some(REASON_OTHER_BU));

    let target_only = check_finance_permission(Some(&manager), None, None, Some(BuCode::React));
    assert_eq!(target_only.reason, Some(REASON_OTHER_BU));

    let head_manager = actor(Role::Manager, Some(BuCode::Head));
    let p = check_finance_permission(Some(&head_manager), Some(&e), None, None);
    assert!(p.can_delete);

    let no_bu = actor(Role::Manager, None);
    let p = check_finance_permission(Some(&no_bu), Some(&e), None, None);
    assert_eq!(p.reason, Some(REASON_OTHER_BU));
}

#[test]
fn entry_bu_wins_over_target_bu() {
    let manager = actor(Role::Manager, Some(BuCode::Flow));
    let e = entry_by(BuCode::Flow, None);
    let p = check_finance_permission(Some(&manager), Some(&e), None, Some(BuCode::Grigo));
    assert_eq!(p, check_finance_permission(Some(&manager), Some(&e), None, None));
    assert!(p.can_update);
}

#[test]
fn leader_and_artist_have_no_finance_rule() {
    let leader = actor(Role::Leader, Some(BuCode::Flow));
    let p = check_finance_permission(Some(&leader), None, None, Some(BuCode::Flow));
    assert_eq!(p.reason, Some(REASON_UNKNOWN_ROLE));
    assert!(!p.can_read);

    let artist = actor(Role::Artist, Some(BuCode::Grigo));
    let p = check_finance_permission(Some(&artist), None, None, Some(BuCode::Grigo));
    assert_eq!(p.reason, Some(REASON_ARTIST));
}

#[test]
fn member_without_entry_can_create() {
    let member = actor(Role::Member, Some(BuCode::React));
    let p = check_finance_permission(Some(&member), None, None, Some(BuCode::React));
    assert!(p.can_create);
    assert!(!p.can_read && !p.can_update && !p.can_delete);

    let parts = [participant(member.id, false)];
    let project = ProjectRef { pm_id: None, participants: &parts };
    let p = check_finance_permission(Some(&member), None, Some(&project), Some(BuCode::React));
    assert!(p.can_read);
}

#[test]
fn member_pm_reads_all_but_edits_own() {
    let member = actor(Role::Member, Some(BuCode::React));
    let project = ProjectRef { pm_id: Some(member.id), participants: &[] };

    let theirs = entry_by(BuCode::React, Some(Uuid::new_v4()));
    let p = check_finance_permission(Some(&member), Some(&theirs), Some(&project), None);
    assert!(p.can_read && !p.can_update && !p.can_delete);
    assert_eq!(p.reason, Some(REASON_PM_NOT_CREATOR));

    let own = entry_by(BuCode::React, Some(member.id));
    let p = check_finance_permission(Some(&member), Some(&own), Some(&project), None);
    assert!(p.can_update && p.can_delete);
    assert_eq!(p.reason, None);
}

#[test]
fn participant_flagged_pm_counts_as_pm() {
    let member = actor(Role::Member, Some(BuCode::Ast));
    let parts = [participant(member.id, true)];
    let project = ProjectRef { pm_id: None, participants: &parts };
    assert!(is_project_pm(member.id, Some(&project)));
    assert!(!is_project_pm(Uuid::new_v4(), Some(&project)));
    assert!(!is_project_pm(member.id, None));
}

#[test]
fn plain_member_only_sees_own_entries() {
    let member = actor(Role::Member, Some(BuCode::Ast));
    let other = entry_by(BuCode::Ast, Some(Uuid::new_v4()));
    let p = check_finance_permission(Some(&member), Some(&other), None, None);
    assert!(!p.can_read);
    assert_eq!(p.reason, Some(REASON_NOT_CREATOR));

    let (ok, reason) = can_delete_entry(Some(&member), &other, None);
    assert!(!ok);
    assert_eq!(reason, Some(REASON_NOT_CREATOR));

    let own = entry_by(BuCode::Ast, Some(member.id));
    assert_eq!(can_delete_entry(Some(&member), &own, None), (true, None));
}

#[test]
fn bu_list_visibility() {
    assert!(!can_view_finance_for_bu(None, BuCode::Flow));
    assert!(can_view_finance_for_bu(Some(&actor(Role::Admin, None)), BuCode::Flow));
    assert!(can_view_finance_for_bu(
        Some(&actor(Role::Leader, Some(BuCode::Head))),
        BuCode::Flow
    ));
    assert!(!can_view_finance_for_bu(
        Some(&actor(Role::Member, Some(BuCode::Grigo))),
        BuCode::Flow
    ));
    assert!(!can_view_finance_for_bu(
        Some(&actor(Role::Artist, Some(BuCode::Flow))),
        BuCode::Flow
    ));
}
