use uuid::Uuid;

use super::permissions::{Actor, FinanceScope, ProjectScope, TaskScope};
use crate::entities::enums::{BuCode, FinancialKind, Role};

pub fn actor(role: Role, bu: Option<BuCode>) -> Actor {
    Actor {
        id: Uuid::new_v4(),
        role,
        bu_code: bu,
    }
}

pub fn project(bu: BuCode) -> ProjectScope {
    ProjectScope {
        bu_code: bu,
        pm_id: None,
        participants: Vec::new(),
        created_by: None,
    }
}

pub fn project_with_pm(bu: BuCode, pm: Uuid) -> ProjectScope {
    ProjectScope {
        pm_id: Some(pm),
        ..project(bu)
    }
}

pub fn project_with_participant(bu: BuCode, participant: Uuid) -> ProjectScope {
    ProjectScope {
        participants: vec![participant],
        ..project(bu)
    }
}

pub fn task(bu: BuCode, assignee: Option<Uuid>) -> TaskScope {
    TaskScope {
        project_id: 1,
        bu_code: bu,
        assignee_id: assignee,
        created_by: None,
    }
}

pub fn entry(bu: BuCode, created_by: Option<Uuid>) -> FinanceScope {
    FinanceScope {
        project_id: 1,
        bu_code: bu,
        created_by,
        kind: FinancialKind::Expense,
    }
}

pub const ALL_ROLES: [Role; 6] = [
    Role::Admin,
    Role::Leader,
    Role::Manager,
    Role::Member,
    Role::Viewer,
    Role::Artist,
];

/// Case count for property tests; `PROPTEST_CASES` overrides.
pub fn proptest_config() -> proptest::prelude::ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(256);
    proptest::prelude::ProptestConfig::with_cases(cases)
}
